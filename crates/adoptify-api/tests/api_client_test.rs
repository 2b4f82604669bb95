#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use adoptify_api::{ApiClient, Error, PetRef, ShopRef};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn secret(s: &str) -> SecretString {
    SecretString::from(s.to_string())
}

// ── Shops ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_shops() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/shops"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "_id": "s1",
                "name": "Happy Paws",
                "location": "Lisbon",
                "pets": ["p1", { "_id": "p2", "name": "Rex", "species": "dog" }]
            },
            { "_id": "s2", "name": "Cat Corner" }
        ])))
        .mount(&server)
        .await;

    let shops = client.list_shops().await.unwrap();

    assert_eq!(shops.len(), 2);
    assert_eq!(shops[0].name, "Happy Paws");
    assert_eq!(shops[0].location.as_deref(), Some("Lisbon"));
    assert_eq!(shops[0].pets.len(), 2);
    assert!(matches!(shops[0].pets[0], PetRef::Id(ref id) if id == "p1"));
    assert_eq!(shops[0].pets[1].id(), "p2");
    assert!(shops[1].pets.is_empty());
}

#[tokio::test]
async fn test_list_shops_with_partial_pet_reference() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/shops"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "s1", "name": "Happy Paws", "pets": [{ "_id": "p3", "status": "pending" }] }
        ])))
        .mount(&server)
        .await;

    let shops = client.list_shops().await.unwrap();

    assert_eq!(shops[0].pets[0].id(), "p3");
    assert!(matches!(shops[0].pets[0], PetRef::Pet(ref pet) if pet.name.is_empty()));
}

#[tokio::test]
async fn test_add_pet_to_shop_reads_nested_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/shops/s1/pets"))
        .and(body_json(json!({ "name": "Rex", "species": "dog" })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "data": { "message": "Pet added to shop" } })),
        )
        .mount(&server)
        .await;

    let resp = client
        .add_pet_to_shop("s1", &json!({ "name": "Rex", "species": "dog" }))
        .await
        .unwrap();

    assert_eq!(resp.message(), Some("Pet added to shop"));
}

#[tokio::test]
async fn test_update_shop_with_empty_body() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/shops/s1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let resp = client
        .update_shop("s1", &json!({ "name": "Renamed" }))
        .await
        .unwrap();

    assert!(resp.message.is_none());
}

// ── Pets ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_pet_with_populated_shop() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/pets/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "p1",
            "name": "Fido",
            "species": "dog",
            "age": 3,
            "status": "available",
            "imageUrl": "https://img.example/fido.png",
            "shop": { "_id": "s1", "name": "Happy Paws" },
            "createdAt": "2024-03-01T10:00:00Z"
        })))
        .mount(&server)
        .await;

    let pet = client.get_pet("p1").await.unwrap();

    assert_eq!(pet.name, "Fido");
    assert_eq!(pet.age, Some(3));
    assert_eq!(pet.status.as_deref(), Some("available"));
    assert_eq!(pet.image.as_deref(), Some("https://img.example/fido.png"));
    assert!(matches!(pet.shop, Some(ShopRef::Shop { ref id, .. }) if id == "s1"));
    assert!(pet.created_at.is_some());
}

#[tokio::test]
async fn test_delete_pet_returns_message() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/pets/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "deleted" })))
        .mount(&server)
        .await;

    let resp = client.delete_pet("p1").await.unwrap();
    assert_eq!(resp.message.as_deref(), Some("deleted"));
}

// ── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_token_is_sent_as_bearer() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "ana@example.com", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "authToken": "tok-123" })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/verify"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "u1",
            "username": "ana",
            "email": "ana@example.com",
            "adoptedPets": [{ "_id": "p9", "name": "Misty", "species": "cat", "status": "adopted" }]
        })))
        .mount(&server)
        .await;

    let token = client
        .login("ana@example.com", &secret("pw"))
        .await
        .unwrap();
    assert_eq!(token.expose_secret(), "tok-123");
    assert!(!client.has_session());

    client.set_session(token);
    let user = client.verify().await.unwrap();
    assert_eq!(user.username, "ana");
    assert_eq!(user.adopted_pets.len(), 1);
    assert_eq!(user.adopted_pets[0].id(), "p9");
}

#[tokio::test]
async fn test_login_failure_is_unauthorized_with_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Wrong password" })),
        )
        .mount(&server)
        .await;

    let result = client.login("ana@example.com", &secret("nope")).await;

    match result {
        Err(ref e @ Error::Unauthorized { .. }) => {
            assert_eq!(e.server_message(), Some("Wrong password"));
        }
        other => panic!("expected Unauthorized error, got: {other:?}"),
    }
    assert!(!client.has_session());
}

#[tokio::test]
async fn test_verify_without_session_short_circuits() {
    let (_server, client) = setup().await;

    let result = client.verify().await;
    assert!(matches!(result, Err(Error::Unauthorized { message: None })));
}

#[tokio::test]
async fn test_logout_drops_session() {
    let (_server, client) = setup().await;

    client.set_session(secret("tok"));
    client.logout();
    assert!(!client.has_session());
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_not_found_carries_server_message() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/shops/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "not found" })))
        .mount(&server)
        .await;

    let err = client.delete_shop("missing").await.unwrap_err();

    assert!(matches!(err, Error::Api { status: 404, .. }));
    assert_eq!(err.server_message(), Some("not found"));
}

#[tokio::test]
async fn test_server_error_without_json_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/pets"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client.list_pets().await.unwrap_err();

    match err {
        Error::Api { status, ref message } => {
            assert_eq!(status, 500);
            assert!(message.is_none());
        }
        ref other => panic!("expected Api error, got: {other:?}"),
    }
    assert!(err.server_message().is_none());
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/pets"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\": \"a list\"}"))
        .mount(&server)
        .await;

    let result = client.list_pets().await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}
