// ── HTTP gateway implementations ──
//
// Thin adapters from the gateway traits onto `adoptify_api::ApiClient`.
// All three share one client so the session token installed by login is
// sent by the collection gateways too.

use std::sync::Arc;

use adoptify_api::ApiClient;
use async_trait::async_trait;
use secrecy::SecretString;

use super::{Ack, CollectionApi, NestedCollectionApi, SessionApi};
use crate::error::CoreError;
use crate::model::{EntityId, Pet, Shop, User};
use crate::requests::{
    CreatePetRequest, CreateShopRequest, LoginRequest, SignupRequest, UpdatePetRequest,
    UpdateShopRequest,
};

fn ack(resp: adoptify_api::MessageResponse) -> Ack {
    Ack {
        message: resp.message,
    }
}

// ── Shops ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct HttpShops {
    client: Arc<ApiClient>,
}

impl HttpShops {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CollectionApi for HttpShops {
    type Item = Shop;
    type Create = CreateShopRequest;
    type Update = UpdateShopRequest;

    const RESOURCE: &'static str = "shops";

    async fn list(&self) -> Result<Vec<Shop>, CoreError> {
        let shops = self.client.list_shops().await?;
        Ok(shops.into_iter().map(Shop::from).collect())
    }

    async fn get(&self, id: &EntityId) -> Result<Shop, CoreError> {
        Ok(Shop::from(self.client.get_shop(id.as_str()).await?))
    }

    async fn create(&self, data: &CreateShopRequest) -> Result<Ack, CoreError> {
        Ok(ack(self.client.create_shop(data).await?))
    }

    async fn update(&self, id: &EntityId, data: &UpdateShopRequest) -> Result<Ack, CoreError> {
        Ok(ack(self.client.update_shop(id.as_str(), data).await?))
    }

    async fn delete(&self, id: &EntityId) -> Result<Ack, CoreError> {
        Ok(ack(self.client.delete_shop(id.as_str()).await?))
    }
}

#[async_trait]
impl NestedCollectionApi for HttpShops {
    type Child = CreatePetRequest;

    async fn add_child(&self, parent: &EntityId, child: &CreatePetRequest) -> Result<Ack, CoreError> {
        let resp = self.client.add_pet_to_shop(parent.as_str(), child).await?;
        Ok(Ack {
            message: resp.message().map(str::to_owned),
        })
    }
}

// ── Pets ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct HttpPets {
    client: Arc<ApiClient>,
}

impl HttpPets {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CollectionApi for HttpPets {
    type Item = Pet;
    type Create = CreatePetRequest;
    type Update = UpdatePetRequest;

    const RESOURCE: &'static str = "pets";

    async fn list(&self) -> Result<Vec<Pet>, CoreError> {
        let pets = self.client.list_pets().await?;
        Ok(pets.into_iter().map(Pet::from).collect())
    }

    async fn get(&self, id: &EntityId) -> Result<Pet, CoreError> {
        Ok(Pet::from(self.client.get_pet(id.as_str()).await?))
    }

    async fn create(&self, data: &CreatePetRequest) -> Result<Ack, CoreError> {
        Ok(ack(self.client.create_pet(data).await?))
    }

    async fn update(&self, id: &EntityId, data: &UpdatePetRequest) -> Result<Ack, CoreError> {
        Ok(ack(self.client.update_pet(id.as_str(), data).await?))
    }

    async fn delete(&self, id: &EntityId) -> Result<Ack, CoreError> {
        Ok(ack(self.client.delete_pet(id.as_str()).await?))
    }
}

// ── Session ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct HttpSession {
    client: Arc<ApiClient>,
}

impl HttpSession {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SessionApi for HttpSession {
    async fn signup(&self, request: &SignupRequest) -> Result<Ack, CoreError> {
        let resp = self
            .client
            .signup(&request.username, &request.email, &request.password)
            .await?;
        Ok(ack(resp))
    }

    async fn login(&self, request: &LoginRequest) -> Result<SecretString, CoreError> {
        Ok(self.client.login(&request.email, &request.password).await?)
    }

    async fn verify(&self) -> Result<User, CoreError> {
        Ok(User::from(self.client.verify().await?))
    }

    fn restore(&self, token: SecretString) {
        self.client.set_session(token);
    }

    fn logout(&self) {
        self.client.logout();
    }

    fn token(&self) -> Option<SecretString> {
        self.client.session()
    }
}
