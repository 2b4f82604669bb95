//! Integration tests for the `adoptify` CLI binary.
//!
//! Parsing, help, completions and routing run without a backend; page
//! tests point `--api-url` at a wiremock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `adoptify` binary with env isolation.
///
/// Clears all `ADOPTIFY_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn adoptify_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("adoptify");
    cmd.env("HOME", "/tmp/adoptify-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/adoptify-cli-test-nonexistent")
        .env_remove("ADOPTIFY_PROFILE")
        .env_remove("ADOPTIFY_API_URL")
        .env_remove("ADOPTIFY_OUTPUT")
        .env_remove("ADOPTIFY_INSECURE")
        .env_remove("ADOPTIFY_TIMEOUT")
        .env_remove("ADOPTIFY_TOKEN");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn api_url(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = adoptify_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_pages() {
    adoptify_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("pets")
            .and(predicate::str::contains("shops"))
            .and(predicate::str::contains("login"))
            .and(predicate::str::contains("open")),
    );
}

#[test]
fn test_version_flag() {
    adoptify_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("adoptify"));
}

#[test]
fn test_completions_bash() {
    adoptify_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("adoptify"));
}

#[test]
fn test_invalid_subcommand() {
    adoptify_cmd()
        .arg("adopt-everything")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_invalid_status_filter() {
    adoptify_cmd()
        .args(["pets", "list", "--status", "rehomed"])
        .assert()
        .code(2);
}

#[test]
fn test_config_path_prints_location() {
    adoptify_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Routing ─────────────────────────────────────────────────────────

#[test]
fn test_open_unknown_route_is_not_found() {
    let output = adoptify_cmd().args(["open", "/nope"]).output().unwrap();
    assert_eq!(output.status.code(), Some(4));
    let text = combined_output(&output);
    assert!(text.contains("/nope"), "Expected path in output:\n{text}");
}

#[test]
fn test_unknown_profile_is_rejected() {
    adoptify_cmd()
        .args(["--profile", "ghost", "pets", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost"));
}

// ── Pages against a mock backend ────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_pets_list_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/pets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "p1", "name": "Fido", "species": "dog", "status": "available" },
            { "_id": "p2", "name": "Misty", "species": "cat", "status": "adopted" }
        ])))
        .mount(&server)
        .await;

    let output = adoptify_cmd()
        .args(["--api-url", &api_url(&server), "-o", "json", "pets", "list"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let pets: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = pets
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Fido", "Misty"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_pets_list_filters_by_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/pets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "p1", "name": "Fido", "species": "dog", "status": "available" },
            { "_id": "p2", "name": "Misty", "species": "cat", "adopted": true }
        ])))
        .mount(&server)
        .await;

    adoptify_cmd()
        .args(["--api-url", &api_url(&server), "-o", "plain"])
        .args(["pets", "list", "--status", "adopted"])
        .assert()
        .success()
        .stdout(predicate::str::contains("p2").and(predicate::str::contains("p1").not()));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_pet_show_failure_reports_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/pets/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Pet not found" })),
        )
        .mount(&server)
        .await;

    adoptify_cmd()
        .args(["--api-url", &api_url(&server), "pets", "show", "missing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Pet not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_open_pet_detail_route() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/pets/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "p1", "name": "Fido", "species": "dog", "status": "available"
        })))
        .mount(&server)
        .await;

    adoptify_cmd()
        .args(["--api-url", &api_url(&server), "-o", "plain", "open", "/pets/p1/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("p1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_me_without_session_exits_auth() {
    let server = MockServer::start().await;

    adoptify_cmd()
        .args(["--api-url", &api_url(&server), "me"])
        .assert()
        .code(3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_me_without_adopted_pets() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/verify"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "u1", "username": "ana", "email": "ana@example.com", "adoptedPets": []
        })))
        .mount(&server)
        .await;

    adoptify_cmd()
        .env("ADOPTIFY_TOKEN", "tok-123")
        .args(["--api-url", &api_url(&server), "--color", "never", "me"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("ana <ana@example.com>")
                .and(predicate::str::contains("You currently have no adopted pets.")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_me_with_rejected_token_exits_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/verify"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "jwt expired" })),
        )
        .mount(&server)
        .await;

    adoptify_cmd()
        .env("ADOPTIFY_TOKEN", "stale")
        .args(["--api-url", &api_url(&server), "me"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("jwt expired"));
}
