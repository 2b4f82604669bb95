// ── Gateway seams ──
//
// Controllers talk to the backend through these traits rather than
// `ApiClient` directly, so tests can drive them with in-memory fakes and
// every controller instance can be wired independently.

mod http;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::CoreError;
use crate::model::{EntityId, Identified, User};
use crate::requests::{LoginRequest, SignupRequest};

pub use http::{HttpPets, HttpSession, HttpShops};

/// Server confirmation for a mutation. `message` is whatever the backend
/// chose to say; update endpoints frequently say nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ack {
    pub message: Option<String>,
}

impl Ack {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

/// CRUD access to one backend collection resource.
#[async_trait]
pub trait CollectionApi: Send + Sync + 'static {
    type Item: Identified + Clone + Send + Sync + 'static;
    type Create: Send + Sync;
    type Update: Send + Sync;

    /// Resource name used in log fields (`"shops"`, `"pets"`).
    const RESOURCE: &'static str;

    async fn list(&self) -> Result<Vec<Self::Item>, CoreError>;
    async fn get(&self, id: &EntityId) -> Result<Self::Item, CoreError>;
    async fn create(&self, data: &Self::Create) -> Result<Ack, CoreError>;
    async fn update(&self, id: &EntityId, data: &Self::Update) -> Result<Ack, CoreError>;
    async fn delete(&self, id: &EntityId) -> Result<Ack, CoreError>;
}

/// A collection whose items own a sub-collection created through a
/// nested route (`POST /{resource}/{id}/{children}`).
#[async_trait]
pub trait NestedCollectionApi: CollectionApi {
    type Child: Send + Sync;

    async fn add_child(&self, parent: &EntityId, child: &Self::Child) -> Result<Ack, CoreError>;
}

/// Session-scoped authentication.
#[async_trait]
pub trait SessionApi: Send + Sync + 'static {
    async fn signup(&self, request: &SignupRequest) -> Result<Ack, CoreError>;

    /// Exchange credentials for a token. Installing it is left to the
    /// caller (see `restore`).
    async fn login(&self, request: &LoginRequest) -> Result<SecretString, CoreError>;

    /// Resolve the installed token to its user.
    async fn verify(&self) -> Result<User, CoreError>;

    /// Install a token obtained earlier (e.g. from the keyring).
    fn restore(&self, token: SecretString);

    fn logout(&self);

    fn token(&self) -> Option<SecretString>;
}
