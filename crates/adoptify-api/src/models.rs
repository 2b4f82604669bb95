// Adoptify API wire types
//
// Models for the backend's JSON documents. Ids arrive as `_id` (document
// ids). Relations may be populated objects or bare ids depending on the
// endpoint, so references are untagged enums. Fields use `#[serde(default)]`
// liberally because older documents omit them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Shop ─────────────────────────────────────────────────────────────

/// Shop document from `GET /shops` and `GET /shops/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiShop {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pets: Vec<PetRef>,
}

/// A pet reference inside another document: populated or just the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PetRef {
    Id(String),
    Pet(Box<ApiPet>),
}

impl PetRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Pet(pet) => &pet.id,
        }
    }
}

// ── Pet ──────────────────────────────────────────────────────────────

/// Pet document from `GET /pets` and `GET /pets/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPet {
    #[serde(rename = "_id")]
    pub id: String,
    /// Embedded references may carry only a subset of fields.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "imageUrl")]
    pub image: Option<String>,
    /// `"available"`, `"pending"` or `"adopted"` on current documents.
    #[serde(default)]
    pub status: Option<String>,
    /// Older documents carry a boolean instead of `status`.
    #[serde(default)]
    pub adopted: Option<bool>,
    #[serde(default)]
    pub shop: Option<ShopRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Owning-shop reference on a pet: populated summary or just the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShopRef {
    Id(String),
    Shop {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl ShopRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) | Self::Shop { id, .. } => id,
        }
    }
}

// ── User ─────────────────────────────────────────────────────────────

/// Authenticated user from `GET /auth/verify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUser {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, alias = "name")]
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub adopted_pets: Vec<PetRef>,
}

// ── Mutation envelopes ───────────────────────────────────────────────

/// Confirmation body returned by create/update/delete: `{ "message": "..." }`.
///
/// Update endpoints may omit the message, and some reply with an empty
/// body; both decode to `message: None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Nested confirmation used by sub-resource creation:
/// `{ "data": { "message": "..." } }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NestedMessageResponse {
    #[serde(default)]
    pub data: Option<MessageResponse>,
}

impl NestedMessageResponse {
    pub fn message(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.message.as_deref())
    }
}

/// Login response: `{ "authToken": "..." }`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    pub auth_token: String,
}

/// Error body shape: `{ "message": "..." }`, occasionally `{ "error": "..." }`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.is_empty())
    }
}
