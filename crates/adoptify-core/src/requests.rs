// ── Typed request payloads ──
//
// Bodies for mutating controller actions. Update requests are partial:
// unset fields are omitted from the JSON so the server leaves them alone.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::model::{AdoptionStatus, EntityId};

// ── Shop ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShopRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateShopRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateShopRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.location.is_none() && self.description.is_none()
    }
}

// ── Pet ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetRequest {
    pub name: String,
    pub species: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "image", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Owning shop. Ignored by the nested `add_pet_to_shop` route, which
    /// takes the shop from the path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop: Option<EntityId>,
}

impl CreatePetRequest {
    pub fn new(name: impl Into<String>, species: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            species: species.into(),
            breed: None,
            age: None,
            description: None,
            image_url: None,
            shop: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePetRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "image", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AdoptionStatus>,
}

impl UpdatePetRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.species.is_none()
            && self.breed.is_none()
            && self.age.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
            && self.status.is_none()
    }
}

// ── Session ────────────────────────────────────────────────────────

/// Account registration form.
#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: SecretString,
}

/// Login form.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: SecretString,
}

impl From<&SignupRequest> for LoginRequest {
    fn from(req: &SignupRequest) -> Self {
        Self {
            email: req.email.clone(),
            password: req.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_update_omits_unset_fields() {
        let req = UpdatePetRequest {
            status: Some(AdoptionStatus::Adopted),
            ..UpdatePetRequest::default()
        };
        let body = serde_json::to_value(&req).unwrap_or_default();
        assert_eq!(body, json!({ "status": "adopted" }));
        assert!(!req.is_empty());
        assert!(UpdatePetRequest::default().is_empty());
    }

    #[test]
    fn create_pet_uses_wire_field_names() {
        let mut req = CreatePetRequest::new("Rex", "dog");
        req.image_url = Some("https://img.example/rex.png".into());
        req.shop = Some(EntityId::from("s1"));
        let body = serde_json::to_value(&req).unwrap_or_default();
        assert_eq!(
            body,
            json!({
                "name": "Rex",
                "species": "dog",
                "image": "https://img.example/rex.png",
                "shop": "s1"
            })
        );
    }
}
