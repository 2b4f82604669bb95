// ── Authenticated user ──

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;
use super::pet::Pet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub email: String,
    /// Adopted pets the server sent populated.
    pub adopted_pets: Vec<Pet>,
    /// Every adopted pet id, populated or not.
    pub adopted_pet_ids: Vec<EntityId>,
}

impl User {
    pub fn has_adopted(&self) -> bool {
        !self.adopted_pet_ids.is_empty()
    }
}
