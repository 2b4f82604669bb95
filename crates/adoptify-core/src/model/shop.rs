// ── Shop domain type ──

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub id: EntityId,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Ids of pets listed by this shop.
    pub pets: Vec<EntityId>,
}

impl Shop {
    pub fn pet_count(&self) -> usize {
        self.pets.len()
    }
}
