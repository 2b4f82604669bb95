// ── Domain model ──
//
// Canonical types consumers (CLI, tests) depend on. Wire shapes from
// `adoptify_api::models` are normalized into these by `crate::convert`.

pub mod entity_id;
pub mod pet;
pub mod shop;
pub mod user;

pub use entity_id::EntityId;
pub use pet::{AdoptionStatus, Pet};
pub use shop::Shop;
pub use user::User;

/// Entities held in a controller collection expose their backend id.
pub trait Identified {
    fn id(&self) -> &EntityId;
}

impl Identified for Shop {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Identified for Pet {
    fn id(&self) -> &EntityId {
        &self.id
    }
}
