// ── API-to-domain type conversions ──
//
// Bridges raw `adoptify_api` documents into canonical `adoptify_core::model`
// types. Each `From` impl normalizes field names, parses status strings
// into strong types, and fills defaults for missing optional data.

use adoptify_api::{ApiPet, ApiShop, ApiUser, PetRef};

use crate::model::{AdoptionStatus, EntityId, Pet, Shop, User};

/// Normalize the two status encodings the backend has used.
///
/// `status` wins when present and recognized; otherwise the legacy
/// `adopted` flag decides; otherwise the status is unknown.
fn adoption_status(status: Option<&str>, adopted: Option<bool>) -> AdoptionStatus {
    if let Some(parsed) = status.and_then(|s| s.trim().parse::<AdoptionStatus>().ok()) {
        return parsed;
    }
    match adopted {
        Some(true) => AdoptionStatus::Adopted,
        Some(false) => AdoptionStatus::Available,
        None => AdoptionStatus::Unknown,
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

impl From<ApiPet> for Pet {
    fn from(p: ApiPet) -> Self {
        let status = adoption_status(p.status.as_deref(), p.adopted);
        Self {
            id: EntityId::from(p.id),
            name: p.name,
            species: non_empty(p.species).unwrap_or_else(|| "unknown".into()),
            breed: non_empty(p.breed),
            age: p.age,
            description: non_empty(p.description),
            image_url: non_empty(p.image),
            status,
            shop: p.shop.map(|s| EntityId::from(s.id())),
            created_at: p.created_at,
        }
    }
}

impl From<ApiShop> for Shop {
    fn from(s: ApiShop) -> Self {
        Self {
            id: EntityId::from(s.id),
            name: s.name,
            location: non_empty(s.location),
            description: non_empty(s.description),
            pets: s.pets.iter().map(|p| EntityId::from(p.id())).collect(),
        }
    }
}

impl From<ApiUser> for User {
    fn from(u: ApiUser) -> Self {
        let adopted_pet_ids = u
            .adopted_pets
            .iter()
            .map(|p| EntityId::from(p.id()))
            .collect();
        let adopted_pets = u
            .adopted_pets
            .into_iter()
            .filter_map(|p| match p {
                PetRef::Pet(pet) => Some(Pet::from(*pet)),
                PetRef::Id(_) => None,
            })
            .collect();
        Self {
            id: EntityId::from(u.id),
            username: u.username,
            email: u.email,
            adopted_pets,
            adopted_pet_ids,
        }
    }
}
