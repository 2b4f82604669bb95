// ── Pet domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::entity_id::EntityId;

/// Adoption lifecycle of a pet, normalized from the backend's `status`
/// string or legacy `adopted` flag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[non_exhaustive]
pub enum AdoptionStatus {
    Available,
    Pending,
    Adopted,
    #[default]
    Unknown,
}

impl AdoptionStatus {
    pub fn is_adoptable(&self) -> bool {
        matches!(self, Self::Available)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: EntityId,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub age: Option<u32>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub status: AdoptionStatus,
    /// Owning shop, if the pet is listed by one.
    pub shop: Option<EntityId>,
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Adopted".parse::<AdoptionStatus>().ok(), Some(AdoptionStatus::Adopted));
        assert_eq!("available".parse::<AdoptionStatus>().ok(), Some(AdoptionStatus::Available));
        assert!("rehomed".parse::<AdoptionStatus>().is_err());
    }

    #[test]
    fn status_displays_lowercase() {
        assert_eq!(AdoptionStatus::Pending.to_string(), "pending");
    }
}
