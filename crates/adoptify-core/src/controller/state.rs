// ── Controller state snapshots ──

use std::sync::Arc;

use serde::Serialize;
use strum::Display;

use crate::model::{EntityId, Identified, Pet, User};

/// Snapshot of a remote collection controller.
///
/// `items` and `detail` are shared pointers, so cloning a snapshot is
/// cheap. `error` and `message` are independent: a mutation can leave a
/// confirmation message and a failed re-fetch error side by side.
#[derive(Debug, Serialize)]
pub struct CollectionState<T> {
    pub items: Arc<Vec<Arc<T>>>,
    pub detail: Option<Arc<T>>,
    pub loading: bool,
    pub error: Option<String>,
    pub message: Option<String>,
}

// Manual impls: derives would require `T: Clone` / `T: Default`.
impl<T> Clone for CollectionState<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            detail: self.detail.clone(),
            loading: self.loading,
            error: self.error.clone(),
            message: self.message.clone(),
        }
    }
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            detail: None,
            loading: false,
            error: None,
            message: None,
        }
    }
}

impl<T: Identified> CollectionState<T> {
    /// Look up an item in the collection by id.
    pub fn find(&self, id: &EntityId) -> Option<Arc<T>> {
        self.items.iter().find(|item| item.id() == id).cloned()
    }
}

/// Snapshot of the auth controller.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthState {
    pub user: Option<Arc<User>>,
    pub loading: bool,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl AuthState {
    /// Adopted pets of the current user; empty when logged out.
    pub fn adopted_pets(&self) -> Vec<Pet> {
        self.user
            .as_ref()
            .map(|u| u.adopted_pets.clone())
            .unwrap_or_default()
    }
}

/// How a controller action ended.
///
/// Failures are never returned as `Err`: a `Failed` action has recorded
/// its message in the controller's `error` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Settlement {
    /// The response was applied to state.
    Applied,
    /// The request failed and `error` was set.
    Failed,
    /// A newer request of the same kind was issued first; the response
    /// was discarded.
    Superseded,
    /// The controller was closed before the response arrived.
    Cancelled,
}

impl Settlement {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }

    pub fn is_failed(self) -> bool {
        matches!(self, Self::Failed)
    }
}
