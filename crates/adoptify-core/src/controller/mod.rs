// ── Controllers ──
//
// Stateful handles mediating between the view layer and the gateways.
// State lives in a `watch` channel; readers take snapshots or subscribe.

mod auth;
mod collection;
mod state;

pub use auth::AuthController;
pub use collection::RemoteCollection;
pub use state::{AuthState, CollectionState, Settlement};
