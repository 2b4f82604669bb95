//! Controller layer between `adoptify-api` and the view layer.
//!
//! - **[`RemoteCollection`]** mirrors one backend collection (shops, pets)
//!   plus a detail slot and loading/error/message flags. Every mutation
//!   re-fetches the authoritative list before it settles.
//!
//! - **[`AuthController`]** holds the user behind the current session
//!   token and the derived list of adopted pets.
//!
//! - **Gateways** ([`gateway`]) are the async traits controllers call;
//!   `Http*` implementations wrap `adoptify_api::ApiClient`.
//!
//! - **[`Route`]** maps URL paths to pages, with a catch-all error page.
//!
//! - **[`App`]** wires one client and one controller per resource.
//!
//! Actions never return errors: they report a [`Settlement`] and record
//! failures in the controller's `error` field.

pub mod app;
pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod gateway;
pub mod model;
pub mod requests;
pub mod route;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use app::{App, PetsController, SessionController, ShopsController};
pub use config::{ClientConfig, TlsVerification};
pub use controller::{AuthController, AuthState, CollectionState, RemoteCollection, Settlement};
pub use error::CoreError;
pub use gateway::{Ack, CollectionApi, NestedCollectionApi, SessionApi};
pub use model::{AdoptionStatus, EntityId, Identified, Pet, Shop, User};
pub use requests::*;
pub use route::Route;
pub use stream::StateStream;
