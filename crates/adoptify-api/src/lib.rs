// adoptify-api: Async Rust client for the Adoptify REST API
//
// `ApiClient` owns transport mechanics (URL construction, bearer session,
// response/error decoding). Endpoint groups live in their own modules as
// inherent methods: `shops`, `pets`, `auth`.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod pets;
pub mod shops;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use models::{
    ApiPet, ApiShop, ApiUser, MessageResponse, NestedMessageResponse, PetRef, ShopRef,
};
pub use transport::{TlsMode, TransportConfig};
