// Shop endpoints
//
// Shops own pets; adding a pet to a shop is a nested create under
// `/shops/{id}/pets` and answers with the nested `{ data: { message } }`
// envelope instead of the flat one.

use serde::Serialize;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ApiShop, MessageResponse, NestedMessageResponse};

impl ApiClient {
    /// List all shops.
    ///
    /// `GET /shops`
    pub async fn list_shops(&self) -> Result<Vec<ApiShop>, Error> {
        let url = self.endpoint(&["shops"])?;
        debug!("listing shops");
        self.get(url).await
    }

    /// Fetch a single shop.
    ///
    /// `GET /shops/{id}`
    pub async fn get_shop(&self, id: &str) -> Result<ApiShop, Error> {
        let url = self.endpoint(&["shops", id])?;
        debug!(id, "fetching shop");
        self.get(url).await
    }

    /// Create a shop.
    ///
    /// `POST /shops`
    pub async fn create_shop(
        &self,
        body: &(impl Serialize + Sync),
    ) -> Result<MessageResponse, Error> {
        let url = self.endpoint(&["shops"])?;
        debug!("creating shop");
        self.post(url, body).await
    }

    /// Update a shop with a partial payload.
    ///
    /// `PUT /shops/{id}`
    pub async fn update_shop(
        &self,
        id: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<MessageResponse, Error> {
        let url = self.endpoint(&["shops", id])?;
        debug!(id, "updating shop");
        self.put(url, body).await
    }

    /// Delete a shop.
    ///
    /// `DELETE /shops/{id}`
    pub async fn delete_shop(&self, id: &str) -> Result<MessageResponse, Error> {
        let url = self.endpoint(&["shops", id])?;
        debug!(id, "deleting shop");
        self.delete(url).await
    }

    /// Create a pet under a shop.
    ///
    /// `POST /shops/{id}/pets`
    pub async fn add_pet_to_shop(
        &self,
        shop_id: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<NestedMessageResponse, Error> {
        let url = self.endpoint(&["shops", shop_id, "pets"])?;
        debug!(shop_id, "adding pet to shop");
        self.post(url, body).await
    }
}
