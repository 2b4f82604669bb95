// Pet endpoints

use serde::Serialize;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ApiPet, MessageResponse};

impl ApiClient {
    /// List all pets.
    ///
    /// `GET /pets`
    pub async fn list_pets(&self) -> Result<Vec<ApiPet>, Error> {
        let url = self.endpoint(&["pets"])?;
        debug!("listing pets");
        self.get(url).await
    }

    /// Fetch a single pet.
    ///
    /// `GET /pets/{id}`
    pub async fn get_pet(&self, id: &str) -> Result<ApiPet, Error> {
        let url = self.endpoint(&["pets", id])?;
        debug!(id, "fetching pet");
        self.get(url).await
    }

    /// `POST /pets`
    pub async fn create_pet(&self, body: &(impl Serialize + Sync)) -> Result<MessageResponse, Error> {
        let url = self.endpoint(&["pets"])?;
        debug!("creating pet");
        self.post(url, body).await
    }

    /// `PUT /pets/{id}`
    pub async fn update_pet(
        &self,
        id: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<MessageResponse, Error> {
        let url = self.endpoint(&["pets", id])?;
        debug!(id, "updating pet");
        self.put(url, body).await
    }

    /// `DELETE /pets/{id}`
    pub async fn delete_pet(&self, id: &str) -> Result<MessageResponse, Error> {
        let url = self.endpoint(&["pets", id])?;
        debug!(id, "deleting pet");
        self.delete(url).await
    }
}
