// ── Composition root ──
//
// Builds one API client and one controller per resource, and hands the
// handles to the view layer. There is no global lookup: independent
// `App` instances can coexist.

use std::sync::Arc;

use adoptify_api::{ApiClient, TlsMode, TransportConfig};
use tracing::debug;

use crate::config::{ClientConfig, TlsVerification};
use crate::controller::{AuthController, RemoteCollection, Settlement};
use crate::error::CoreError;
use crate::gateway::{HttpPets, HttpSession, HttpShops};

pub type ShopsController = RemoteCollection<HttpShops>;
pub type PetsController = RemoteCollection<HttpPets>;
pub type SessionController = AuthController<HttpSession>;

/// The wired application: shared client plus controllers.
#[derive(Clone)]
pub struct App {
    client: Arc<ApiClient>,
    pub shops: ShopsController,
    pub pets: PetsController,
    pub session: SessionController,
}

impl App {
    /// Build the transport from `config` and wire the controllers.
    ///
    /// A session token in `config` is installed but not verified; call
    /// [`SessionController::refresh`] to load the user.
    pub fn new(config: &ClientConfig) -> Result<Self, CoreError> {
        let transport = build_transport(config);
        let client = ApiClient::new(config.url.clone(), &transport)?;
        if let Some(token) = &config.session {
            client.set_session(token.clone());
        }
        debug!(url = %config.url, "application wired");
        Ok(Self::from_client(Arc::new(client)))
    }

    /// Wire controllers around an existing client.
    pub fn from_client(client: Arc<ApiClient>) -> Self {
        Self {
            shops: RemoteCollection::new(HttpShops::new(Arc::clone(&client))),
            pets: RemoteCollection::new(HttpPets::new(Arc::clone(&client))),
            session: AuthController::new(HttpSession::new(Arc::clone(&client))),
            client,
        }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// Initial loads for both collections, run concurrently.
    pub async fn mount(&self) -> (Settlement, Settlement) {
        tokio::join!(self.shops.fetch_all(), self.pets.fetch_all())
    }

    /// Cancel every controller's in-flight work.
    pub fn shutdown(&self) {
        self.shops.close();
        self.pets.close();
        self.session.close();
    }
}

fn build_transport(config: &ClientConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;
    use url::Url;

    use super::*;

    #[tokio::test]
    async fn new_installs_restored_session() {
        let mut config = ClientConfig::new(Url::parse("http://127.0.0.1:9/api").unwrap());
        config.session = Some(SecretString::from("tok".to_owned()));

        let app = App::new(&config).unwrap();

        assert!(app.client().has_session());
        assert!(app.session.session_token().is_some());
        assert!(!app.session.is_authenticated());
    }

    #[tokio::test]
    async fn shutdown_cancels_all_controllers() {
        let config = ClientConfig::new(Url::parse("http://127.0.0.1:9/api").unwrap());
        let app = App::new(&config).unwrap();

        app.shutdown();

        assert_eq!(app.mount().await, (Settlement::Cancelled, Settlement::Cancelled));
        assert!(app.session.is_closed());
    }
}
