// Adoptify API HTTP client
//
// Wraps `reqwest::Client` with URL construction, bearer-session handling,
// and response decoding. Endpoint groups (shops, pets, auth) are
// implemented as inherent methods in separate files to keep this module
// focused on transport mechanics.

use std::sync::{PoisonError, RwLock};

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::ErrorBody;
use crate::transport::TransportConfig;

/// Raw HTTP client for the Adoptify REST API.
///
/// All methods return decoded payloads. Non-success responses are turned
/// into [`Error::Unauthorized`] or [`Error::Api`] carrying the server's
/// `message` field when present.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    /// Bearer token for the current session. Installed by `login` or
    /// restored from storage by the caller.
    session: RwLock<Option<SecretString>>,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the API root, e.g. `http://localhost:5005/api`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            session: RwLock::new(None),
        }
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Session management ───────────────────────────────────────────

    /// Install a session token; subsequent requests send it as a bearer.
    pub fn set_session(&self, token: SecretString) {
        debug!("installing session token");
        *self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Drop the session token.
    pub fn clear_session(&self) {
        debug!("clearing session token");
        *self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The current session token, if any.
    pub fn session(&self) -> Option<SecretString> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn has_session(&self) -> bool {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn apply_session(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let guard = self.session.read().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/{segments...}`, percent-encoding each segment.
    ///
    /// Ids are caller-supplied, so they go through `path_segments_mut`
    /// rather than string formatting.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl {
                url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let builder = self.apply_session(self.http.get(url));
        let resp = builder.send().await.map_err(Error::Transport)?;

        Self::parse_response(resp).await
    }

    /// Send a POST request with JSON body and decode the response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {}", url);

        let builder = self.apply_session(self.http.post(url).json(body));
        let resp = builder.send().await.map_err(Error::Transport)?;

        Self::parse_response(resp).await
    }

    /// Send a PUT request with JSON body and decode the response.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("PUT {}", url);

        let builder = self.apply_session(self.http.put(url).json(body));
        let resp = builder.send().await.map_err(Error::Transport)?;

        Self::parse_response(resp).await
    }

    /// Send a DELETE request and decode the response.
    pub(crate) async fn delete<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("DELETE {}", url);

        let builder = self.apply_session(self.http.delete(url));
        let resp = builder.send().await.map_err(Error::Transport)?;

        Self::parse_response(resp).await
    }

    /// Map status codes to errors, then decode the JSON body.
    ///
    /// An empty success body decodes as `{}` so confirmation-only
    /// endpoints that reply `204 No Content` still produce a value.
    async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::into_message);
            trace!(%status, ?message, "request failed");

            return Err(if status == StatusCode::UNAUTHORIZED {
                Error::Unauthorized { message }
            } else {
                Error::Api {
                    status: status.as_u16(),
                    message,
                }
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let body = if body.trim().is_empty() {
            "{}".to_owned()
        } else {
            body
        };

        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn endpoint_appends_segments_to_base_path() {
        let c = client("http://localhost:5005/api");
        let url = c.endpoint(&["pets", "abc123"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5005/api/pets/abc123");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let c = client("http://localhost:5005/api/");
        let url = c.endpoint(&["shops"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5005/api/shops");
    }

    #[test]
    fn endpoint_escapes_ids() {
        let c = client("http://localhost:5005");
        let url = c.endpoint(&["pets", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5005/pets/a%2Fb%20c");
    }

    #[test]
    fn endpoint_rejects_cannot_be_a_base_urls() {
        let c = client("mailto:someone@example.com");
        assert!(matches!(
            c.endpoint(&["pets"]),
            Err(Error::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn session_round_trip() {
        let c = client("http://localhost");
        assert!(!c.has_session());
        c.set_session(SecretString::from("tok".to_string()));
        assert_eq!(c.session().unwrap().expose_secret(), "tok");
        c.clear_session();
        assert!(c.session().is_none());
    }
}
