// Session authentication
//
// Token-based: `login` exchanges credentials for a bearer token; the caller
// installs it with `set_session` for subsequent requests. `verify` resolves the token to
// the current user. There is no server-side logout; dropping the token
// ends the session.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ApiUser, LoginResponse, MessageResponse};

impl ApiClient {
    /// Register a new account.
    ///
    /// `POST /auth/signup`. Does not log in.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<MessageResponse, Error> {
        let url = self.endpoint(&["auth", "signup"])?;
        debug!(email, "signing up");

        let body = json!({
            "username": username,
            "email": email,
            "password": password.expose_secret(),
        });

        self.post(url, &body).await
    }

    /// Authenticate with email/password.
    ///
    /// `POST /auth/login`. The token is returned, not installed: the
    /// caller decides whether the session is still wanted.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<SecretString, Error> {
        let url = self.endpoint(&["auth", "login"])?;
        debug!(email, "logging in");

        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let resp: LoginResponse = self.post(url, &body).await?;
        debug!("login successful");
        Ok(SecretString::from(resp.auth_token))
    }

    /// Resolve the current session to its user.
    ///
    /// `GET /auth/verify`. Fails with [`Error::Unauthorized`] without a
    /// session.
    pub async fn verify(&self) -> Result<ApiUser, Error> {
        if !self.has_session() {
            return Err(Error::Unauthorized { message: None });
        }
        let url = self.endpoint(&["auth", "verify"])?;
        debug!("verifying session");
        self.get(url).await
    }

    /// End the session locally.
    pub fn logout(&self) {
        self.clear_session();
        debug!("logout complete");
    }
}
