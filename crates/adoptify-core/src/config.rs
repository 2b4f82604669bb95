// ── Runtime client configuration ──
//
// Describes *how* to reach the Adoptify API. Carries connection tuning and
// an optional restored session token, but never touches disk. The CLI
// builds a `ClientConfig` (via adoptify-config) and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (local development servers).
    DangerAcceptInvalid,
}

/// Configuration for one API endpoint.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root (e.g., `http://localhost:5005/api`).
    pub url: Url,
    pub tls: TlsVerification,
    /// Request timeout, enforced by the transport.
    pub timeout: Duration,
    /// Session token from a previous login, if one was persisted.
    pub session: Option<SecretString>,
}

impl ClientConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(url: Url) -> Self {
        Self {
            url,
            tls: TlsVerification::default(),
            timeout: Self::DEFAULT_TIMEOUT,
            session: None,
        }
    }
}
