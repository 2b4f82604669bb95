// ── Core error types ──
//
// User-facing errors from adoptify-core. Consumers never see reqwest
// errors or JSON parse failures directly; the `From<adoptify_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the Adoptify API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to the Adoptify API timed out")]
    Timeout,

    // ── Remote failures ──────────────────────────────────────────────
    #[error("Not authorized: {}", message.as_deref().unwrap_or("log in first"))]
    Unauthorized { message: Option<String> },

    #[error("Not found: {}", message.as_deref().unwrap_or("the requested resource does not exist"))]
    NotFound { message: Option<String> },

    #[error("Remote operation failed: {}", message.as_deref().unwrap_or("no details from server"))]
    Api {
        message: Option<String>,
        status: Option<u16>,
    },

    // ── Local errors ─────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The message the server attached to this failure, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message } | Self::NotFound { message } | Self::Api { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    /// Text suitable for a controller's `error` field: the server's own
    /// message when present, otherwise this error's description. Never empty.
    pub fn display_message(&self) -> String {
        self.server_message()
            .filter(|m| !m.trim().is_empty())
            .map_or_else(|| self.to_string(), str::to_owned)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<adoptify_api::Error> for CoreError {
    fn from(err: adoptify_api::Error) -> Self {
        match err {
            adoptify_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            adoptify_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            adoptify_api::Error::InvalidBaseUrl { url } => CoreError::Config {
                message: format!("API URL cannot be used as a base: {url}"),
            },
            adoptify_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            adoptify_api::Error::Unauthorized { message } => CoreError::Unauthorized { message },
            adoptify_api::Error::Api {
                status: 404,
                message,
            } => CoreError::NotFound { message },
            adoptify_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            adoptify_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_message_prefers_server_text() {
        let err = CoreError::from(adoptify_api::Error::Api {
            status: 404,
            message: Some("not found".into()),
        });
        assert!(matches!(err, CoreError::NotFound { .. }));
        assert_eq!(err.display_message(), "not found");
    }

    #[test]
    fn display_message_falls_back_to_description() {
        let err = CoreError::from(adoptify_api::Error::Api {
            status: 500,
            message: None,
        });
        assert_eq!(err.display_message(), "Remote operation failed: no details from server");
    }

    #[test]
    fn blank_server_message_is_ignored() {
        let err = CoreError::Api {
            message: Some("  ".into()),
            status: Some(400),
        };
        assert!(!err.display_message().trim().is_empty());
    }

    #[test]
    fn unauthorized_maps_through() {
        let err = CoreError::from(adoptify_api::Error::Unauthorized { message: None });
        assert!(matches!(err, CoreError::Unauthorized { message: None }));
    }
}
