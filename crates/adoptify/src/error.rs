//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use adoptify_config::ConfigError;
use adoptify_core::{CoreError, Route};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the Adoptify API at {url}")]
    #[diagnostic(
        code(adoptify::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             URL: {url}\n\
             Override it with: adoptify --api-url <URL> ..."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(adoptify::timeout),
        help("Increase the timeout with --timeout or check the backend's responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(adoptify::auth_failed),
        help("Check your email and password, then run: adoptify login")
    )]
    AuthFailed { message: String },

    #[error("You are not logged in")]
    #[diagnostic(
        code(adoptify::not_logged_in),
        help("Run: adoptify login  (or adoptify signup to create an account)")
    )]
    NotLoggedIn,

    // ── Pages & actions ──────────────────────────────────────────────
    #[error("Page not found: {path}")]
    #[diagnostic(code(adoptify::page_not_found), help("Known pages: {routes}"))]
    PageNotFound { path: String, routes: String },

    #[error("{action} failed: {message}")]
    #[diagnostic(code(adoptify::action_failed))]
    ActionFailed { action: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(adoptify::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(adoptify::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: adoptify config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(adoptify::config))]
    Config(ConfigError),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NotLoggedIn => exit_code::AUTH,
            Self::PageNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    pub fn page_not_found(path: impl Into<String>) -> Self {
        Self::PageNotFound {
            path: path.into(),
            routes: Route::PATTERNS.join(", "),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::ProfileNotFound { name } => CliError::ProfileNotFound {
                name,
                available: String::new(),
            },
            other => CliError::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => CliError::Timeout,

            ref e @ CoreError::Unauthorized { .. } => CliError::AuthFailed {
                message: e.display_message(),
            },

            CoreError::Config { message } => CliError::Validation {
                field: "configuration".into(),
                reason: message,
            },

            other => CliError::ActionFailed {
                action: "request".into(),
                message: other.display_message(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_class() {
        assert_eq!(CliError::NotLoggedIn.exit_code(), exit_code::AUTH);
        assert_eq!(CliError::page_not_found("/nope").exit_code(), exit_code::NOT_FOUND);
        assert_eq!(CliError::from(CoreError::Timeout).exit_code(), exit_code::TIMEOUT);
        assert_eq!(
            CliError::ActionFailed {
                action: "delete pet".into(),
                message: "not found".into(),
            }
            .exit_code(),
            exit_code::GENERAL
        );
    }

    #[test]
    fn unauthorized_keeps_server_message() {
        let err = CliError::from(CoreError::Unauthorized {
            message: Some("Wrong password".into()),
        });
        assert!(matches!(err, CliError::AuthFailed { ref message } if message == "Wrong password"));
    }

    #[test]
    fn page_not_found_lists_routes() {
        let CliError::PageNotFound { routes, .. } = CliError::page_not_found("/x") else {
            unreachable!()
        };
        assert!(routes.contains("/pets/:id"));
    }
}
