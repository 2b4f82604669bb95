//! CLI configuration: thin wrapper around `adoptify_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--api-url, --insecure, --timeout).

use adoptify_core::ClientConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use adoptify_config::{
    Config, Defaults, Profile, clear_session_token, config_path, load_config_or_default,
    resolve_session_token, save_config, store_session_token,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.active_profile_name().to_owned())
}

/// Resolve the profile to use, with CLI flag overrides applied.
///
/// With `--api-url`, an unconfigured profile is not an error: the flag
/// alone describes the endpoint.
pub fn resolve_profile(
    global: &GlobalOpts,
    config: &Config,
    profile_name: &str,
) -> Result<Profile, CliError> {
    let mut profile = match config.profile(profile_name) {
        Ok(profile) => profile,
        Err(_) if global.api_url.is_some() => Profile::default(),
        Err(_) => {
            return Err(CliError::ProfileNotFound {
                name: profile_name.into(),
                available: available_profiles(config),
            });
        }
    };

    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }
    if global.insecure || config.defaults.insecure {
        profile.insecure = Some(true);
    }
    profile.timeout = global
        .timeout
        .or(profile.timeout)
        .or(Some(config.defaults.timeout));

    Ok(profile)
}

/// Everything a controller-bound command needs from configuration.
pub struct Resolved {
    pub profile_name: String,
    pub profile: Profile,
    pub client: ClientConfig,
}

/// Build the `ClientConfig` for this invocation, restoring the stored
/// session token for the active profile.
pub fn resolve(global: &GlobalOpts) -> Result<Resolved, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    let profile = resolve_profile(global, &cfg, &profile_name)?;

    let session = resolve_session_token(&profile_name);
    let client = adoptify_config::client_config(&profile, session)?;
    Ok(Resolved {
        profile_name,
        profile,
        client,
    })
}

fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
