//! Config subcommand handlers.

use std::fmt::Write;

use dialoguer::Input;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Defaults, Profile};
use crate::error::CliError;
use crate::output;

use super::util::{self, prompt_err};

// ── Helpers ─────────────────────────────────────────────────────────

fn format_defaults(out: &mut String, defaults: &Defaults) {
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", defaults.output);
    let _ = writeln!(out, "color = \"{}\"", defaults.color);
    let _ = writeln!(out, "insecure = {}", defaults.insecure);
    let _ = writeln!(out, "timeout = {}", defaults.timeout);
}

/// Human-readable dump of the config. Session tokens live in the
/// keyring, never here.
fn format_config(cfg: &Config) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "default_profile = \"{}\"\n", cfg.active_profile_name());
    format_defaults(&mut out, &cfg.defaults);

    for (name, p) in &cfg.profiles {
        let _ = writeln!(out, "\n[profiles.{name}]");
        let _ = writeln!(out, "api_url = \"{}\"", p.api_url);
        if let Some(ref u) = p.username {
            let _ = writeln!(out, "username = \"{u}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }
    out.trim_end().to_owned()
}

/// Make `name` the default profile. Unknown names are rejected.
fn use_profile(cfg: &mut Config, name: &str) -> Result<(), CliError> {
    if !cfg.profiles.contains_key(name) {
        let available = if cfg.profiles.is_empty() {
            "(none)".into()
        } else {
            cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
        };
        return Err(CliError::ProfileNotFound {
            name: name.into(),
            available,
        });
    }
    cfg.default_profile = Some(name.into());
    Ok(())
}

fn init_wizard() -> Result<(), CliError> {
    let path = config::config_path();
    eprintln!("Adoptify configuration wizard");
    eprintln!("   Config path: {}\n", path.display());

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default(adoptify_config::DEFAULT_PROFILE.into())
        .interact_text()
        .map_err(prompt_err)?;

    let api_url: String = Input::new()
        .with_prompt("API URL")
        .default(adoptify_config::DEFAULT_API_URL.into())
        .validate_with(|input: &String| -> Result<(), String> {
            url::Url::parse(input)
                .map(|_| ())
                .map_err(|e| format!("not a valid URL: {e}"))
        })
        .interact_text()
        .map_err(prompt_err)?;

    let username: String = Input::new()
        .with_prompt("Login email (optional)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    let mut cfg = config::load_config_or_default();
    let replacing = cfg.profiles.contains_key(&profile_name);
    if replacing
        && !util::confirm(&format!("Profile '{profile_name}' exists. Overwrite?"), false)?
    {
        eprintln!("   Aborted");
        return Ok(());
    }

    cfg.profiles.insert(
        profile_name.clone(),
        Profile {
            api_url,
            username: Some(username.trim().to_owned()).filter(|u| !u.is_empty()),
            ..Profile::default()
        },
    );
    if cfg.profiles.len() == 1 {
        cfg.default_profile = Some(profile_name.clone());
    }
    config::save_config(&cfg)?;

    eprintln!("\n   Saved profile '{profile_name}' to {}", path.display());
    eprintln!("   Run `adoptify login` to start a session.");
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init_wizard(),

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = output::render_single(
                &global.output,
                &cfg,
                format_config,
                |c| c.active_profile_name().to_owned(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            use_profile(&mut cfg, &name)?;
            config::save_config(&cfg)?;
            output::print_status(&format!("Default profile set to '{name}'"), global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config_with(names: &[&str]) -> Config {
        let mut cfg = Config::default();
        for name in names {
            cfg.profiles.insert((*name).into(), Profile::default());
        }
        cfg
    }

    #[test]
    fn use_profile_sets_default() {
        let mut cfg = config_with(&["default", "staging"]);
        use_profile(&mut cfg, "staging").unwrap();
        assert_eq!(cfg.active_profile_name(), "staging");
    }

    #[test]
    fn use_profile_rejects_unknown_names() {
        let mut cfg = config_with(&["staging"]);
        let err = use_profile(&mut cfg, "prod").unwrap_err();
        assert!(matches!(
            err,
            CliError::ProfileNotFound { ref available, .. } if available == "staging"
        ));
        assert_eq!(cfg.active_profile_name(), "default");
    }

    #[test]
    fn formatted_config_lists_profiles() {
        let mut cfg = config_with(&["staging"]);
        if let Some(p) = cfg.profiles.get_mut("staging") {
            p.username = Some("ana@example.com".into());
        }
        let text = format_config(&cfg);
        assert!(text.contains("[profiles.staging]"));
        assert!(text.contains("username = \"ana@example.com\""));
        assert!(text.contains("timeout = 30"));
    }
}
