//! Shared helpers for command handlers.

use std::future::Future;
use std::io::{self, BufRead, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use secrecy::SecretString;

use adoptify_core::Settlement;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Turn an action's settlement into a command result. A failed action
/// reports the message its controller recorded.
pub fn settled(settlement: Settlement, action: &str, error: Option<String>) -> Result<(), CliError> {
    match settlement {
        Settlement::Applied | Settlement::Superseded => Ok(()),
        Settlement::Failed => Err(CliError::ActionFailed {
            action: action.into(),
            message: error.unwrap_or_else(|| "the server did not say why".into()),
        }),
        Settlement::Cancelled => Err(CliError::ActionFailed {
            action: action.into(),
            message: "cancelled".into(),
        }),
    }
}

/// Show a spinner on stderr while `fut` is pending (the page's loading
/// state). Skipped when quiet or when stderr is not a terminal.
pub async fn with_spinner<F: Future>(global: &GlobalOpts, message: &str, fut: F) -> F::Output {
    if global.quiet || !io::stderr().is_terminal() {
        return fut.await;
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(Duration::from_millis(80));
    let result = fut.await;
    spinner.finish_and_clear();
    result
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)?;
    Ok(confirmed)
}

/// Use `value` if given, otherwise prompt for it.
pub fn text_or_prompt(value: Option<String>, prompt: &str) -> Result<String, CliError> {
    let text = match value {
        Some(v) => v,
        None => dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(prompt_err)?,
    };
    if text.trim().is_empty() {
        return Err(CliError::Validation {
            field: prompt.to_lowercase(),
            reason: "cannot be empty".into(),
        });
    }
    Ok(text.trim().to_owned())
}

/// Read a password from stdin (first line) or an interactive prompt.
pub fn read_password(from_stdin: bool) -> Result<SecretString, CliError> {
    let password = if from_stdin {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        line.trim_end_matches(['\r', '\n']).to_owned()
    } else {
        rpassword::prompt_password("Password: ")?
    };
    if password.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "cannot be empty".into(),
        });
    }
    Ok(SecretString::from(password))
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_settlement_carries_controller_error() {
        let err = settled(Settlement::Failed, "delete pet", Some("not found".into()));
        assert!(matches!(
            err,
            Err(CliError::ActionFailed { ref message, .. }) if message == "not found"
        ));
    }

    #[test]
    fn superseded_counts_as_success() {
        assert!(settled(Settlement::Superseded, "list pets", None).is_ok());
    }
}
