//! Session pages: signup, login, logout, and the profile page.

use std::fmt::Write;
use std::sync::Arc;

use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::warn;

use adoptify_core::{LoginRequest, Pet, Settlement, SignupRequest, User};

use crate::cli::{LoginArgs, SignupArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::Context;
use super::pets::PetRow;
use super::util;

const NO_ADOPTED_PETS: &str = "You currently have no adopted pets.";

/// Keep the new session for later invocations. Failure is not fatal:
/// the session still lasts for this command.
fn persist_session(ctx: &Context<'_>) {
    let Some(token) = ctx.app.session.session_token() else {
        return;
    };
    if let Err(e) = config::store_session_token(ctx.profile_name, &token) {
        warn!(profile = ctx.profile_name, error = %e, "could not store session token");
    }
}

fn forget_session(ctx: &Context<'_>) {
    if let Err(e) = config::clear_session_token(ctx.profile_name) {
        warn!(profile = ctx.profile_name, error = %e, "could not clear session token");
    }
}

fn greet(ctx: &Context<'_>) {
    if let Some(user) = ctx.app.session.user() {
        let name = if ctx.color() {
            user.username.bold().to_string()
        } else {
            user.username.clone()
        };
        output::print_status(&format!("Logged in as {name}"), ctx.global.quiet);
    }
}

// ── Signup / login / logout ─────────────────────────────────────────

pub async fn signup(ctx: &Context<'_>, args: SignupArgs) -> Result<(), CliError> {
    let username = util::text_or_prompt(args.username, "Username")?;
    let email = util::text_or_prompt(args.email, "Email")?;
    let password = util::read_password(args.password_stdin)?;
    let request = SignupRequest {
        username,
        email,
        password,
    };

    let session = &ctx.app.session;
    let settlement =
        util::with_spinner(ctx.global, "Creating account...", session.signup(&request)).await;
    util::settled(settlement, "signup", session.error())?;

    if let Some(message) = session.message() {
        output::print_status(&message, ctx.global.quiet);
    }
    persist_session(ctx);
    greet(ctx);
    Ok(())
}

pub async fn login(ctx: &Context<'_>, args: LoginArgs) -> Result<(), CliError> {
    let email = util::text_or_prompt(args.email.or_else(|| ctx.profile.username.clone()), "Email")?;
    let password = util::read_password(args.password_stdin)?;
    let request = LoginRequest { email, password };

    let session = &ctx.app.session;
    let settlement = util::with_spinner(ctx.global, "Logging in...", session.login(&request)).await;
    if settlement.is_failed() {
        return Err(CliError::AuthFailed {
            message: session.error().unwrap_or_else(|| "login rejected".into()),
        });
    }
    util::settled(settlement, "login", session.error())?;

    persist_session(ctx);
    greet(ctx);
    Ok(())
}

pub fn logout(ctx: &Context<'_>) {
    ctx.app.session.logout();
    forget_session(ctx);
    output::print_status("Logged out", ctx.global.quiet);
}

// ── Profile page ────────────────────────────────────────────────────

#[derive(Serialize)]
struct ProfilePage {
    user: Arc<User>,
    adopted_pets: Vec<Pet>,
}

fn render_profile(page: &ProfilePage, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} <{}>\n",
        output::heading(&page.user.username, color),
        page.user.email
    );
    let _ = writeln!(out, "{}", output::heading("My pets", color));
    if page.adopted_pets.is_empty() {
        let _ = write!(out, "{NO_ADOPTED_PETS}");
    } else {
        let rows: Vec<PetRow> = page.adopted_pets.iter().map(PetRow::from).collect();
        let _ = write!(out, "{}", output::render_table(&rows));
    }
    out
}

/// Adopted pets the server sent as bare ids are resolved through the
/// pet collection.
async fn adopted_pets(ctx: &Context<'_>, user: &User) -> Vec<Pet> {
    let mut pets = user.adopted_pets.clone();
    let missing: Vec<_> = user
        .adopted_pet_ids
        .iter()
        .filter(|id| !pets.iter().any(|p| &p.id == *id))
        .collect();
    if missing.is_empty() {
        return pets;
    }
    if ctx.app.pets.fetch_all().await == Settlement::Applied {
        let state = ctx.app.pets.state();
        pets.extend(missing.into_iter().filter_map(|id| state.find(id)).map(|p| (*p).clone()));
    }
    pets
}

pub async fn me(ctx: &Context<'_>) -> Result<(), CliError> {
    let session = &ctx.app.session;
    if session.session_token().is_none() {
        return Err(CliError::NotLoggedIn);
    }

    let settlement = util::with_spinner(ctx.global, "Loading profile...", session.refresh()).await;
    if settlement.is_failed() && session.session_token().is_none() {
        // The server rejected the stored token.
        forget_session(ctx);
        return Err(CliError::AuthFailed {
            message: session.error().unwrap_or_else(|| "session expired".into()),
        });
    }
    util::settled(settlement, "load profile", session.error())?;

    let Some(user) = session.user() else {
        return Err(CliError::NotLoggedIn);
    };
    let page = ProfilePage {
        adopted_pets: adopted_pets(ctx, &user).await,
        user,
    };

    let color = ctx.color();
    let out = output::render_single(
        &ctx.global.output,
        &page,
        |p| render_profile(p, color),
        |p| p.user.id.to_string(),
    );
    output::print_output(&out, ctx.global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use adoptify_core::EntityId;

    fn ana(adopted: Vec<Pet>) -> ProfilePage {
        ProfilePage {
            user: Arc::new(User {
                id: EntityId::from("u1"),
                username: "ana".into(),
                email: "ana@example.com".into(),
                adopted_pet_ids: adopted.iter().map(|p| p.id.clone()).collect(),
                adopted_pets: adopted.clone(),
            }),
            adopted_pets: adopted,
        }
    }

    #[test]
    fn profile_without_pets_shows_empty_message() {
        let text = render_profile(&ana(Vec::new()), false);
        assert!(text.starts_with("ana <ana@example.com>"));
        assert!(text.contains("My pets"));
        assert!(text.ends_with(NO_ADOPTED_PETS));
    }
}
