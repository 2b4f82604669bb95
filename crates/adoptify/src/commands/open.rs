//! `open <path>`: resolve a URL path through the router and render the
//! matching page.

use adoptify_core::Route;

use crate::cli::{LoginArgs, SignupArgs};
use crate::error::CliError;

use super::Context;
use super::{home, pets, session};

pub async fn handle(ctx: &Context<'_>, path: &str) -> Result<(), CliError> {
    let route = Route::resolve(path);
    tracing::debug!(path, %route, "resolved route");

    match route {
        Route::Home => home::handle(ctx).await,
        Route::Pets => pets::list(ctx, None, None).await,
        Route::PetDetail(id) => pets::show(ctx, &id).await,
        Route::Signup => {
            session::signup(
                ctx,
                SignupArgs {
                    username: None,
                    email: None,
                    password_stdin: false,
                },
            )
            .await
        }
        Route::Login => {
            session::login(
                ctx,
                LoginArgs {
                    email: None,
                    password_stdin: false,
                },
            )
            .await
        }
        Route::NotFound(path) => Err(CliError::page_not_found(path)),
    }
}
