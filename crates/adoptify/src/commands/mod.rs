//! Command dispatch: each command is a page that triggers controller
//! actions and renders the resulting state.

pub mod config_cmd;
pub mod home;
pub mod open;
pub mod pets;
pub mod session;
pub mod shops;
pub mod util;

use adoptify_core::App;

use crate::cli::{Command, GlobalOpts};
use crate::config::Profile;
use crate::error::CliError;
use crate::output;

/// What every page handler gets: the wired controllers plus the
/// invocation's profile and flags.
pub struct Context<'a> {
    pub app: &'a App,
    pub profile_name: &'a str,
    pub profile: &'a Profile,
    pub global: &'a GlobalOpts,
}

impl Context<'_> {
    pub fn color(&self) -> bool {
        output::should_color(&self.global.color)
    }
}

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &Context<'_>) -> Result<(), CliError> {
    match cmd {
        Command::Home => home::handle(ctx).await,
        Command::Pets(args) => pets::handle(ctx, args).await,
        Command::Shops(args) => shops::handle(ctx, args).await,
        Command::Signup(args) => session::signup(ctx, args).await,
        Command::Login(args) => session::login(ctx, args).await,
        Command::Logout => {
            session::logout(ctx);
            Ok(())
        }
        Command::Me => session::me(ctx).await,
        Command::Open { path } => open::handle(ctx, &path).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
