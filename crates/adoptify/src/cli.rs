//! Clap derive structures for the `adoptify` CLI.
//!
//! Defines the command tree, global flags, and shared argument groups.

use clap::{Args, Parser, Subcommand, ValueEnum};

use adoptify_core::{AdoptionStatus, CreatePetRequest, EntityId};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// adoptify -- browse and manage the Adoptify pet marketplace
#[derive(Debug, Parser)]
#[command(
    name = "adoptify",
    version,
    about = "Browse pets and shops on an Adoptify pet-adoption marketplace",
    long_about = "A command-line client for the Adoptify pet-adoption marketplace.\n\n\
        Every page of the web client has a command: browse pets and shops,\n\
        sign up, log in, and review the pets you have adopted.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "ADOPTIFY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API root URL (overrides profile), e.g. http://localhost:5005/api
    #[arg(long, short = 'u', env = "ADOPTIFY_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ADOPTIFY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "ADOPTIFY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "ADOPTIFY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Home page: marketplace summary and pets available for adoption
    Home,

    /// Browse and manage pets
    #[command(alias = "pet")]
    Pets(PetsArgs),

    /// Browse and manage shops
    #[command(alias = "shop")]
    Shops(ShopsArgs),

    /// Create an account and log in
    Signup(SignupArgs),

    /// Log in and remember the session
    Login(LoginArgs),

    /// Forget the stored session
    Logout,

    /// Profile page: your account and adopted pets
    #[command(alias = "whoami")]
    Me,

    /// Render the page for a URL path (e.g. /pets/65f0c0ffee)
    Open {
        /// Path as it would appear in the browser
        path: String,
    },

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PETS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PetsArgs {
    #[command(subcommand)]
    pub command: PetsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PetsCommand {
    /// List pets
    #[command(alias = "ls")]
    List {
        /// Only pets with this adoption status
        #[arg(long, short = 's')]
        status: Option<StatusArg>,

        /// Only pets of this species (case-insensitive)
        #[arg(long)]
        species: Option<String>,
    },

    /// Show pet details
    #[command(alias = "get")]
    Show {
        /// Pet ID
        id: EntityId,
    },

    /// Create a pet
    Create {
        #[command(flatten)]
        pet: PetFields,

        /// Owning shop ID
        #[arg(long)]
        shop: Option<EntityId>,
    },

    /// Update a pet
    Update {
        /// Pet ID
        id: EntityId,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        species: Option<String>,

        #[arg(long)]
        breed: Option<String>,

        #[arg(long)]
        age: Option<u32>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        image_url: Option<String>,

        /// New adoption status
        #[arg(long)]
        status: Option<StatusArg>,
    },

    /// Delete a pet
    #[command(alias = "rm")]
    Delete {
        /// Pet ID
        id: EntityId,
    },
}

/// Fields of a new pet, shared by `pets create` and `shops add-pet`.
#[derive(Debug, Args)]
pub struct PetFields {
    /// Pet name
    #[arg(long)]
    pub name: String,

    /// Species (dog, cat, ...)
    #[arg(long)]
    pub species: String,

    #[arg(long)]
    pub breed: Option<String>,

    /// Age in years
    #[arg(long)]
    pub age: Option<u32>,

    #[arg(long)]
    pub description: Option<String>,

    /// Picture URL
    #[arg(long)]
    pub image_url: Option<String>,
}

impl PetFields {
    pub fn into_request(self, shop: Option<EntityId>) -> CreatePetRequest {
        CreatePetRequest {
            name: self.name,
            species: self.species,
            breed: self.breed,
            age: self.age,
            description: self.description,
            image_url: self.image_url,
            shop,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Available,
    Pending,
    Adopted,
}

impl From<StatusArg> for AdoptionStatus {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::Available => Self::Available,
            StatusArg::Pending => Self::Pending,
            StatusArg::Adopted => Self::Adopted,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SHOPS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ShopsArgs {
    #[command(subcommand)]
    pub command: ShopsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ShopsCommand {
    /// List shops
    #[command(alias = "ls")]
    List,

    /// Show shop details
    #[command(alias = "get")]
    Show {
        /// Shop ID
        id: EntityId,
    },

    /// Create a shop
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Update a shop
    Update {
        /// Shop ID
        id: EntityId,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a shop
    #[command(alias = "rm")]
    Delete {
        /// Shop ID
        id: EntityId,
    },

    /// List a new pet under a shop
    AddPet {
        /// Shop ID
        shop: EntityId,

        #[command(flatten)]
        pet: PetFields,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SESSION
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SignupArgs {
    /// Display name (prompted if omitted)
    #[arg(long)]
    pub username: Option<String>,

    /// Email address (prompted if omitted)
    #[arg(long)]
    pub email: Option<String>,

    /// Read the password from the first line of stdin
    #[arg(long)]
    pub password_stdin: bool,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Email address (defaults to the profile's username, else prompted)
    #[arg(long)]
    pub email: Option<String>,

    /// Read the password from the first line of stdin
    #[arg(long)]
    pub password_stdin: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
