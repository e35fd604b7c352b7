//! Clap derive structures for the `ttnkit` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use ttnkit_core::Right;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ttnkit -- manage The Things Network console applications
#[derive(Debug, Parser)]
#[command(
    name = "ttnkit",
    version,
    about = "Manage The Things Network applications from the command line",
    long_about = "Administer applications, devices, EUIs, access keys, and collaborators\n\
        through the account server's applications API.\n\n\
        Every mutation re-reads the affected application so the output\n\
        reflects what the server holds afterwards.",
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
    /// Console profile to use
    #[arg(long, short = 'p', env = "TTNKIT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Applications API URL (overrides profile)
    #[arg(long, env = "TTNKIT_API_URL", global = true)]
    pub api_url: Option<String>,

    /// OAuth access token
    #[arg(long, env = "TTNKIT_ACCESS_TOKEN", global = true, hide_env_values = true)]
    pub access_token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "TTNKIT_OUTPUT",
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

    /// Accept invalid TLS certificates (private deployments)
    #[arg(long, short = 'k', env = "TTNKIT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "TTNKIT_TIMEOUT", global = true)]
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
    /// Manage applications
    #[command(alias = "app", alias = "a")]
    Apps(AppsArgs),

    /// Manage an application's devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Issue and release application EUIs
    Euis(EuisArgs),

    /// Manage an application's access keys
    #[command(alias = "keys")]
    AccessKeys(AccessKeysArgs),

    /// Manage an application's collaborators
    #[command(alias = "collab")]
    Collaborators(CollaboratorsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  APPLICATIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AppsArgs {
    #[command(subcommand)]
    pub command: AppsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AppsCommand {
    /// List all applications
    #[command(alias = "ls")]
    List,

    /// Get application details
    Get {
        /// Application ID
        app: String,
    },

    /// Create an application
    Create {
        /// Application ID
        app: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Handler to register ("none" leaves it unregistered)
        #[arg(long)]
        handler: Option<String>,
    },

    /// Rename an application and optionally change its handler
    Update {
        /// Application ID
        app: String,

        /// New display name
        #[arg(long)]
        name: String,

        /// Handler to register ("none" removes the registration)
        #[arg(long)]
        handler: Option<String>,
    },

    /// Delete an application
    #[command(alias = "rm")]
    Delete {
        /// Application ID
        app: String,
    },

    /// Register a handler, or "none" to remove the registration
    SetHandler {
        /// Application ID
        app: String,

        /// Handler ID, or "none"
        handler: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices (empty when no handler is registered)
    #[command(alias = "ls")]
    List {
        /// Application ID
        app: String,
    },

    /// Get device details
    Get {
        /// Application ID
        app: String,

        /// Device ID
        device: String,
    },

    /// Register a device from a JSON file
    Add {
        /// Application ID
        app: String,

        /// JSON device record
        #[arg(long, short = 'F', value_name = "PATH")]
        from_file: PathBuf,
    },

    /// Patch a device from a JSON file
    Update {
        /// Application ID
        app: String,

        /// Device ID
        device: String,

        /// JSON device record
        #[arg(long, short = 'F', value_name = "PATH")]
        from_file: PathBuf,
    },

    /// Delete a device
    #[command(alias = "rm")]
    Delete {
        /// Application ID
        app: String,

        /// Device ID
        device: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EUIS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EuisArgs {
    #[command(subcommand)]
    pub command: EuisCommand,
}

#[derive(Debug, Subcommand)]
pub enum EuisCommand {
    /// Ask the server to issue a new EUI
    Create {
        /// Application ID
        app: String,
    },

    /// Release an EUI
    #[command(alias = "rm")]
    Delete {
        /// Application ID
        app: String,

        /// EUI to release
        eui: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ACCESS KEYS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AccessKeysArgs {
    #[command(subcommand)]
    pub command: AccessKeysCommand,
}

#[derive(Debug, Subcommand)]
pub enum AccessKeysCommand {
    /// List access keys
    #[command(alias = "ls")]
    List {
        /// Application ID
        app: String,
    },

    /// Create or replace an access key
    Set {
        /// Application ID
        app: String,

        /// Key name
        name: String,

        /// Right to grant (repeatable)
        #[arg(long = "right", short = 'r', required = true)]
        rights: Vec<Right>,
    },

    /// Delete an access key
    #[command(alias = "rm")]
    Delete {
        /// Application ID
        app: String,

        /// Key name
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COLLABORATORS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CollaboratorsArgs {
    #[command(subcommand)]
    pub command: CollaboratorsCommand,
}

#[derive(Debug, Subcommand)]
pub enum CollaboratorsCommand {
    /// List collaborators
    #[command(alias = "ls")]
    List {
        /// Application ID
        app: String,
    },

    /// Grant a user rights on the application, replacing existing ones
    Set {
        /// Application ID
        app: String,

        /// Username
        username: String,

        /// Right to grant (repeatable)
        #[arg(long = "right", short = 'r', required = true)]
        rights: Vec<Right>,
    },

    /// Remove a collaborator
    #[command(alias = "rm")]
    Delete {
        /// Application ID
        app: String,

        /// Username
        username: String,
    },
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
    /// Display the current configuration (secrets masked)
    Show,

    /// Print the config file path
    Path,

    /// List configured profiles
    Profiles,

    /// Store the active profile's access token in the system keyring
    SetToken,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
