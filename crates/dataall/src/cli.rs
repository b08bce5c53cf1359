//! Clap derive structures for the `dataall` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use dataall_api::operations::MaintenanceMode;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// dataall -- terminal console for a data.all tenant
#[derive(Debug, Parser)]
#[command(
    name = "dataall",
    version,
    about = "Browse and administer a data.all tenant from the command line",
    long_about = "A console for the data.all GraphQL API.\n\n\
        Lists datasets, environments, organizations and metadata forms,\n\
        and lets tenant administrators manage maintenance windows.",
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
    /// Config profile to use
    #[arg(long, short = 'p', env = "DATAALL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// GraphQL endpoint URL for the active module (overrides profile)
    #[arg(long, short = 'e', env = "DATAALL_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Backend module to talk to (overrides profile)
    #[arg(long, short = 'm', env = "DATAALL_MODULE", global = true)]
    pub module: Option<String>,

    /// Identity token (overrides env, keyring and profile)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "DATAALL_OUTPUT",
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

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "DATAALL_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (0 disables it)
    #[arg(long, env = "DATAALL_TIMEOUT", global = true)]
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
    /// Browse datasets and their tables
    #[command(alias = "ds")]
    Datasets(DatasetsArgs),

    /// Browse environments, their networks and teams
    #[command(alias = "env")]
    Environments(EnvironmentsArgs),

    /// Browse organizations
    #[command(alias = "org")]
    Organizations(OrganizationsArgs),

    /// Browse metadata forms
    MetadataForms(MetadataFormsArgs),

    /// Inspect and manage the maintenance window
    #[command(alias = "mw")]
    Maintenance(MaintenanceArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Shared pagination and search arguments for all list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Page to fetch (1-based)
    #[arg(long, short = 'P', default_value = "1", conflicts_with = "all")]
    pub page: u32,

    /// Items per page (defaults to the profile's page size)
    #[arg(long, short = 'l')]
    pub page_size: Option<u32>,

    /// Free-text search term
    #[arg(long, short = 't')]
    pub term: Option<String>,

    /// Fetch all pages automatically
    #[arg(long, short = 'a')]
    pub all: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DATASETS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DatasetsArgs {
    #[command(subcommand)]
    pub command: DatasetsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DatasetsCommand {
    /// List datasets visible to you
    #[command(alias = "ls")]
    List(ListArgs),

    /// List tables registered in a dataset
    Tables {
        /// Dataset URI
        dataset_uri: String,

        #[command(flatten)]
        list: ListArgs,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ENVIRONMENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EnvironmentsArgs {
    #[command(subcommand)]
    pub command: EnvironmentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum EnvironmentsCommand {
    /// List environments visible to you
    #[command(alias = "ls")]
    List(ListArgs),

    /// List VPC networks of an environment
    Networks {
        /// Environment URI
        environment_uri: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// List teams invited to an environment
    Teams {
        /// Environment URI
        environment_uri: String,

        #[command(flatten)]
        list: ListArgs,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ORGANIZATIONS / METADATA FORMS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct OrganizationsArgs {
    #[command(subcommand)]
    pub command: OrganizationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum OrganizationsCommand {
    /// List organizations visible to you
    #[command(alias = "ls")]
    List(ListArgs),
}

#[derive(Debug, Args)]
pub struct MetadataFormsArgs {
    #[command(subcommand)]
    pub command: MetadataFormsCommand,
}

#[derive(Debug, Subcommand)]
pub enum MetadataFormsCommand {
    /// List metadata forms visible to you
    #[command(alias = "ls")]
    List(ListArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MAINTENANCE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct MaintenanceArgs {
    #[command(subcommand)]
    pub command: MaintenanceCommand,
}

#[derive(Debug, Subcommand)]
pub enum MaintenanceCommand {
    /// Show the current maintenance window and your access level
    Status,

    /// Start a maintenance window (admin)
    Start {
        /// What users may still do while the window is in effect
        mode: ModeArg,
    },

    /// End the maintenance window (admin)
    Stop,

    /// Rebuild the catalog search index (admin)
    Reindex {
        /// Also purge catalog entries of deleted items
        #[arg(long)]
        with_deletes: bool,
    },

    /// Poll the window and print every change until interrupted
    Watch {
        /// Seconds between polls (defaults to the configured interval)
        #[arg(long, short = 'i')]
        interval: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Queries allowed, mutations refused
    ReadOnly,
    /// Everything refused for non-admins
    NoAccess,
}

impl From<ModeArg> for MaintenanceMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::ReadOnly => Self::ReadOnly,
            ModeArg::NoAccess => Self::NoAccess,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG / COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or extend the config file with guided setup
    Init,

    /// Display the config file contents (tokens redacted)
    Show,

    /// Print the config file location
    Path,

    /// Store a token in the system keyring
    SetToken,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
