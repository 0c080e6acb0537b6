//! Clap derive structures for the `gridsite` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// gridsite -- inventory of electrical-utility sites and devices
#[derive(Debug, Parser)]
#[command(
    name = "gridsite",
    version,
    about = "Manage the utility-site inventory from the command line",
    long_about = "Browse, edit and bulk-import sites and their field devices.\n\n\
        Talks to the inventory Data API; CSV imports are validated locally\n\
        before any record is created.",
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
    #[arg(long, short = 'p', env = "GRIDSITE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Data API base URL (overrides profile)
    #[arg(long, env = "GRIDSITE_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(long, short = 'o', env = "GRIDSITE_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

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
    #[arg(long, short = 'k', env = "GRIDSITE_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "GRIDSITE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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
    /// Browse and edit sites
    #[command(alias = "s")]
    Sites(SitesArgs),

    /// Browse and edit field devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Bulk-create sites from a CSV file
    #[command(alias = "imp")]
    Import(ImportArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Paging arguments shared by list commands.
#[derive(Debug, Args)]
pub struct PageArgs {
    /// Page to show (1-based)
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Rows per page (defaults to the configured page size)
    #[arg(long)]
    pub per_page: Option<usize>,

    /// Show every matching row on one page
    #[arg(long, short = 'a')]
    pub all: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SITES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SitesArgs {
    #[command(subcommand)]
    pub command: SitesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SitesCommand {
    /// List sites
    #[command(alias = "ls")]
    List {
        /// Match site name, running number, FL number or circuit id
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Only this client ("all" for any)
        #[arg(long)]
        client: Option<String>,

        /// Only this state ("all" for any)
        #[arg(long)]
        state: Option<String>,

        /// Only this project status ("all" for any)
        #[arg(long)]
        status: Option<String>,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// Show one site and its devices
    Get {
        /// Site running number
        running_number: u64,
    },

    /// Create a site from a JSON file
    Create {
        /// JSON object with the site attributes (camelCase keys)
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Replace a site's attributes from a JSON file
    Update {
        /// Site running number
        running_number: u64,

        /// JSON object with the site attributes (camelCase keys)
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Delete a site
    #[command(alias = "rm")]
    Delete {
        /// Site running number
        running_number: u64,
    },

    /// Export sites to CSV
    Export {
        /// Destination file (stdout when omitted)
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,

        /// Only sites matching this search
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show site statistics
    Stats,

    /// List distinct clients
    Clients,

    /// List distinct states
    States,
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
    /// List devices
    #[command(alias = "ls")]
    List {
        /// Match site name, client or serial numbers
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Only this client ("all" for any)
        #[arg(long)]
        client: Option<String>,

        /// Only this connectivity type ("all" for any)
        #[arg(long)]
        connectivity_type: Option<String>,

        /// Only devices linked to this site running number
        #[arg(long)]
        site: Option<u64>,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// Show one device
    Get {
        /// Device ID
        device: String,
    },

    /// Create a device from a JSON file
    Create {
        /// JSON object with the device attributes (camelCase keys)
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Replace a device's attributes from a JSON file
    Update {
        /// Device ID
        device: String,

        /// JSON object with the device attributes (camelCase keys)
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Delete a device
    #[command(alias = "rm")]
    Delete {
        /// Device ID
        device: String,
    },

    /// Show device statistics
    Stats,

    /// List distinct clients
    Clients,

    /// List connectivity types in use
    ConnectivityTypes,

    /// List breaker types in use
    BreakerTypes,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  IMPORT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ImportArgs {
    #[command(subcommand)]
    pub command: ImportCommand,
}

#[derive(Debug, Subcommand)]
pub enum ImportCommand {
    /// Write the CSV import template (headers plus one sample row)
    Template {
        /// Destination file (stdout when omitted; bare -f uses the default name)
        #[arg(
            long,
            short = 'f',
            num_args = 0..=1,
            default_missing_value = gridsite_core::import::template::TEMPLATE_FILE_NAME
        )]
        file: Option<PathBuf>,
    },

    /// Validate a CSV file and show the preview without importing
    Check {
        /// CSV file to validate
        file: PathBuf,
    },

    /// Validate a CSV file and create every valid site
    Run {
        /// CSV file to import
        file: PathBuf,
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
    /// Create or extend the config file with guided setup
    Init,

    /// Display current configuration
    Show,

    /// Print the config file location
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
