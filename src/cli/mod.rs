//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod analysis;
pub mod args;
pub mod completions;
pub mod context;
pub mod init;
pub mod lookup;
pub mod status;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// Intelix CLI - reputation lookups and sandbox analysis with SophosLabs Intelix
#[derive(Parser, Debug)]
#[command(name = "intelix")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, json)
    #[arg(
        long,
        global = true,
        env = "INTELIX_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "INTELIX_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// OAuth client id (replaces credentials from the config file)
    #[arg(long, global = true, env = "INTELIX_CLIENT_ID", hide_env = true)]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[arg(
        long,
        global = true,
        env = "INTELIX_CLIENT_SECRET",
        hide_env_values = true
    )]
    pub client_secret: Option<String>,

    /// Pre-issued access token (instead of client id and secret)
    #[arg(long, global = true, env = "INTELIX_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Service region
    #[arg(long, global = true, env = "INTELIX_REGION", hide_env = true)]
    pub region: Option<String>,

    /// Custom API host for development/testing
    #[arg(long, global = true, env = "INTELIX_API_HOST", hide = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "INTELIX_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Intelix configuration
    Init,

    /// Show configuration status
    Status,

    /// Reputation lookups
    #[command(subcommand)]
    Lookup(LookupCommands),

    /// Static file analysis
    #[command(subcommand)]
    Static(AnalysisCommands),

    /// Dynamic (sandbox) file analysis
    #[command(subcommand)]
    Dynamic(AnalysisCommands),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// Lookup subcommands
#[derive(Subcommand, Debug)]
pub enum LookupCommands {
    /// Look up a SHA-256 file hash
    Sha256 {
        /// 64-character hex digest
        hash: String,
    },

    /// Look up a URL
    Url {
        /// Absolute URL, e.g. https://example.com/path
        url: String,
    },

    /// Hash a local file and look it up
    File {
        /// Path to the file
        path: String,
    },
}

/// Analysis subcommands, shared by static and dynamic modes
#[derive(Subcommand, Debug)]
pub enum AnalysisCommands {
    /// Fetch existing reports for a SHA-256 hash
    Sha256 {
        /// 64-character hex digest
        hash: String,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Upload a file for analysis
    File {
        /// Path to the file
        path: String,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Fetch the report of a job
    Job {
        /// Job id returned by a submission
        job_id: String,

        #[command(flatten)]
        wait: WaitArgs,
    },
}

/// Polling options for analysis commands
#[derive(Debug, Clone, clap::Args)]
pub struct WaitArgs {
    /// Keep polling until every queued job completes
    #[arg(long)]
    pub wait: bool,

    /// Seconds between polls when waiting
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,
}
