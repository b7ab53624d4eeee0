//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - status line, pending jobs and indented body
    #[default]
    Pretty,
    /// JSON format - structured for scripts/APIs
    Json,
}
