//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; config file values are merged in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format (pretty, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.intelix/config.yaml)
    pub config: Option<String>,

    /// Client id override
    pub client_id: Option<String>,

    /// Client secret override
    pub client_secret: Option<String>,

    /// Access token override
    pub token: Option<String>,

    /// Region override
    pub region: Option<String>,

    /// Custom API host for development/testing
    pub api_host: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            client_id: cli.client_id.clone(),
            client_secret: cli.client_secret.clone(),
            token: cli.token.clone(),
            region: cli.region.clone(),
            api_host: cli.api_host.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Get API host override as `Option<&str>`.
    pub fn api_host_ref(&self) -> Option<&str> {
        self.api_host.as_deref()
    }

    /// Whether any credential was given on the command line or environment.
    pub fn has_credentials(&self) -> bool {
        [&self.client_id, &self.client_secret, &self.token]
            .iter()
            .any(|value| value.as_deref().is_some_and(|v| !v.is_empty()))
    }
}
