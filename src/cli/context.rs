//! Command execution context
//!
//! Merges config file and CLI/env options, then builds an authenticated
//! client.

use log::debug;

use crate::cli::{GlobalOptions, OutputFormat};
use intelix::config::Config;
use intelix::error::{ConfigError, Error, Result};
use intelix::{Credentials, IntelixClient};

/// Context for command execution containing config, client, and output format.
pub struct CommandContext {
    /// Merged configuration
    pub config: Config,
    /// Authenticated API client
    pub client: IntelixClient,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context with full initialization.
    ///
    /// # Errors
    /// Returns error if no credentials are available, the config is invalid,
    /// or authentication fails.
    pub async fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = resolve_config(opts)?;
        let client = IntelixClient::connect(config.client_options()).await?;

        Ok(Self {
            config,
            client,
            format: opts.format,
        })
    }
}

/// Config with CLI/env overrides applied, before credential validation
pub struct MergedConfig {
    pub config: Config,
    /// Whether a config file was found
    pub from_file: bool,
}

/// Load the config file (if any) and apply CLI/env overrides.
///
/// Credentials given on the command line replace the file's credentials as
/// a whole, so a flag token never collides with a stored client secret.
pub fn merge_config(opts: &GlobalOptions) -> Result<MergedConfig> {
    let (mut config, from_file) = match Config::load_at(opts.config_ref()) {
        Ok(config) => (config, true),
        Err(Error::Config(ConfigError::NotFound)) => (Config::default(), false),
        Err(err) => return Err(err),
    };

    if opts.has_credentials() {
        debug!("Using credentials from command line or environment");
        config.client_id = opts.client_id.clone();
        config.client_secret = opts.client_secret.clone();
        config.token = opts.token.clone();
    }

    if let Some(region) = &opts.region {
        config.region = region.parse()?;
    }

    if let Some(host) = opts.api_host_ref() {
        config.api_host = Some(host.to_string());
    }

    Ok(MergedConfig { config, from_file })
}

/// Merge config and overrides, then require usable credentials.
///
/// With no config file and no credential flags this is `NotFound`, so the
/// caller can point at `intelix init`.
pub fn resolve_config(opts: &GlobalOptions) -> Result<Config> {
    let MergedConfig { config, from_file } = merge_config(opts)?;

    match Credentials::resolve(
        config.client_id.as_deref(),
        config.client_secret.as_deref(),
        config.token.as_deref(),
    ) {
        Ok(_) => Ok(config),
        Err(ConfigError::MissingCredentials) if !from_file => Err(ConfigError::NotFound.into()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intelix::Region;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> String {
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_missing_file_without_flags_is_not_found() {
        let temp = TempDir::new().unwrap();
        let opts = GlobalOptions {
            config: Some(temp.path().join("absent.yaml").to_string_lossy().into_owned()),
            ..Default::default()
        };

        let err = resolve_config(&opts).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::NotFound)));
    }

    #[test]
    fn test_missing_file_with_token_flag() {
        let temp = TempDir::new().unwrap();
        let opts = GlobalOptions {
            config: Some(temp.path().join("absent.yaml").to_string_lossy().into_owned()),
            token: Some("tok".to_string()),
            ..Default::default()
        };

        let config = resolve_config(&opts).unwrap();
        assert_eq!(config.token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_flag_credentials_replace_file_credentials() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "client_id: id\nclient_secret: secret\n");
        let opts = GlobalOptions {
            config: Some(path),
            token: Some("tok".to_string()),
            ..Default::default()
        };

        let config = resolve_config(&opts).unwrap();
        assert!(config.client_id.is_none());
        assert!(config.client_secret.is_none());
        assert_eq!(config.token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_conflicting_file_credentials_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "client_id: id\nclient_secret: s\ntoken: t\n");
        let opts = GlobalOptions {
            config: Some(path),
            ..Default::default()
        };

        let err = resolve_config(&opts).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::ConflictingCredentials)
        ));
    }

    #[test]
    fn test_region_and_host_overrides() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "token: tok\n");
        let opts = GlobalOptions {
            config: Some(path.clone()),
            region: Some("de".to_string()),
            api_host: Some("http://127.0.0.1:1".to_string()),
            ..Default::default()
        };

        let config = resolve_config(&opts).unwrap();
        assert_eq!(config.region, Region::De);
        assert_eq!(config.api_host.as_deref(), Some("http://127.0.0.1:1"));

        let opts = GlobalOptions {
            config: Some(path),
            region: Some("moon".to_string()),
            ..Default::default()
        };
        let err = resolve_config(&opts).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::UnknownRegion(_))));
    }

    #[test]
    fn test_merge_keeps_invalid_credentials_for_reporting() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "client_id: id\nclient_secret: s\ntoken: t\n");
        let opts = GlobalOptions {
            config: Some(path),
            ..Default::default()
        };

        let merged = merge_config(&opts).unwrap();
        assert!(merged.from_file);
        assert!(merged.config.credentials().is_err());
    }
}
