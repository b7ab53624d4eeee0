//! Configuration management for Intelix

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::client::{ClientOptions, Credentials, Region};
use crate::error::{ConfigError, Result};

/// Persisted client configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// OAuth client id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// Pre-issued access token (alternative to client id/secret)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Service region code
    #[serde(default)]
    pub region: Region,

    /// Custom API host, replacing the regional endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".intelix").join("config.yaml"))
    }

    /// Resolve an optional path override against the default location.
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional path override
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to an optional path override
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Credentials live here, keep it owner-only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Check which credential form is configured
    pub fn credentials(&self) -> Result<Credentials> {
        Ok(Credentials::resolve(
            self.client_id.as_deref(),
            self.client_secret.as_deref(),
            self.token.as_deref(),
        )?)
    }

    /// Convert into library client options
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            token: self.token.clone(),
            region: self.region.code().to_string(),
            api_host: self.api_host.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.client_id.is_none());
        assert!(config.token.is_none());
        assert_eq!(config.region, Region::De);
        assert!(config.api_host.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = Config::load_from(temp.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Config(ConfigError::NotFound)
        ));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.yaml");
        let config = Config {
            client_id: Some("id".to_string()),
            client_secret: Some("secret".to_string()),
            ..Default::default()
        };

        config.save_to(path.clone()).unwrap();
        let loaded = Config::load_from(path.clone()).unwrap();
        assert_eq!(loaded, config);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_save_at_and_load_at_use_override() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.yaml");
        let path_str = path.to_string_lossy().into_owned();
        let config = Config {
            token: Some("tok".to_string()),
            api_host: Some("http://127.0.0.1:1".to_string()),
            region: Region::De,
            ..Default::default()
        };

        config.save_at(Some(&path_str)).unwrap();
        assert!(path.exists());
        assert_eq!(Config::load_at(Some(&path_str)).unwrap(), config);
    }

    #[test]
    fn test_region_defaults_when_absent() {
        let config: Config = serde_yaml::from_str("token: abc\n").unwrap();
        assert_eq!(config.region, Region::De);
        assert_eq!(config.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_unknown_region_in_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "token: abc\nregion: MARS\n").unwrap();

        let err = Config::load_from(path).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Config(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_credentials_validation() {
        let config = Config {
            client_id: Some("id".to_string()),
            token: Some("tok".to_string()),
            ..Default::default()
        };
        assert!(config.credentials().is_err());

        let config = Config {
            token: Some("tok".to_string()),
            ..Default::default()
        };
        assert_eq!(config.credentials().unwrap().describe(), "access token");
    }

    #[test]
    fn test_client_options() {
        let config = Config {
            token: Some("tok".to_string()),
            api_host: Some("http://localhost:9999".to_string()),
            ..Default::default()
        };
        let options = config.client_options();
        assert_eq!(options.token.as_deref(), Some("tok"));
        assert_eq!(options.region, "DE");
        assert_eq!(options.api_host.as_deref(), Some("http://localhost:9999"));
    }
}
