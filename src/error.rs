//! Error types for the Intelix client

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for Intelix operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the library and CLI
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed with status {0}. Check your client id and secret.")]
    AuthenticationFailed(StatusCode),

    #[error("Request was rejected as unauthorized. The access token is missing or expired.")]
    Unauthorized,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `intelix init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Provide either a token or a client id and secret pair, not both.")]
    ConflictingCredentials,

    #[error("No credentials configured. Provide a token or a client id and secret pair.")]
    MissingCredentials,

    #[error("Client id and client secret must be given together.")]
    IncompleteCredentials,

    #[error("Unknown region '{0}'. Supported regions: DE")]
    UnknownRegion(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Rejected caller input. No request is sent when one of these is returned.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Not a SHA-256 hash (expected 64 hex characters): {0}")]
    InvalidSha256(String),

    #[error("Not an absolute URL: {0}")]
    InvalidUrl(String),

    #[error("Unable to open file {}: {source}", .path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Job id must not be empty")]
    InvalidJobId,
}
