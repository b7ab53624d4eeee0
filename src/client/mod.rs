//! Intelix API client
//!
//! [`IntelixApi`] is the raw transport: token exchange, authenticated GET and
//! multipart upload, all returning JSON bodies. [`IntelixClient`] sits on top
//! of any transport and owns the session, report cache and job queues.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub mod http;
pub mod intelix;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod session;

pub use http::IntelixHttp;
pub use intelix::IntelixClient;
#[cfg(test)]
pub use mock::MockIntelixApi;
pub use models::{AccessToken, AnalysisMode, Credentials, JobStatus, Region, ReportKind};
pub use session::Session;

/// Default per-request timeout for the HTTP transport
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Intelix transport operations
#[async_trait]
pub trait IntelixApi: Send + Sync {
    /// Base URL service paths are resolved against
    fn base_url(&self) -> &str;

    /// Exchange client credentials for an access token
    async fn request_token(&self, client_id: &str, client_secret: &str) -> Result<AccessToken>;

    /// Authenticated GET returning the JSON body
    async fn get(&self, token: &AccessToken, path: &str, query: &[(&str, &str)]) -> Result<Value>;

    /// Authenticated multipart POST of a single file returning the JSON body
    async fn upload(&self, token: &AccessToken, path: &str, file: FileUpload) -> Result<Value>;
}

/// File contents queued for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Read a file fully into memory.
    pub async fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self { file_name, bytes })
    }
}

/// Inputs for [`IntelixClient::connect`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub token: Option<String>,
    /// Region code, e.g. `DE`
    pub region: String,
    /// Replaces both the token root and the regional endpoint when set
    pub api_host: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            token: None,
            region: Region::default().code().to_string(),
            api_host: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
