//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

use intelix::PendingJob;

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a, T: ?Sized> {
    /// Response body or report
    pub data: &'a T,

    /// Jobs still queued after the command, omitted for lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<&'a [PendingJob]>,

    /// Metadata about the response
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// Timestamp of the response
    pub timestamp: String,

    /// CLI version
    pub version: String,
}

impl<'a, T: ?Sized> JsonOutput<'a, T> {
    pub fn new(data: &'a T, pending: Option<&'a [PendingJob]>) -> Self {
        Self {
            data,
            pending,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(
    data: &T,
    pending: Option<&[PendingJob]>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data, pending))
}
