//! Analysis modes, job status and response field access

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sandbox analysis flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Static,
    Dynamic,
}

impl AnalysisMode {
    /// Path segment used in `/analysis/file/{mode}/v1`
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Static => "static",
            AnalysisMode::Dynamic => "dynamic",
        }
    }

    /// Submission endpoint
    pub fn submit_path(&self) -> String {
        format!("/analysis/file/{}/v1/", self.as_str())
    }

    /// Report query endpoint (filtered by `sha256` query parameter)
    pub fn reports_path(&self) -> String {
        format!("/analysis/file/{}/v1/reports", self.as_str())
    }

    /// Report endpoint for a single job
    pub fn job_path(&self, job_id: &str) -> String {
        format!(
            "/analysis/file/{}/v1/reports/{}",
            self.as_str(),
            urlencoding::encode(job_id)
        )
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a cached report or pending job was keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Sha256,
    File,
    Url,
    Job,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Sha256 => "sha256",
            ReportKind::File => "file",
            ReportKind::Url => "url",
            ReportKind::Job => "job",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server-reported state of an analysis job (`jobStatus`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    InProgress,
    Success,
    /// Any other terminal status, passed through untouched
    Other(String),
}

impl JobStatus {
    /// Read `jobStatus` from a response body, if present.
    pub fn of(body: &Value) -> Option<Self> {
        body.get("jobStatus").and_then(Value::as_str).map(Self::from)
    }
}

impl From<&str> for JobStatus {
    fn from(status: &str) -> Self {
        match status {
            "IN_PROGRESS" => JobStatus::InProgress,
            "SUCCESS" => JobStatus::Success,
            other => JobStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::InProgress => f.write_str("IN_PROGRESS"),
            JobStatus::Success => f.write_str("SUCCESS"),
            JobStatus::Other(status) => f.write_str(status),
        }
    }
}

/// `jobId` of an analysis response
pub fn job_id(body: &Value) -> Option<&str> {
    body.get("jobId").and_then(Value::as_str)
}

/// `report` payload of a successful analysis response
pub fn report(body: &Value) -> Option<&Value> {
    body.get("report")
}

/// Lookups mark success by carrying a `requestId`.
pub fn is_lookup_success(body: &Value) -> bool {
    body.get("requestId").is_some()
}
