//! Cache addressing: which API a report came from and what it was keyed by

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client::models::{AnalysisMode, ReportKind};

/// API family a cached report belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportApi {
    Lookup,
    Static,
    Dynamic,
}

impl ReportApi {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportApi::Lookup => "lookup",
            ReportApi::Static => "static",
            ReportApi::Dynamic => "dynamic",
        }
    }
}

impl From<AnalysisMode> for ReportApi {
    fn from(mode: AnalysisMode) -> Self {
        match mode {
            AnalysisMode::Static => ReportApi::Static,
            AnalysisMode::Dynamic => ReportApi::Dynamic,
        }
    }
}

impl fmt::Display for ReportApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full address of a cached report: (api, kind, key)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CacheKey {
    pub api: ReportApi,
    pub kind: ReportKind,
    pub key: String,
}

impl CacheKey {
    pub fn new(api: ReportApi, kind: ReportKind, key: impl Into<String>) -> Self {
        Self {
            api,
            kind,
            key: key.into(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.api, self.kind, self.key)
    }
}
