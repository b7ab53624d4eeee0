//! Intelix API data models
//!
//! Response bodies are kept as `serde_json::Value` since their shape is owned
//! by the service; this module holds the few fields and enums the client
//! interprets.

pub mod analysis;
mod auth;
mod region;

pub use analysis::{AnalysisMode, JobStatus, ReportKind};
pub use auth::{AccessToken, Credentials};
pub use region::{AUTH_ROOT, Region, SERVER_ROOT};
