//! Client for the SophosLabs Intelix threat-intelligence service
//!
//! ```no_run
//! use intelix::{ClientOptions, IntelixClient};
//!
//! # async fn demo() -> intelix::Result<()> {
//! let mut client = IntelixClient::connect(ClientOptions {
//!     token: Some("access-token".to_string()),
//!     ..Default::default()
//! })
//! .await?;
//!
//! let hash = "d8a928b2043db77e340b523547bf16cb4aa483f0645fe0a290ed1f20aab76257";
//! let reputation = client.lookup_sha256(hash, true).await?;
//! println!("{}", reputation);
//!
//! client.dynamic_sha256(hash, true).await?;
//! for done in client.check_dynamic_jobs().await? {
//!     println!("{} {} finished", done.kind, done.key);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod digest;
pub mod error;
pub mod jobs;

pub use cache::{CacheKey, CachedReport, ReportApi, ReportCache};
pub use client::{
    AccessToken, AnalysisMode, ClientOptions, Credentials, IntelixApi, IntelixClient,
    IntelixHttp, JobStatus, Region, ReportKind, Session,
};
pub use config::Config;
pub use error::{ApiError, ConfigError, Error, InputError, Result};
pub use jobs::{CompletedJob, JobPoll, JobQueue, PendingJob, StalledJob};
