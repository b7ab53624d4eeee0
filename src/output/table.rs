//! Table output for job listings

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

use intelix::{AnalysisMode, CompletedJob, PendingJob, StalledJob};

/// One row per queued job
#[derive(Debug, Tabled)]
pub struct PendingJobRow {
    #[tabled(rename = "MODE")]
    pub mode: String,
    #[tabled(rename = "JOB ID")]
    pub job_id: String,
    #[tabled(rename = "KIND")]
    pub kind: String,
    #[tabled(rename = "KEY")]
    pub key: String,
}

impl PendingJobRow {
    pub fn new(mode: AnalysisMode, job: &PendingJob) -> Self {
        Self {
            mode: mode.to_string(),
            job_id: job.job_id.clone(),
            kind: job.kind.to_string(),
            key: job.key.clone(),
        }
    }
}

/// One row per job finished while waiting
#[derive(Debug, Tabled)]
pub struct CompletedJobRow {
    #[tabled(rename = "KIND")]
    pub kind: String,
    #[tabled(rename = "KEY")]
    pub key: String,
}

impl From<&CompletedJob> for CompletedJobRow {
    fn from(job: &CompletedJob) -> Self {
        Self {
            kind: job.kind.to_string(),
            key: job.key.clone(),
        }
    }
}

/// One row per job that ended without success
#[derive(Debug, Tabled)]
pub struct FailedJobRow {
    #[tabled(rename = "JOB ID")]
    pub job_id: String,
    #[tabled(rename = "KIND")]
    pub kind: String,
    #[tabled(rename = "KEY")]
    pub key: String,
    #[tabled(rename = "STATUS")]
    pub status: String,
}

impl From<&StalledJob> for FailedJobRow {
    fn from(stalled: &StalledJob) -> Self {
        Self {
            job_id: stalled.job.job_id.clone(),
            kind: stalled.job.kind.to_string(),
            key: stalled.job.key.clone(),
            status: stalled.status.clone(),
        }
    }
}

/// Format rows as a table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No jobs.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}
