//! Pending analysis jobs
//!
//! A job enters a [`JobQueue`] when the service reports `IN_PROGRESS` and
//! leaves it once a later poll reports `SUCCESS`. Reconciliation walks a
//! snapshot and removes completed jobs by id, so the live queue is never
//! mutated while being iterated. Jobs that end in any other status stay
//! queued; a pass reports them as stalled.

use serde::Serialize;

use crate::client::models::{JobStatus, ReportKind};

/// Submitted analysis that has not completed yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingJob {
    /// What the original request was keyed by
    pub kind: ReportKind,
    /// Hash, file path or job id the caller supplied
    pub key: String,
    /// Server-assigned job id used for polling
    pub job_id: String,
}

/// A job that finished during reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedJob {
    pub kind: ReportKind,
    pub key: String,
}

impl From<PendingJob> for CompletedJob {
    fn from(job: PendingJob) -> Self {
        Self {
            kind: job.kind,
            key: job.key,
        }
    }
}

/// A queued job whose last poll was neither `IN_PROGRESS` nor `SUCCESS`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StalledJob {
    #[serde(flatten)]
    pub job: PendingJob,
    /// Reported `jobStatus`, or `"missing"` when the body had none
    pub status: String,
}

impl StalledJob {
    pub fn new(job: PendingJob, status: Option<JobStatus>) -> Self {
        let status = status.map_or_else(|| "missing".to_string(), |s| s.to_string());
        Self { job, status }
    }
}

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPoll {
    /// Jobs that reported `SUCCESS` and left the queue, in queue order
    pub completed: Vec<CompletedJob>,
    /// Jobs left queued with a terminal non-success status
    pub stalled: Vec<StalledJob>,
}

/// Ordered list of pending jobs, unique by job id
#[derive(Debug, Default, Clone)]
pub struct JobQueue {
    jobs: Vec<PendingJob>,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a job. Returns `false` if its job id is already queued.
    pub fn push(&mut self, job: PendingJob) -> bool {
        if self.contains(&job.job_id) {
            return false;
        }
        self.jobs.push(job);
        true
    }

    /// Copy of the current queue for iteration
    pub fn snapshot(&self) -> Vec<PendingJob> {
        self.jobs.clone()
    }

    /// Remove the job with `job_id`, returning it if present.
    pub fn complete(&mut self, job_id: &str) -> Option<PendingJob> {
        let idx = self.jobs.iter().position(|job| job.job_id == job_id)?;
        Some(self.jobs.remove(idx))
    }

    pub fn contains(&self, job_id: &str) -> bool {
        self.jobs.iter().any(|job| job.job_id == job_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingJob> {
        self.jobs.iter()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
