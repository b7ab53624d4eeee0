//! Stateful Intelix client: lookups, analysis submissions and job tracking

use std::path::Path;

use log::{debug, info, warn};
use reqwest::Url;
use serde_json::Value;

use super::models::{AnalysisMode, Credentials, JobStatus, Region, ReportKind, analysis};
use super::{ClientOptions, FileUpload, IntelixApi, IntelixHttp, Session};
use crate::cache::{ReportApi, ReportCache};
use crate::digest;
use crate::error::{ApiError, InputError, Result};
use crate::jobs::{CompletedJob, JobPoll, JobQueue, PendingJob, StalledJob};

/// Intelix client.
///
/// Every operation returns the full response body. Successful results are
/// recorded in [`reports`](Self::reports) when `save` is set; `IN_PROGRESS`
/// analyses are queued and advanced with [`check_jobs`](Self::check_jobs).
pub struct IntelixClient<A: IntelixApi = IntelixHttp> {
    api: A,
    session: Session,
    reports: ReportCache,
    static_jobs: JobQueue,
    dynamic_jobs: JobQueue,
}

impl IntelixClient<IntelixHttp> {
    /// Resolve options, build the HTTP transport and authenticate.
    pub async fn connect(options: ClientOptions) -> Result<Self> {
        let region: Region = options.region.parse()?;
        let credentials = Credentials::resolve(
            options.client_id.as_deref(),
            options.client_secret.as_deref(),
            options.token.as_deref(),
        )?;
        let api = IntelixHttp::for_region(region, options.api_host.as_deref(), options.timeout)?;
        Self::with_api(api, region, credentials).await
    }
}

impl<A: IntelixApi> IntelixClient<A> {
    /// Build a client over any transport.
    ///
    /// Client credentials are exchanged for a token immediately; a rejected
    /// exchange fails construction.
    pub async fn with_api(api: A, region: Region, credentials: Credentials) -> Result<Self> {
        let token = match credentials {
            Credentials::Token(token) => token,
            Credentials::ClientSecret {
                client_id,
                client_secret,
            } => {
                debug!("Exchanging client credentials for an access token");
                let token = api.request_token(&client_id, &client_secret).await?;
                info!("Authenticated against {}", api.base_url());
                token
            }
        };

        let session = Session::new(region, api.base_url(), token);
        Ok(Self {
            api,
            session,
            reports: ReportCache::new(),
            static_jobs: JobQueue::new(),
            dynamic_jobs: JobQueue::new(),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn reports(&self) -> &ReportCache {
        &self.reports
    }

    pub fn pending_jobs(&self, mode: AnalysisMode) -> &JobQueue {
        match mode {
            AnalysisMode::Static => &self.static_jobs,
            AnalysisMode::Dynamic => &self.dynamic_jobs,
        }
    }

    fn pending_jobs_mut(&mut self, mode: AnalysisMode) -> &mut JobQueue {
        match mode {
            AnalysisMode::Static => &mut self.static_jobs,
            AnalysisMode::Dynamic => &mut self.dynamic_jobs,
        }
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    /// Reputation of a file hash.
    pub async fn lookup_sha256(&mut self, sha256: &str, save: bool) -> Result<Value> {
        ensure_sha256(sha256)?;
        self.lookup(lookup_file_path(sha256), ReportKind::Sha256, sha256, save)
            .await
    }

    /// Reputation of an absolute URL.
    pub async fn lookup_url(&mut self, url: &str, save: bool) -> Result<Value> {
        if !is_absolute_url(url) {
            return Err(InputError::InvalidUrl(url.to_string()).into());
        }
        let path = format!("/lookup/urls/v1/{}", urlencoding::encode(url));
        self.lookup(path, ReportKind::Url, url, save).await
    }

    /// Reputation of a local file, looked up by its SHA-256 and cached under
    /// the path.
    pub async fn lookup_file(&mut self, path: impl AsRef<Path>, save: bool) -> Result<Value> {
        let path = path.as_ref();
        let sha256 = digest::sha256_file(path)
            .await
            .map_err(|source| unreadable(path, source))?;
        debug!("{} hashes to {}", path.display(), sha256);

        let key = path_key(path);
        self.lookup(lookup_file_path(&sha256), ReportKind::File, &key, save)
            .await
    }

    async fn lookup(
        &mut self,
        path: String,
        kind: ReportKind,
        key: &str,
        save: bool,
    ) -> Result<Value> {
        let body = self.api.get(self.session.token(), &path, &[]).await?;
        if save && analysis::is_lookup_success(&body) {
            self.reports.insert(ReportApi::Lookup, kind, key, body.clone());
        }
        Ok(body)
    }

    // ------------------------------------------------------------------
    // Analysis
    // ------------------------------------------------------------------

    /// Existing analysis reports for a known hash.
    pub async fn analyze_sha256(
        &mut self,
        mode: AnalysisMode,
        sha256: &str,
        save: bool,
    ) -> Result<Value> {
        ensure_sha256(sha256)?;
        let body = self
            .api
            .get(self.session.token(), &mode.reports_path(), &[("sha256", sha256)])
            .await?;
        self.track(mode, ReportKind::Sha256, sha256, &body, save)?;
        Ok(body)
    }

    /// Upload a file for analysis.
    pub async fn analyze_file(
        &mut self,
        mode: AnalysisMode,
        path: impl AsRef<Path>,
        save: bool,
    ) -> Result<Value> {
        let path = path.as_ref();
        let upload = FileUpload::read(path)
            .await
            .map_err(|source| unreadable(path, source))?;
        let body = self
            .api
            .upload(self.session.token(), &mode.submit_path(), upload)
            .await?;
        self.track(mode, ReportKind::File, &path_key(path), &body, save)?;
        Ok(body)
    }

    /// Poll a single analysis job.
    pub async fn analyze_job(
        &mut self,
        mode: AnalysisMode,
        job_id: &str,
        save: bool,
    ) -> Result<Value> {
        if job_id.trim().is_empty() {
            return Err(InputError::InvalidJobId.into());
        }
        let body = self
            .api
            .get(self.session.token(), &mode.job_path(job_id), &[])
            .await?;
        self.track(mode, ReportKind::Job, job_id, &body, save)?;
        Ok(body)
    }

    pub async fn static_sha256(&mut self, sha256: &str, save: bool) -> Result<Value> {
        self.analyze_sha256(AnalysisMode::Static, sha256, save).await
    }

    pub async fn static_file(&mut self, path: impl AsRef<Path>, save: bool) -> Result<Value> {
        self.analyze_file(AnalysisMode::Static, path, save).await
    }

    pub async fn static_job(&mut self, job_id: &str, save: bool) -> Result<Value> {
        self.analyze_job(AnalysisMode::Static, job_id, save).await
    }

    pub async fn dynamic_sha256(&mut self, sha256: &str, save: bool) -> Result<Value> {
        self.analyze_sha256(AnalysisMode::Dynamic, sha256, save).await
    }

    pub async fn dynamic_file(&mut self, path: impl AsRef<Path>, save: bool) -> Result<Value> {
        self.analyze_file(AnalysisMode::Dynamic, path, save).await
    }

    pub async fn dynamic_job(&mut self, job_id: &str, save: bool) -> Result<Value> {
        self.analyze_job(AnalysisMode::Dynamic, job_id, save).await
    }

    /// Queue in-progress jobs and cache successful reports.
    fn track(
        &mut self,
        mode: AnalysisMode,
        kind: ReportKind,
        key: &str,
        body: &Value,
        save: bool,
    ) -> Result<()> {
        match JobStatus::of(body) {
            Some(JobStatus::InProgress) => {
                let job_id = analysis::job_id(body).ok_or_else(|| {
                    ApiError::InvalidResponse("IN_PROGRESS response without jobId".to_string())
                })?;
                let queued = self.pending_jobs_mut(mode).push(PendingJob {
                    kind,
                    key: key.to_string(),
                    job_id: job_id.to_string(),
                });
                if queued {
                    info!("{} job {} queued for {} {}", mode, job_id, kind, key);
                } else {
                    debug!("{} job {} already queued", mode, job_id);
                }
            }
            Some(JobStatus::Success) if save => self.record_report(mode, kind, key, body),
            Some(status) => debug!("{} {} {} returned {}", mode, kind, key, status),
            None => debug!("{} {} {} returned no job status", mode, kind, key),
        }
        Ok(())
    }

    fn record_report(&mut self, mode: AnalysisMode, kind: ReportKind, key: &str, body: &Value) {
        match analysis::report(body) {
            Some(report) => self.reports.insert(mode.into(), kind, key, report.clone()),
            None => warn!("{} {} {} succeeded without a report", mode, kind, key),
        }
    }

    // ------------------------------------------------------------------
    // Reconciliation
    // ------------------------------------------------------------------

    /// Re-poll every pending job of `mode` once.
    ///
    /// Jobs reporting `SUCCESS` are cached under their original key, leave
    /// the queue, and are returned in queue order. Everything else stays
    /// queued. On a transport error, jobs completed earlier in the pass stay
    /// completed.
    pub async fn check_jobs(&mut self, mode: AnalysisMode) -> Result<Vec<CompletedJob>> {
        Ok(self.poll_jobs(mode).await?.completed)
    }

    /// Like [`check_jobs`](Self::check_jobs), but also reports queued jobs
    /// whose status is final without being `SUCCESS`.
    pub async fn poll_jobs(&mut self, mode: AnalysisMode) -> Result<JobPoll> {
        let snapshot = self.pending_jobs(mode).snapshot();
        let mut poll = JobPoll::default();

        for job in snapshot {
            let body = self
                .api
                .get(self.session.token(), &mode.job_path(&job.job_id), &[])
                .await?;

            match JobStatus::of(&body) {
                Some(JobStatus::Success) => {
                    self.record_report(mode, job.kind, &job.key, &body);
                    self.pending_jobs_mut(mode).complete(&job.job_id);
                    info!("{} job {} complete for {} {}", mode, job.job_id, job.kind, job.key);
                    poll.completed.push(CompletedJob::from(job));
                }
                Some(JobStatus::InProgress) => {}
                status => {
                    let stalled = StalledJob::new(job, status);
                    warn!(
                        "{} job {} ended with status {}",
                        mode, stalled.job.job_id, stalled.status
                    );
                    poll.stalled.push(stalled);
                }
            }
        }

        Ok(poll)
    }

    pub async fn check_static_jobs(&mut self) -> Result<Vec<CompletedJob>> {
        self.check_jobs(AnalysisMode::Static).await
    }

    pub async fn check_dynamic_jobs(&mut self) -> Result<Vec<CompletedJob>> {
        self.check_jobs(AnalysisMode::Dynamic).await
    }
}

fn ensure_sha256(sha256: &str) -> Result<()> {
    if digest::is_sha256(sha256) {
        Ok(())
    } else {
        Err(InputError::InvalidSha256(sha256.to_string()).into())
    }
}

fn is_absolute_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| !url.scheme().is_empty() && url.host_str().is_some_and(|h| !h.is_empty()))
        .unwrap_or(false)
}

fn lookup_file_path(sha256: &str) -> String {
    format!("/lookup/files/v1/{}", sha256)
}

fn path_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn unreadable(path: &Path, source: std::io::Error) -> InputError {
    warn!("Unable to open file {}: {}", path.display(), source);
    InputError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    }
}
