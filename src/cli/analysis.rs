//! Static and dynamic analysis commands

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use serde_json::Value;

use crate::cli::{AnalysisCommands, CommandContext, GlobalOptions, OutputFormat, WaitArgs};
use crate::output;
use intelix::error::{Error, Result};
use intelix::{AnalysisMode, CompletedJob, IntelixApi, IntelixClient, StalledJob};

/// Submit or fetch an analysis, optionally waiting for queued jobs
pub async fn run(mode: AnalysisMode, cmd: AnalysisCommands, opts: &GlobalOptions) -> Result<()> {
    let mut ctx = CommandContext::new(opts).await?;
    debug!(
        "Using region {} at {}",
        ctx.config.region,
        ctx.client.session().base_url()
    );

    let (body, wait) = match cmd {
        AnalysisCommands::Sha256 { hash, wait } => {
            (ctx.client.analyze_sha256(mode, &hash, true).await?, wait)
        }
        AnalysisCommands::File { path, wait } => {
            (ctx.client.analyze_file(mode, &path, true).await?, wait)
        }
        AnalysisCommands::Job { job_id, wait } => {
            (ctx.client.analyze_job(mode, &job_id, true).await?, wait)
        }
    };

    let pending = ctx.client.pending_jobs(mode).snapshot();
    let waiting = wait.wait && !pending.is_empty();

    // A single JSON document is printed when waiting
    if !(waiting && ctx.format == OutputFormat::Json) {
        output::print_analysis(mode, &body, &pending, ctx.format)?;
    }

    if waiting {
        let outcome = wait_for_jobs(&mut ctx.client, mode, &wait).await?;
        let reports: Vec<(CompletedJob, Option<Value>)> = outcome
            .completed
            .into_iter()
            .map(|job| {
                let report = ctx
                    .client
                    .reports()
                    .get(mode.into(), job.kind, &job.key)
                    .map(|cached| cached.body.clone());
                (job, report)
            })
            .collect();
        output::print_completed(&reports, &outcome.stalled, ctx.format)?;

        if !outcome.stalled.is_empty() {
            return Err(Error::Other(format!(
                "{} {} job(s) ended without success",
                outcome.stalled.len(),
                mode
            )));
        }
    }

    Ok(())
}

/// Jobs resolved while waiting
#[derive(Debug, Default)]
struct WaitOutcome {
    completed: Vec<CompletedJob>,
    /// Still queued, but their last status was final
    stalled: Vec<StalledJob>,
}

/// Poll the mode's queue until it drains or every remaining job has
/// reached a final status other than `SUCCESS`
async fn wait_for_jobs<A: IntelixApi>(
    client: &mut IntelixClient<A>,
    mode: AnalysisMode,
    wait: &WaitArgs,
) -> Result<WaitOutcome> {
    let interval = Duration::from_secs(wait.interval);
    let spinner = new_spinner(&progress_message(mode, client.pending_jobs(mode).len()));
    let mut outcome = WaitOutcome::default();

    while !client.pending_jobs(mode).is_empty() {
        tokio::time::sleep(interval).await;

        let poll = match client.poll_jobs(mode).await {
            Ok(poll) => poll,
            Err(err) => {
                spinner.finish_and_clear();
                return Err(err);
            }
        };
        for job in &poll.completed {
            info!("{} job for {} {} finished", mode, job.kind, job.key);
        }
        outcome.completed.extend(poll.completed);

        let remaining = client.pending_jobs(mode).len();
        if remaining > 0 && poll.stalled.len() == remaining {
            outcome.stalled = poll.stalled;
            break;
        }

        debug!("{} {} job(s) still pending", remaining, mode);
        spinner.set_message(progress_message(mode, remaining));
    }

    let summary = if outcome.stalled.is_empty() {
        format!("{} {} job(s) finished", "✓".green(), outcome.completed.len())
    } else {
        format!(
            "{} {} job(s) finished, {} failed",
            "✗".red(),
            outcome.completed.len(),
            outcome.stalled.len()
        )
    };
    spinner.finish_with_message(summary);
    Ok(outcome)
}

fn progress_message(mode: AnalysisMode, remaining: usize) -> String {
    format!("Waiting for {} {} analysis job(s)...", remaining, mode)
}

fn new_spinner(msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use intelix::Credentials;
    use intelix::client::{AccessToken, Region};
    use serde_json::json;

    #[test]
    fn test_progress_message() {
        assert_eq!(
            progress_message(AnalysisMode::Static, 2),
            "Waiting for 2 static analysis job(s)..."
        );
    }

    // The library mock is test-only, so the wait loop runs against this stub.
    // The last scripted body repeats.
    struct Stub {
        bodies: std::sync::Mutex<std::collections::VecDeque<Value>>,
    }

    #[async_trait::async_trait]
    impl IntelixApi for Stub {
        fn base_url(&self) -> &str {
            "stub://intelix"
        }

        async fn request_token(&self, _: &str, _: &str) -> Result<AccessToken> {
            Ok(AccessToken::new("stub").unwrap())
        }

        async fn get(&self, _: &AccessToken, _: &str, _: &[(&str, &str)]) -> Result<Value> {
            let mut bodies = self.bodies.lock().unwrap();
            let body = if bodies.len() > 1 {
                bodies.pop_front()
            } else {
                bodies.front().cloned()
            };
            Ok(body.unwrap_or_else(|| json!({})))
        }

        async fn upload(
            &self,
            _: &AccessToken,
            _: &str,
            _: intelix::client::FileUpload,
        ) -> Result<Value> {
            unreachable!("no uploads in these tests")
        }
    }

    #[tokio::test]
    async fn test_wait_for_jobs_drains_queue() {
        let bodies = vec![
            json!({"jobStatus": "IN_PROGRESS", "jobId": "j-1"}),
            json!({"jobStatus": "IN_PROGRESS", "jobId": "j-1"}),
            json!({"jobStatus": "SUCCESS", "jobId": "j-1", "report": {"score": 7}}),
        ];
        let stub = Stub {
            bodies: std::sync::Mutex::new(bodies.into()),
        };
        let credentials = Credentials::Token(AccessToken::new("stub").unwrap());
        let mut client = IntelixClient::with_api(stub, Region::De, credentials)
            .await
            .unwrap();

        client
            .analyze_job(AnalysisMode::Dynamic, "j-1", true)
            .await
            .unwrap();
        assert_eq!(client.pending_jobs(AnalysisMode::Dynamic).len(), 1);

        let wait = WaitArgs {
            wait: true,
            interval: 1,
        };
        let outcome = wait_for_jobs(&mut client, AnalysisMode::Dynamic, &wait)
            .await
            .unwrap();

        assert_eq!(outcome.completed.len(), 1);
        assert_eq!(outcome.completed[0].key, "j-1");
        assert!(outcome.stalled.is_empty());
        assert!(client.pending_jobs(AnalysisMode::Dynamic).is_empty());
        let cached = client
            .reports()
            .get(AnalysisMode::Dynamic.into(), intelix::ReportKind::Job, "j-1")
            .unwrap();
        assert_eq!(cached.body, json!({"score": 7}));
    }

    #[tokio::test]
    async fn test_wait_for_jobs_stops_on_failed_job() {
        let bodies = vec![
            json!({"jobStatus": "IN_PROGRESS", "jobId": "j-1"}),
            json!({"jobStatus": "FAILED", "jobId": "j-1"}),
        ];
        let stub = Stub {
            bodies: std::sync::Mutex::new(bodies.into()),
        };
        let credentials = Credentials::Token(AccessToken::new("stub").unwrap());
        let mut client = IntelixClient::with_api(stub, Region::De, credentials)
            .await
            .unwrap();
        client
            .analyze_job(AnalysisMode::Static, "j-1", true)
            .await
            .unwrap();

        let wait = WaitArgs {
            wait: true,
            interval: 1,
        };
        let outcome = tokio::time::timeout(
            Duration::from_secs(10),
            wait_for_jobs(&mut client, AnalysisMode::Static, &wait),
        )
        .await
        .expect("wait loop should end once every job has failed")
        .unwrap();

        assert!(outcome.completed.is_empty());
        assert_eq!(outcome.stalled.len(), 1);
        assert_eq!(outcome.stalled[0].job.job_id, "j-1");
        assert_eq!(outcome.stalled[0].status, "FAILED");
        assert_eq!(client.pending_jobs(AnalysisMode::Static).len(), 1);
    }
}
