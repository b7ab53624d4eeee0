//! Output formatting for CLI results

use colored::Colorize;
use serde_json::Value;

use crate::cli::OutputFormat;
use intelix::{AnalysisMode, CompletedJob, JobStatus, PendingJob, Result, StalledJob};

pub mod json;
pub mod table;

use table::{CompletedJobRow, FailedJobRow, PendingJobRow, format_table};

/// Print a lookup response body
pub fn print_lookup(body: &Value, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", json::format_json(body, None)?),
        OutputFormat::Pretty => {
            if intelix::client::models::analysis::is_lookup_success(body) {
                println!("{} Lookup succeeded", "✓".green());
            } else {
                println!("{} Lookup returned no request id", "⚠".yellow());
            }
            println!("{}", serde_json::to_string_pretty(body)?);
        }
    }
    Ok(())
}

/// Print an analysis response together with the jobs still queued
pub fn print_analysis(
    mode: AnalysisMode,
    body: &Value,
    pending: &[PendingJob],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", json::format_json(body, Some(pending))?),
        OutputFormat::Pretty => {
            match JobStatus::of(body) {
                Some(JobStatus::Success) => {
                    println!("{} {} analysis complete", "✓".green(), mode)
                }
                Some(JobStatus::InProgress) => {
                    println!("{} {} analysis in progress", "…".cyan(), mode)
                }
                Some(other) => println!("{} {} analysis status: {}", "⚠".yellow(), mode, other),
                None => println!("{} {} response has no job status", "○".dimmed(), mode),
            }
            println!("{}", serde_json::to_string_pretty(body)?);

            if !pending.is_empty() {
                let rows: Vec<PendingJobRow> = pending
                    .iter()
                    .map(|job| PendingJobRow::new(mode, job))
                    .collect();
                println!("\n{}", "Pending jobs".bold());
                println!("{}", format_table(&rows));
            }
        }
    }
    Ok(())
}

/// Print the reports gathered while waiting for jobs, and any jobs that
/// ended without success
pub fn print_completed(
    completed: &[(CompletedJob, Option<Value>)],
    stalled: &[StalledJob],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let reports: Vec<Value> = completed
                .iter()
                .map(|(job, report)| {
                    serde_json::json!({
                        "kind": job.kind,
                        "key": job.key,
                        "report": report,
                    })
                })
                .collect();
            let data = serde_json::json!({
                "completed": reports,
                "failed": stalled,
            });
            println!("{}", json::format_json(&data, None)?);
        }
        OutputFormat::Pretty => {
            let rows: Vec<CompletedJobRow> =
                completed.iter().map(|(job, _)| job.into()).collect();
            println!("\n{}", "Completed jobs".bold());
            println!("{}", format_table(&rows));

            for (job, report) in completed {
                println!("\n{} {}", job.kind.to_string().cyan(), job.key.bold());
                match report {
                    Some(report) => println!("{}", serde_json::to_string_pretty(report)?),
                    None => println!("{}", "(no report cached)".dimmed()),
                }
            }

            if !stalled.is_empty() {
                let rows: Vec<FailedJobRow> = stalled.iter().map(FailedJobRow::from).collect();
                println!("\n{}", "Failed jobs".bold().red());
                println!("{}", format_table(&rows));
            }
        }
    }
    Ok(())
}
