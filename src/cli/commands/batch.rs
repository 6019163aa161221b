//! Batch command implementation
//!
//! Looks up every HS code in an input file. Lookups run concurrently on the
//! blocking pool against one shared service; results come back as JSON
//! Lines in input order, with failed codes reported inline.

use super::shared::{CommandStats, create_progress_bar, load_config, open_service, write_output};
use crate::cli::args::BatchArgs;
use crate::config::DataPolicy;
use crate::error::{LookupError, Result};
use crate::lookup::LookupService;
use crate::models::{LookupRequest, LookupResponse};
use colored::*;
use futures::{StreamExt, stream};
use indicatif::ProgressBar;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use tracing::{debug, info, warn};

/// Outcome of one code in a batch
#[derive(Debug)]
pub struct BatchOutcome {
    pub hs_code: String,
    pub result: Result<LookupResponse>,
}

#[derive(Serialize)]
struct BatchLine<'a> {
    hs_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a LookupResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl BatchOutcome {
    /// One JSON Lines entry: the response, or the error message
    pub fn to_json_line(&self) -> Result<String> {
        let line = BatchLine {
            hs_code: &self.hs_code,
            result: self.result.as_ref().ok(),
            error: self.result.as_ref().err().map(ToString::to_string),
        };
        Ok(serde_json::to_string(&line)?)
    }
}

/// Batch command runner
pub async fn run_batch(args: BatchArgs) -> Result<CommandStats> {
    let start_time = Instant::now();
    debug!("Batch arguments: {:?}", args);

    args.validate()?;
    let codes = read_codes(&args.input)?;
    info!("Read {} HS codes from {}", codes.len(), args.input.display());

    let mut config = load_config(&args.common)?;
    if args.per_request {
        config = config.with_policy(DataPolicy::PerRequest);
    }
    let service = open_service(config, args.common.show_progress()).await?;
    debug!(
        "Running {} lookups with {} workers ({:?} policy)",
        codes.len(),
        args.workers,
        service.config().policy
    );

    let progress = create_progress_bar(codes.len() as u64, "codes", args.common.show_progress());
    let outcomes = lookup_all(service, codes, args.workers, &progress).await;
    progress.finish_and_clear();

    let mut lines = Vec::with_capacity(outcomes.len());
    let mut stats = CommandStats::default();
    for outcome in &outcomes {
        stats.codes_processed += 1;
        match &outcome.result {
            Ok(response) if response.is_not_found() => stats.codes_not_found += 1,
            Ok(_) => {}
            Err(error) => {
                warn!("Lookup failed for {}: {}", outcome.hs_code, error);
                stats.errors_encountered += 1;
            }
        }
        lines.push(outcome.to_json_line()?);
    }
    stats.rows_output = lines.len();

    write_output(&args.common, &lines.join("\n"))?;
    stats.processing_time = start_time.elapsed();

    if args.common.show_progress() {
        eprintln!(
            "{} {} codes, {} not found, {} failed in {:.2}s",
            "Batch complete:".bright_green().bold(),
            stats.codes_processed.to_string().bright_white(),
            stats.codes_not_found.to_string().bright_white(),
            if stats.errors_encountered > 0 {
                stats.errors_encountered.to_string().bright_red().bold()
            } else {
                stats.errors_encountered.to_string().bright_white()
            },
            stats.processing_time.as_secs_f64()
        );
    }

    Ok(stats)
}

/// HS codes from a file: one per line, blank lines and `#` comments skipped
pub fn read_codes(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Run every lookup with at most `workers` in flight, keeping input order
pub async fn lookup_all(
    service: Arc<LookupService>,
    codes: Vec<String>,
    workers: usize,
    progress: &ProgressBar,
) -> Vec<BatchOutcome> {
    stream::iter(codes)
        .map(|hs_code| {
            let service = Arc::clone(&service);
            async move {
                let request = LookupRequest::new(hs_code.clone());
                let result = task::spawn_blocking(move || service.lookup(&request))
                    .await
                    .unwrap_or_else(|e| {
                        Err(LookupError::task_failed(format!("Lookup task failed: {}", e)))
                    });
                BatchOutcome { hs_code, result }
            }
        })
        .buffered(workers.max(1))
        .inspect(|_| progress.inc(1))
        .collect()
        .await
}
