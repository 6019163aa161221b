//! Shared components for CLI commands
//!
//! Logging setup, configuration loading, progress spinners and the
//! rendering/output helpers used by every subcommand.

use crate::cli::args::{CommonArgs, OutputFormat};
use crate::config::LookupConfig;
use crate::error::{LookupError, Result};
use crate::lookup::LookupService;
use crate::models::Record;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task;
use tracing::{debug, info};

/// Run statistics reported by every command
#[derive(Debug, Clone, Default)]
pub struct CommandStats {
    /// Number of HS codes looked up
    pub codes_processed: usize,
    /// Codes with no HTS/PGA rows
    pub codes_not_found: usize,
    /// Number of failed lookups
    pub errors_encountered: usize,
    /// Records or lines written to the output
    pub rows_output: usize,
    /// Total command time
    pub processing_time: Duration,
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pga_lookup={}", log_level)));

    let initialized = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    // A subscriber may already be installed when commands run in-process
    if initialized.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
    Ok(())
}

/// Resolve the lookup configuration (defaults, environment, then CLI) and validate it
pub fn load_config(args: &CommonArgs) -> Result<LookupConfig> {
    args.validate()?;

    let config = LookupConfig::load_layered(args.data_dir.clone());
    config.validate()?;

    info!("Using reference data from {}", config.data_dir.display());
    Ok(config)
}

/// Load reference data on the blocking pool behind a spinner
pub async fn open_service(config: LookupConfig, show_progress: bool) -> Result<Arc<LookupService>> {
    let spinner = create_spinner("Loading reference data...", show_progress);
    let start_time = Instant::now();

    let service = task::spawn_blocking(move || LookupService::new(config))
        .await
        .map_err(|e| LookupError::task_failed(format!("Failed to load reference data: {}", e)))?;

    spinner.finish_and_clear();
    let service = service?;

    debug!(
        "Reference data ready in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(Arc::new(service))
}

/// Create a spinner for indeterminate operations; hidden in quiet mode
pub fn create_spinner(message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Create a progress bar with the standard styling; hidden in quiet mode
pub fn create_progress_bar(total: u64, message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

/// Render a value as pretty JSON
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write command output to the output file, or stdout
pub fn write_output(args: &CommonArgs, output: &str) -> Result<()> {
    match &args.output_file {
        Some(path) => {
            std::fs::write(path, output).map_err(|e| {
                LookupError::configuration(format!(
                    "Failed to write output to {}: {}",
                    path.display(),
                    e
                ))
            })?;
            info!("Output written to: {}", path.display());
        }
        None => {
            println!("{}", output);
        }
    }
    Ok(())
}

/// Disable colors when the output is going to a file or is JSON
pub fn configure_colors(args: &CommonArgs) {
    if args.output_file.is_some() || args.format == OutputFormat::Json {
        colored::control::set_override(false);
    }
}

/// Render records as numbered `column: value` blocks, skipping null cells
pub fn render_records(title: &str, records: &[Record]) -> String {
    let mut output = format!(
        "{} ({})\n",
        title.bright_green().bold(),
        records.len().to_string().bright_white()
    );

    if records.is_empty() {
        output.push_str(&format!("  {}\n", "none".dimmed()));
        return output;
    }

    for (idx, record) in records.iter().enumerate() {
        output.push_str(&format!("  {}\n", format!("[{}]", idx + 1).bright_cyan()));
        for (column, value) in record {
            if let Value::String(text) = value {
                output.push_str(&format!(
                    "    {} {}\n",
                    format!("{}:", single_line(column)).cyan(),
                    text
                ));
            }
        }
    }
    output
}

/// Collapse embedded line breaks in a header for one-line display
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
