//! Tables command implementation
//!
//! Lists the spreadsheets in the data directory and reports which logical
//! reference file each one resolves to.

use super::shared::{CommandStats, load_config, to_json, write_output};
use crate::cli::args::{OutputFormat, TablesArgs};
use crate::config::LookupConfig;
use crate::constants::SPREADSHEET_EXTENSIONS;
use crate::error::{LookupError, Result};
use colored::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

/// Resolution of one logical reference file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableStatus {
    pub name: String,
    pub required: bool,
    pub path: Option<PathBuf>,
}

/// Data directory report
#[derive(Debug, Clone, Serialize)]
pub struct TablesReport {
    pub data_dir: PathBuf,
    pub tables: Vec<TableStatus>,
    pub files: Vec<PathBuf>,
}

/// Tables command runner
pub async fn run_tables(args: TablesArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    let config = load_config(&args.common)?;
    let report = build_report(&config)?;

    let output = match args.common.format {
        OutputFormat::Human => render_report(&report),
        OutputFormat::Json => to_json(&report)?,
    };
    write_output(&args.common, &output)?;

    Ok(CommandStats {
        rows_output: report.files.len(),
        processing_time: start_time.elapsed(),
        ..Default::default()
    })
}

/// Resolve every logical reference file and list the directory's spreadsheets
pub fn build_report(config: &LookupConfig) -> Result<TablesReport> {
    let tables = [
        (&config.files.chapters, true),
        (&config.files.pga_hts, true),
        (&config.files.pga_codes, true),
        (&config.files.hs_rules, false),
    ]
    .into_iter()
    .map(|(name, required)| TableStatus {
        name: name.clone(),
        required,
        path: config.resolve(name),
    })
    .collect();

    Ok(TablesReport {
        data_dir: config.data_dir.clone(),
        tables,
        files: list_spreadsheets(&config.data_dir)?,
    })
}

/// Spreadsheet files directly under `dir`, sorted by path
pub fn list_spreadsheets(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for extension in SPREADSHEET_EXTENSIONS {
        let pattern = dir
            .join(format!("*.{}", extension))
            .to_string_lossy()
            .replace('[', "[[]");
        let entries = glob::glob(&pattern).map_err(|e| {
            LookupError::configuration(format!("Invalid glob pattern '{}': {}", pattern, e))
        })?;
        files.extend(entries.filter_map(|entry| entry.ok()));
    }

    files.sort();
    debug!("Found {} spreadsheets in {}", files.len(), dir.display());
    Ok(files)
}

fn render_report(report: &TablesReport) -> String {
    let mut output = format!(
        "{} {}\n\n",
        "Data directory:".bright_green().bold(),
        report.data_dir.display()
    );

    for table in &report.tables {
        let status = match (&table.path, table.required) {
            (Some(path), _) => path.display().to_string().bright_white(),
            (None, true) => "missing".bright_red().bold(),
            (None, false) => "missing (optional)".yellow(),
        };
        output.push_str(&format!("  {:<20} {}\n", table.name.cyan(), status));
    }

    output.push_str(&format!(
        "\n{} ({})\n",
        "Spreadsheets".bright_green().bold(),
        report.files.len()
    ));
    for file in &report.files {
        let size = std::fs::metadata(file).map(|m| m.len()).unwrap_or(0);
        output.push_str(&format!("  {} ({} bytes)\n", file.display(), size));
    }
    output
}
