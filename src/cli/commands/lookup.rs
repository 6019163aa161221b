//! Lookup command implementation
//!
//! Resolves a single HS code and prints the response document.

use super::shared::{
    CommandStats, load_config, open_service, render_records, single_line, to_json, write_output,
};
use crate::cli::args::{LookupArgs, OutputFormat};
use crate::error::{LookupError, Result};
use crate::lookup::chapter_key;
use crate::models::{LookupRequest, LookupResponse};
use colored::*;
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use tracing::{debug, info};

/// Lookup command runner
pub async fn run_lookup(args: LookupArgs) -> Result<CommandStats> {
    let start_time = Instant::now();
    debug!("Lookup arguments: {:?}", args);

    args.validate()?;
    let config = load_config(&args.common)?;
    let service = open_service(config, args.common.show_progress()).await?;

    let request = LookupRequest::new(args.hs_code.trim())
        .with_name(args.name.clone())
        .with_description(args.description.clone());

    let response = task::spawn_blocking({
        let service = Arc::clone(&service);
        let request = request.clone();
        move || service.lookup(&request)
    })
    .await
    .map_err(|e| LookupError::task_failed(format!("Lookup task failed: {}", e)))??;

    let output = match args.common.format {
        OutputFormat::Human => render_response(&request.hs_code, &response),
        OutputFormat::Json => to_json(&response)?,
    };
    write_output(&args.common, &output)?;

    let stats = CommandStats {
        codes_processed: 1,
        codes_not_found: usize::from(response.is_not_found()),
        errors_encountered: 0,
        rows_output: response.pga_hts.len(),
        processing_time: start_time.elapsed(),
    };

    info!(
        "Lookup for {} completed in {:.2}s",
        request.hs_code,
        stats.processing_time.as_secs_f64()
    );
    Ok(stats)
}

/// Human-readable rendering of a response document
pub fn render_response(hs_code: &str, response: &LookupResponse) -> String {
    let mut output = format!(
        "{} {} {}\n\n",
        "HS code".bright_green().bold(),
        hs_code.bright_white().bold(),
        format!("(chapter {})", chapter_key(hs_code)).dimmed()
    );

    if response.is_not_found() {
        output.push_str(&format!(
            "{}\n\n",
            "No PGA requirements recorded for this code".yellow()
        ));
    }

    output.push_str(&render_records("HS chapter", &response.hs_chapters));
    output.push('\n');
    output.push_str(&render_records("HTS / PGA rows", &response.pga_hts));
    output.push('\n');

    output.push_str(&format!(
        "{} ({})\n",
        "PGA requirements".bright_green().bold(),
        response.pga_sections.len().to_string().bright_white()
    ));
    for (section, values) in response.pga_sections.iter() {
        output.push_str(&format!("  {}\n", single_line(section).cyan()));
        for value in values {
            output.push_str(&format!("    - {}\n", value));
        }
    }
    output.push('\n');

    output.push_str(&render_records("HS rules", &response.hs_rules));
    output.push('\n');
    output.push_str(&format!("{}", response.disclaimer.dimmed()));
    output
}
