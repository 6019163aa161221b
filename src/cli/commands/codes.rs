//! Options and codes command implementations
//!
//! Catalogue views of the PGA code table that do not depend on an HS code.

use super::shared::{
    CommandStats, load_config, open_service, render_records, to_json, write_output,
};
use crate::cli::args::{CodesArgs, OptionsArgs, OutputFormat};
use crate::codes::{filter_codes, pga_options};
use crate::error::Result;
use crate::models::{CodeFilter, PgaOptions};
use colored::*;
use std::time::Instant;
use tracing::info;

/// Options command runner
pub async fn run_options(args: OptionsArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    let config = load_config(&args.common)?;
    let service = open_service(config, args.common.show_progress()).await?;
    let data = service.reference()?;
    let options = pga_options(&data)?;

    let output = match args.common.format {
        OutputFormat::Human => render_options(&options),
        OutputFormat::Json => to_json(&options)?,
    };
    write_output(&args.common, &output)?;

    Ok(CommandStats {
        rows_output: options.agency_code.len() + options.code.len() + options.program_code.len(),
        processing_time: start_time.elapsed(),
        ..Default::default()
    })
}

/// Codes command runner
pub async fn run_codes(args: CodesArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    let filter = CodeFilter {
        agency: args.agency.clone(),
        code: args.code.clone(),
        program: args.program.clone(),
    };

    let config = load_config(&args.common)?;
    let service = open_service(config, args.common.show_progress()).await?;
    let data = service.reference()?;
    let records = filter_codes(&data, &filter)?;
    info!("{} PGA codes match {:?}", records.len(), filter);

    let output = match args.common.format {
        OutputFormat::Human => render_records("PGA codes", &records),
        OutputFormat::Json => to_json(&records)?,
    };
    write_output(&args.common, &output)?;

    Ok(CommandStats {
        rows_output: records.len(),
        processing_time: start_time.elapsed(),
        ..Default::default()
    })
}

/// Human-readable option lists
pub fn render_options(options: &PgaOptions) -> String {
    [
        ("Agency codes", &options.agency_code),
        ("Codes", &options.code),
        ("Program codes", &options.program_code),
    ]
    .iter()
    .map(|(title, values)| {
        format!(
            "{} ({})\n  {}\n",
            title.bright_green().bold(),
            values.len().to_string().bright_white(),
            values.join(", ")
        )
    })
    .collect::<Vec<_>>()
    .join("\n")
}
