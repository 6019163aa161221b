//! Command-line argument definitions for the PGA lookup tool
//!
//! This module defines the CLI interface using the clap derive API.

use crate::constants::{DATA_DIR_ENV, DEFAULT_BATCH_WORKERS};
use crate::error::{LookupError, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// CLI arguments for the PGA lookup tool
///
/// Resolves HTS tariff codes to the Partner Government Agency requirements
/// recorded in a directory of reference spreadsheets.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pga-lookup",
    version,
    about = "Resolve HTS tariff codes to U.S. Partner Government Agency requirements",
    long_about = "Looks up an HTS code in the ACE agency tariff reference tables and reports \
                  the HS chapter description, the matching HTS/PGA rows, the distinct PGA \
                  compliance requirements and any chapter rules. Reference data is read from \
                  a directory of spreadsheets (HS_Chapters_lookup, PGA_HTS, PGA_codes and the \
                  optional hs_codes rules workbook)."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Look up a single HS code
    Lookup(LookupArgs),
    /// Look up every HS code listed in a file, emitting JSON Lines
    Batch(BatchArgs),
    /// List the distinct agency, code and program values of the PGA code table
    Options(OptionsArgs),
    /// List PGA code rows, optionally filtered by agency, code or program
    Codes(CodesArgs),
    /// Show which reference files resolve in the data directory
    Tables(TablesArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CommonArgs {
    /// Directory holding the reference spreadsheets
    ///
    /// Overrides the PGA_LOOKUP_DATA_DIR environment variable and the
    /// default user data directory.
    #[arg(
        short = 'd',
        long = "data-dir",
        value_name = "PATH",
        help = "Directory holding the reference spreadsheets"
    )]
    pub data_dir: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and hides progress spinners.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub format: OutputFormat,

    /// Output file for results
    ///
    /// If not specified, outputs to stdout
    #[arg(
        short = 'o',
        long = "output-file",
        value_name = "FILE",
        help = "Write results to a file instead of stdout"
    )]
    pub output_file: Option<PathBuf>,
}

/// Arguments for the lookup command
#[derive(Debug, Clone, Parser)]
pub struct LookupArgs {
    /// HS/HTS code to look up, e.g. 0101210010
    #[arg(value_name = "HS_CODE")]
    pub hs_code: String,

    /// Product name, recorded with the request
    #[arg(long = "name", value_name = "TEXT")]
    pub name: Option<String>,

    /// Product description, recorded with the request
    #[arg(long = "description", value_name = "TEXT")]
    pub description: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the batch command
#[derive(Debug, Clone, Parser)]
pub struct BatchArgs {
    /// File with one HS code per line
    ///
    /// Blank lines and lines starting with '#' are skipped.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Number of concurrent lookups
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        default_value_t = DEFAULT_BATCH_WORKERS,
        help = "Number of concurrent lookups"
    )]
    pub workers: usize,

    /// Re-read the reference files for every code instead of sharing one snapshot
    #[arg(long = "per-request")]
    pub per_request: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the options command
#[derive(Debug, Clone, Parser)]
pub struct OptionsArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the codes command
#[derive(Debug, Clone, Parser)]
pub struct CodesArgs {
    /// Agency code filter (case-insensitive)
    #[arg(long = "agency", value_name = "CODE")]
    pub agency: Option<String>,

    /// PGA flag code filter (case-insensitive)
    #[arg(long = "code", value_name = "CODE")]
    pub code: Option<String>,

    /// Program code filter (case-insensitive)
    #[arg(long = "program", value_name = "CODE")]
    pub program: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the tables command
#[derive(Debug, Clone, Parser)]
pub struct TablesArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON format for scripting
    Json,
}

impl Commands {
    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Lookup(_) => "lookup",
            Commands::Batch(_) => "batch",
            Commands::Options(_) => "options",
            Commands::Codes(_) => "codes",
            Commands::Tables(_) => "tables",
        }
    }

    /// Options shared by the selected subcommand
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Lookup(args) => &args.common,
            Commands::Batch(args) => &args.common,
            Commands::Options(args) => &args.common,
            Commands::Codes(args) => &args.common,
            Commands::Tables(args) => &args.common,
        }
    }
}

impl CommonArgs {
    /// Validate paths given on the command line
    pub fn validate(&self) -> Result<()> {
        if let Some(data_dir) = &self.data_dir {
            if !data_dir.is_dir() {
                return Err(LookupError::configuration(format!(
                    "Data directory does not exist: {} (set --data-dir or {})",
                    data_dir.display(),
                    DATA_DIR_ENV
                )));
            }
        }

        if let Some(parent) = self.output_file.as_deref().and_then(Path::parent) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(LookupError::configuration(format!(
                    "Output file directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress spinners (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl LookupArgs {
    pub fn validate(&self) -> Result<()> {
        if self.hs_code.trim().is_empty() {
            return Err(LookupError::configuration("HS code cannot be empty"));
        }
        self.common.validate()
    }
}

impl BatchArgs {
    pub fn validate(&self) -> Result<()> {
        if !self.input.is_file() {
            return Err(LookupError::configuration(format!(
                "Input file does not exist: {}",
                self.input.display()
            )));
        }

        if self.workers == 0 {
            return Err(LookupError::configuration(
                "Number of workers must be greater than 0",
            ));
        }

        if self.workers > 64 {
            return Err(LookupError::configuration(
                "Number of workers cannot exceed 64",
            ));
        }

        self.common.validate()
    }
}
