//! Command implementations for the PGA lookup CLI
//!
//! Each subcommand lives in its own module:
//! - `lookup`: one HS code, human or JSON document
//! - `batch`: many HS codes concurrently, JSON Lines in input order
//! - `codes`: PGA option lists and filtered code rows
//! - `tables`: data directory listing

pub mod batch;
pub mod codes;
pub mod lookup;
pub mod shared;
pub mod tables;

pub use shared::CommandStats;

use crate::cli::args::{Args, Commands};
use crate::error::{LookupError, Result};

/// Dispatch to the selected subcommand
pub async fn run(args: Args) -> Result<CommandStats> {
    let Some(command) = args.command else {
        return Err(LookupError::configuration("No command given"));
    };

    shared::setup_logging(command.common())?;
    shared::configure_colors(command.common());

    match command {
        Commands::Lookup(lookup_args) => lookup::run_lookup(lookup_args).await,
        Commands::Batch(batch_args) => batch::run_batch(batch_args).await,
        Commands::Options(options_args) => codes::run_options(options_args).await,
        Commands::Codes(codes_args) => codes::run_codes(codes_args).await,
        Commands::Tables(tables_args) => tables::run_tables(tables_args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_without_command_is_configuration_error() {
        let err = run(Args { command: None }).await.unwrap_err();
        assert!(matches!(err, LookupError::Configuration { .. }));
    }
}
