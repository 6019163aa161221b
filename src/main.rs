use anyhow::Context;
use clap::Parser;
use pga_lookup::cli::{args::Args, commands};
use pga_lookup::error::LookupError;
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command_name) = args.command.as_ref().map(|command| command.name()) else {
        show_help_and_commands();
        process::exit(0);
    };

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result: anyhow::Result<commands::CommandStats> = runtime.block_on(async {
        let shutdown_signal = async {
            if tokio::signal::ctrl_c().await.is_err() {
                // No signal handler available; never resolve
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = commands::run(args) => {
                result.with_context(|| format!("{} command failed", command_name))
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(LookupError::interrupted("Lookup interrupted by user").into())
            }
        }
    });

    match result {
        Ok(_stats) => {
            // Output has already been written by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("PGA Lookup - HTS code to Partner Government Agency requirements");
    println!("================================================================");
    println!();
    println!("Resolve HTS tariff codes against the ACE agency tariff reference");
    println!("spreadsheets and report the PGA requirements that apply.");
    println!();
    println!("USAGE:");
    println!("    pga-lookup <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    lookup      Look up a single HS code");
    println!("    batch       Look up every HS code in a file (JSON Lines output)");
    println!("    options     List agency, code and program values");
    println!("    codes       List PGA code rows, optionally filtered");
    println!("    tables      Show which reference files resolve in the data directory");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Look up one code using reference data in ./data:");
    println!("    pga-lookup lookup 0101210010 --data-dir ./data");
    println!();
    println!("    # Machine-readable output:");
    println!("    pga-lookup lookup 0901110010 --format json -o coffee.json");
    println!();
    println!("    # Look up a list of codes with 8 concurrent workers:");
    println!("    pga-lookup batch codes.txt -j 8 > results.jsonl");
    println!();
    println!("    # FDA codes only:");
    println!("    pga-lookup codes --agency FDA");
    println!();
    println!("The data directory defaults to $PGA_LOOKUP_DATA_DIR, then the user data");
    println!("directory (e.g. ~/.local/share/pga-lookup).");
    println!();
    println!("For detailed help on any command, use:");
    println!("    pga-lookup <COMMAND> --help");
}
