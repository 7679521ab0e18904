use afes::AfesError;
use afes::cli::{args::Args, commands};
use anyhow::Context;
use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    runtime.block_on(async {
        let cancellation_token = CancellationToken::new();

        let shutdown_signal = async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => cancellation_token.cancel(),
                // Without a signal handler the command simply runs to completion
                Err(_) => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            result = commands::run(args, cancellation_token.clone()) => {
                result.context("Command failed")
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(AfesError::interrupted("Interrupted by user").into())
            }
        }
    })
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("AFES - Automatic File Exploration");
    println!("=================================");
    println!();
    println!("Describe directories of tabular data files and infer the field");
    println!("separator of delimited text files.");
    println!();
    println!("USAGE:");
    println!("    afes <COMMAND> <PATH> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    explore     List supported files with size, rows and separator");
    println!("    generate    Write pandas or polars loader code for the files");
    println!("    profile     Write a profile report for every delimited table");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Increase logging verbosity");
    println!("    -q, --quiet      Only show errors");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Explore a directory:");
    println!("    afes explore ./data");
    println!();
    println!("    # Machine-readable output:");
    println!("    afes explore ./data --output-format json");
    println!();
    println!("    # Generate polars loaders:");
    println!("    afes generate ./data --target polars --output-file loaders.rs");
    println!();
    println!("    # Profile every table into ./reports:");
    println!("    afes profile ./data --output-path reports --format html");
    println!();
    println!("For detailed help on any command, use:");
    println!("    afes <COMMAND> --help");
}
