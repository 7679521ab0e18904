//! Command implementations for the afes CLI
//!
//! Each subcommand explores its input path first and then reports, writes
//! loader code, or writes profile reports from the described files.

use crate::cli::args::{Args, Commands, ExploreArgs, GenerateArgs, OutputFormat, ProfileArgs};
use crate::codegen::write_loader_code;
use crate::config::ExplorerConfig;
use crate::error::{AfesError, Result};
use crate::explorer::explore_files;
use crate::models::{Exploration, FileDescription};
use crate::profile::{ProfileSummary, profile_files};
use colored::*;
use indicatif::HumanDuration;
use std::path::Path;
use tokio::task;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Dispatch to the subcommand handler
pub async fn run(args: Args, cancellation_token: CancellationToken) -> Result<()> {
    setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    let show_progress = args.show_progress();
    let verbose = args.verbose > 0;

    match &args.command {
        Some(Commands::Explore(explore_args)) => {
            let exploration = run_explore(explore_args, show_progress).await?;
            print_exploration(&exploration, explore_args.output_format)
        }
        Some(Commands::Generate(generate_args)) => {
            let loaders =
                run_generate(generate_args, show_progress, verbose, &cancellation_token).await?;
            if !args.quiet {
                println!(
                    "{} {} loaders to {}",
                    "Saved".bright_green().bold(),
                    loaders.to_string().bright_white().bold(),
                    generate_args.output_file.display()
                );
            }
            Ok(())
        }
        Some(Commands::Profile(profile_args)) => {
            let summary = run_profile(profile_args, show_progress, &cancellation_token).await?;
            if !args.quiet {
                print_profile_summary(&summary, &profile_args.output_path);
            }
            Ok(())
        }
        None => Err(AfesError::configuration("No command given")),
    }
}

/// Set up structured logging on stderr
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("afes={}", log_level)));

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

    initialized.map_err(|e| AfesError::configuration(format!("Failed to set up logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

fn check_cancelled(cancellation_token: &CancellationToken) -> Result<()> {
    if cancellation_token.is_cancelled() {
        return Err(AfesError::interrupted("Cancelled by user"));
    }
    Ok(())
}

async fn explore_input(path: &Path, config: ExplorerConfig) -> Result<Exploration> {
    let exploration = explore_files(path, config).await?;
    info!(
        "Described {} of {} files in {}",
        exploration.stats.files_described,
        exploration.stats.files_discovered,
        HumanDuration(exploration.stats.elapsed)
    );
    Ok(exploration)
}

/// Explore the input path
pub async fn run_explore(args: &ExploreArgs, show_progress: bool) -> Result<Exploration> {
    args.input.validate()?;
    explore_input(&args.input.path, args.input.to_config(show_progress)).await
}

/// Explore the input path and save loader code; returns the number of loaders
pub async fn run_generate(
    args: &GenerateArgs,
    show_progress: bool,
    verbose: bool,
    cancellation_token: &CancellationToken,
) -> Result<usize> {
    args.input.validate()?;
    let exploration = explore_input(&args.input.path, args.input.to_config(show_progress)).await?;
    check_cancelled(cancellation_token)?;

    write_loader_code(
        &exploration.files,
        args.target,
        !args.input.no_header,
        &args.output_file,
        verbose,
    )
}

/// Explore the input path and write a profile report per loadable table
pub async fn run_profile(
    args: &ProfileArgs,
    show_progress: bool,
    cancellation_token: &CancellationToken,
) -> Result<ProfileSummary> {
    args.input.validate()?;
    let config = args.to_config(show_progress);
    let exploration = explore_input(&args.input.path, config.clone()).await?;
    check_cancelled(cancellation_token)?;

    let output_path = args.output_path.clone();
    let format = args.format;
    task::spawn_blocking(move || profile_files(&exploration.files, &output_path, format, &config))
        .await
        .map_err(|e| AfesError::interrupted(format!("Profiling task failed: {}", e)))?
}

/// Print exploration results in the requested format
pub fn print_exploration(exploration: &Exploration, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            print_human_report(exploration);
            Ok(())
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(exploration)
                .map_err(|e| AfesError::report("exploration", e.to_string()))?;
            println!("{}", json);
            Ok(())
        }
    }
}

/// One row of the human-readable file table
fn format_row(file: &FileDescription) -> String {
    format!(
        "{:<32} {:<7} {:>11} {:>10} {:<10}",
        file.name,
        file.extension,
        file.human_readable,
        file.rows.map_or_else(|| "-".to_string(), |r| r.to_string()),
        file.separator.as_deref().unwrap_or("-")
    )
}

fn print_human_report(exploration: &Exploration) {
    let stats = &exploration.stats;

    if !exploration.files.is_empty() {
        println!(
            "{}",
            format!(
                "{:<32} {:<7} {:>11} {:>10} {:<10}",
                "name", "ext", "size", "rows", "separator"
            )
            .bright_cyan()
            .bold()
        );
        for file in &exploration.files {
            println!("{}", format_row(file));
        }
    }

    println!("\n{}", "Exploration Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Time elapsed:".bright_cyan(),
        HumanDuration(stats.elapsed).to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files described:".bright_cyan(),
        stats.files_described.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Delimited files:".bright_cyan(),
        exploration.plain_files().count().to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files skipped:".bright_cyan(),
        stats.files_skipped.to_string().bright_white()
    );
    if stats.separator_fallbacks > 0 {
        println!(
            "  {} {}",
            "Separator fallbacks:".bright_yellow(),
            stats.separator_fallbacks.to_string().bright_yellow().bold()
        );
    }
    if stats.files_failed > 0 {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            stats.files_failed.to_string().bright_red().bold()
        );
    }
    if stats.traversal_errors > 0 {
        println!(
            "  {} {}",
            "Unreadable entries:".bright_red(),
            stats.traversal_errors.to_string().bright_red().bold()
        );
    }
}

fn print_profile_summary(summary: &ProfileSummary, output_path: &Path) {
    println!("\n{}", "Profiling Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Reports written:".bright_cyan(),
        summary.reports.len().to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Output path:".bright_cyan(),
        output_path.display().to_string().bright_white()
    );
    if summary.files_skipped > 0 {
        println!(
            "  {} {}",
            "Files skipped:".bright_cyan(),
            summary.files_skipped.to_string().bright_white()
        );
    }
    if summary.files_failed > 0 {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            summary.files_failed.to_string().bright_red().bold()
        );
    }
}
