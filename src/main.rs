//! reqbump - requirements.txt updater CLI tool
//!
//! Checks every package pinned in a requirements.txt against PyPI and
//! rewrites the pins that are behind, keeping a backup of the original.

use clap::Parser;
use reqbump::cli::CliArgs;
use reqbump::config::Settings;
use reqbump::orchestrator::Orchestrator;
use reqbump::output::{create_formatter, OutputConfig};
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Install the stderr log subscriber; `RUST_LOG` takes precedence over `--verbose`
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "reqbump=debug" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let formatter = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(formatter)
        .with(filter)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let settings = Settings::resolve(&args.overrides())?;

    // Print run info in verbose mode
    if args.verbose {
        eprintln!("reqbump v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Manifest: {}", settings.manifest.display());
        if let Some(config) = &settings.config_file {
            eprintln!("Config: {}", config.display());
        }
        eprintln!("Index: {}", settings.index_url);
        if settings.dry_run {
            eprintln!("Mode: dry-run");
        }
    }

    // Create and run the orchestrator
    let orchestrator = Orchestrator::new(settings)?;
    let report = orchestrator.run_with_progress(args.show_progress()).await?;

    // Output results
    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet)
        .with_color(io::stdout().is_terminal());
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    // Lookup failures are reported but never fail the run
    Ok(ExitCode::SUCCESS)
}
