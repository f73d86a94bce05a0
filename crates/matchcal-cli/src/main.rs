//! matchcal CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use matchcal_cli::cli::{Cli, Command, ConfigAction};
use matchcal_cli::config::Config;
use matchcal_cli::error::{CliError, CliResult};
use matchcal_core::{init_tracing, TracingConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::cli()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("error: failed to initialize tracing: {}", e);
        return ExitCode::FAILURE;
    }

    // Run the command
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    // Load configuration
    let config = match cli.config {
        Some(ref path) => Config::load_from(path),
        None => Config::load(),
    }
    .map_err(CliError::Config)?;

    // Handle subcommands
    match cli.command {
        Command::Fetch => matchcal_cli::commands::fetch::run(&config).await,
        Command::Sync => matchcal_cli::commands::sync::run(&config).await,
        Command::Reset { subject, yes } => {
            matchcal_cli::commands::reset::run(&config, subject, yes).await
        }
        Command::Tickets => matchcal_cli::commands::tickets::run(&config).await,
        Command::Config { action } => match action {
            ConfigAction::Dump => matchcal_cli::commands::config::dump(&config),
            ConfigAction::Validate => matchcal_cli::commands::config::validate(&config),
            ConfigAction::Path => matchcal_cli::commands::config::path(),
        },
    }
}
