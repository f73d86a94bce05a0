//! Configuration commands.

use crate::config::Config;
use crate::error::{CliError, CliResult};

/// Dump the current configuration to stdout.
pub fn dump(config: &Config) -> CliResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| CliError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", Config::default_path().display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration, resolving secret references.
pub fn validate(config: &Config) -> CliResult<()> {
    let mut problems = Vec::new();

    match config.subjects() {
        Ok(subjects) if subjects.is_empty() => {
            problems.push("no subjects in [calendar.subjects]".to_string());
        }
        Ok(_) => {}
        Err(e) => problems.push(e),
    }

    if let Err(e) = config.football_config() {
        problems.push(e);
    }
    if let Err(e) = config.calendar_config() {
        problems.push(e);
    }

    if config.tickets.is_some() {
        if let Err(e) = config.tickets_config() {
            problems.push(e);
        }
    } else {
        println!("Ticket watching is not configured; the `tickets` command is disabled.");
    }

    if problems.is_empty() {
        println!("Configuration is valid.");
        Ok(())
    } else {
        for problem in &problems {
            eprintln!("- {}", problem);
        }
        Err(CliError::Config(format!(
            "{} problem(s) found",
            problems.len()
        )))
    }
}

/// Show the configuration file path.
pub fn path() -> CliResult<()> {
    let config_path = Config::default_path();
    if config_path.exists() {
        println!("config: {}", config_path.display());
    } else {
        println!("config: {} (not found)", config_path.display());
    }
    Ok(())
}
