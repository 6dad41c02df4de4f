//! onlysaidkb-mcp binary entry point.
//!
//! Loads `.env`, validates configuration before anything touches the network,
//! then runs the selected subcommand. Logs go to stderr; stdout is reserved
//! for MCP stdio frames and the configuration diagnostic.

use std::process::ExitCode;

use clap::Parser;
use onlysaidkb_mcp::cli::{Cli, config_diagnostic, execute};
use onlysaidkb_mcp::config::KbConfig;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn load_env_file(cli: &Cli) {
    let loaded = match &cli.env_file {
        Some(path) => dotenvy::from_path(path).map(|()| path.clone()),
        None => dotenvy::dotenv(),
    };
    match loaded {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded environment file"),
        Err(e) if cli.env_file.is_some() => {
            tracing::warn!(error = %e, "Could not load environment file");
        }
        Err(_) => {}
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    load_env_file(&cli);

    let config = match KbConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            #[allow(clippy::print_stdout)]
            {
                print!("{}", config_diagnostic(&e));
            }
            return ExitCode::from(1);
        }
    };

    match execute(&cli, config) {
        Ok(output) => {
            if !output.is_empty() {
                #[allow(clippy::print_stdout)]
                {
                    print!("{output}");
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            ExitCode::from(1)
        }
    }
}
