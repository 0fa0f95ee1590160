//! matchstats CLI
//!
//! Collects per-player match statistics from rendered match pages into a CSV.

mod cli_types;
mod commands;
mod error;
mod logging;
mod provider;
mod spinner;

use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cli_types::{Cli, Commands, ConfigAction};
use commands::config::{run_config_init, run_config_path, run_config_show};
use commands::discover::run_discover;
use commands::extract::run_extract;
use commands::load_settings;
use commands::run::run_all;
use error::CliError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Cannot open log file: {}", e);
        return ExitCode::FAILURE;
    }

    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!(
                "{} {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e
            );
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: Cli) -> Result<(), CliError> {
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Discover {
            listing_url,
            output,
            session,
        } => run_discover(&load_settings(config)?, listing_url, &output, &session),
        Commands::Extract {
            input,
            run,
            session,
        } => run_extract(&load_settings(config)?, &input, &run, &session, cli.quiet),
        Commands::Run {
            listing_url,
            identifiers,
            run,
            session,
        } => run_all(
            &load_settings(config)?,
            listing_url,
            &identifiers,
            &run,
            &session,
            cli.quiet,
        ),
        Commands::Config { action } => match action {
            ConfigAction::Show => run_config_show(config),
            ConfigAction::Path => {
                run_config_path(config);
                Ok(())
            }
            ConfigAction::Init { force } => run_config_init(config, force),
        },
    }
}
