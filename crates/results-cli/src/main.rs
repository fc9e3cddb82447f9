//! Series results CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use results_cli::logging::{LogConfig, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{run_duplicates, run_points, run_standings};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let outcome = match &cli.command {
        Command::Duplicates(args) => run_duplicates(args),
        Command::Standings(args) => run_standings(args),
        Command::Points(args) => run_points(args),
    };
    if let Err(error) = outcome {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

/// Explicit `--log-level` beats `-v`/`-q`; either one disables `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit_level = cli.log_level.map(LevelFilter::from);
    let level_flags = explicit_level.is_some() || cli.verbosity.is_present();
    LogConfig::default()
        .with_level_filter(explicit_level.unwrap_or_else(|| cli.verbosity.tracing_level_filter()))
        .with_env_filter(!level_flags)
        .with_format(cli.log_format.into())
        .with_ansi(ansi_logs(cli.color.color, cli.log_file.is_some()))
        .with_log_file(cli.log_file.clone())
        .with_log_data(cli.log_data)
}

/// Log files never get escape codes; stderr only when it is a terminal.
fn ansi_logs(choice: ColorChoice, to_file: bool) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => !to_file && io::stderr().is_terminal(),
    }
}
