//! `hdash`: dashboard tables in the terminal.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::{ColorChoice, Parser};
use hdash_cli::logging::{LogConfig, init_logging};

mod cli;
mod commands;

use crate::cli::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&log_config(&cli)) {
        eprintln!("error: cannot open log file: {error}");
        return ExitCode::FAILURE;
    }
    let result = match &cli.command {
        Command::Render(args) => commands::run_render(args, stdout_color(cli.color.color)),
        Command::Presets => commands::run_presets(),
        Command::Nav(args) => commands::run_nav(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn stdout_color(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Auto => io::stdout().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    }
}

/// `--log-level` beats `-v/-q`, either beats `RUST_LOG`. ANSI is off for log
/// files unless color is forced.
fn log_config(cli: &Cli) -> LogConfig {
    let with_ansi = match cli.color.color {
        ColorChoice::Auto => cli.log.file.is_none() && io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };
    LogConfig {
        level_filter: cli.log.level_filter(),
        use_env_filter: !cli.log.level_is_explicit(),
        with_ansi,
        format: cli.log.format.into(),
        log_file: cli.log.file.clone(),
        ..LogConfig::default()
    }
}
