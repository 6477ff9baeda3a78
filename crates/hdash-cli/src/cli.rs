//! CLI argument definitions for the dashboard table renderer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use hdash_cli::logging::LogFormat;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "hdash",
    version,
    about = "Render health dashboard tables from API payloads",
    long_about = "Render health dashboard tables from API payloads.\n\n\
                  Columns come from the payload itself; each group (state, LGA,\n\
                  occupation) becomes a row and status cells are banded with a legend."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub log: LogArgs,

    /// When to color output: auto, always or never.
    #[command(flatten)]
    pub color: Color,
}

/// Flags that shape diagnostics on stderr (or the log file).
#[derive(Args)]
pub struct LogArgs {
    /// More (-v, -vv) or fewer (-q) diagnostics.
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Fixed log level; wins over -v/-q and RUST_LOG.
    #[arg(long = "log-level", value_enum, global = true)]
    pub level: Option<LogLevelArg>,

    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub format: LogFormatArg,

    /// Append diagnostics to PATH.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub file: Option<PathBuf>,
}

impl LogArgs {
    /// Whether the user picked a level explicitly, which disables `RUST_LOG`.
    pub fn level_is_explicit(&self) -> bool {
        self.verbosity.is_present() || self.level.is_some()
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.level
            .map_or_else(|| self.verbosity.tracing_level_filter(), LevelFilter::from)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Render a payload file through a table preset.
    Render(RenderArgs),

    /// List the available table presets.
    Presets,

    /// Show the navigation tree visible to a role.
    Nav(NavArgs),
}

#[derive(Parser)]
pub struct RenderArgs {
    /// Table preset to render with.
    #[arg(value_enum, value_name = "PRESET")]
    pub preset: PresetArg,

    /// Payload file (.json, or .csv for flat presets).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Table configuration file (title, statusStyles, classificationPolicy).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the table title.
    #[arg(long = "title")]
    pub title: Option<String>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Maximum table width in columns.
    #[arg(long = "width", default_value_t = 120)]
    pub width: u16,
}

#[derive(Parser)]
pub struct NavArgs {
    /// Role of the signed-in user (e.g. user, h-admin, acct).
    #[arg(long = "role")]
    pub role: Option<String>,

    /// Current path, used to mark the active entry.
    #[arg(long = "path", default_value = "/dashboard")]
    pub path: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PresetArg {
    NationalScorecard,
    Scorecard,
    LgaSummary,
    PopulationSummary,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
