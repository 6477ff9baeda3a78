//! `tracing` subscriber setup for the `hdash` binary.
//!
//! Library crates only emit events:
//!
//! - `info`: one summary per rendered table
//! - `debug`: ingestion counts, merged column keys
//! - `trace`: per-row pivot and classification fallbacks
//!
//! ```ignore
//! use hdash_cli::logging::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::from_verbosity(2))?;
//! ```

use std::fs::{File, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Crates that follow the configured level; dependencies stay at `warn`.
const WORKSPACE_TARGETS: [&str; 4] = ["hdash_cli", "hdash_core", "hdash_model", "hdash_report"];

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// A set `RUST_LOG` replaces the computed directives.
    pub use_env_filter: bool,
    pub with_timestamps: bool,
    pub with_target: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Append to this file instead of writing to stderr.
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_ansi: true,
            format: LogFormat::Pretty,
            log_file: None,
        }
    }
}

impl LogConfig {
    /// Counts `-v` flags: none is `warn`, then `info`, `debug`, `trace`.
    #[must_use]
    pub fn from_verbosity(count: u8) -> Self {
        let level_filter = [LevelFilter::WARN, LevelFilter::INFO, LevelFilter::DEBUG]
            .get(usize::from(count))
            .copied()
            .unwrap_or(LevelFilter::TRACE);
        Self {
            level_filter,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_level(self, level_filter: LevelFilter) -> Self {
        Self {
            level_filter,
            ..self
        }
    }

    #[must_use]
    pub fn with_format(self, format: LogFormat) -> Self {
        Self { format, ..self }
    }

    /// `warn` globally, the configured level for workspace crates.
    pub fn directives(&self) -> String {
        let level = self.level_filter.to_string().to_lowercase();
        WORKSPACE_TARGETS
            .iter()
            .fold(String::from("warn"), |mut directives, target| {
                directives.push_str(&format!(",{target}={level}"));
                directives
            })
    }

    fn filter(&self) -> EnvFilter {
        let from_env = self
            .use_env_filter
            .then(|| EnvFilter::try_from_default_env().ok())
            .flatten();
        from_env.unwrap_or_else(|| EnvFilter::new(self.directives()))
    }

    fn layer<W>(&self, writer: W) -> Box<dyn Layer<Registry> + Send + Sync>
    where
        W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
    {
        let base = fmt::layer()
            .with_writer(writer)
            .with_target(self.with_target);
        match (self.format, self.with_timestamps) {
            (LogFormat::Json, _) => base.json().boxed(),
            (LogFormat::Compact, true) => base.compact().with_ansi(self.with_ansi).boxed(),
            (LogFormat::Compact, false) => base
                .compact()
                .with_ansi(self.with_ansi)
                .without_time()
                .boxed(),
            (LogFormat::Pretty, true) => base.with_ansi(self.with_ansi).boxed(),
            (LogFormat::Pretty, false) => base.with_ansi(self.with_ansi).without_time().boxed(),
        }
    }
}

/// Installs the global subscriber; call once from `main`.
///
/// # Errors
///
/// Fails when the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    match &config.log_file {
        Some(path) => {
            let file: File = OpenOptions::new().create(true).append(true).open(path)?;
            init_logging_with_writer(config, Mutex::new(file));
        }
        None => init_logging_with_writer(config, io::stderr),
    }
    Ok(())
}

pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(config.layer(writer))
        .with(config.filter())
        .init();
}
