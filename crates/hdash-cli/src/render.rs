//! Loading payload and configuration files and rendering them through a preset.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use hdash_core::presets::TableKind;
use hdash_core::table::RenderedTable;
use hdash_model::TableConfig;
use serde_json::Value;
use tracing::{debug, info, info_span};

/// Payload file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    /// Picks the format from the file extension; anything but `.csv` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => InputFormat::Csv,
            _ => InputFormat::Json,
        }
    }
}

pub fn load_config(path: &Path) -> Result<TableConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    TableConfig::from_json(&contents).with_context(|| format!("parse config {}", path.display()))
}

/// Reads `input`, validates it against the preset's layout and renders it.
pub fn render_file(
    kind: TableKind,
    input: &Path,
    config: Option<&TableConfig>,
) -> Result<RenderedTable> {
    let span = info_span!("render", preset = %kind, input = %input.display());
    let _guard = span.enter();
    let preset = kind.preset();
    let grouped = match InputFormat::from_path(input) {
        InputFormat::Csv => {
            let file = fs::File::open(input)
                .with_context(|| format!("open payload {}", input.display()))?;
            preset
                .ingest_csv(file)
                .with_context(|| format!("ingest {}", input.display()))?
        }
        InputFormat::Json => {
            let contents = fs::read_to_string(input)
                .with_context(|| format!("read payload {}", input.display()))?;
            let payload: Value = serde_json::from_str(&contents)
                .with_context(|| format!("parse payload {}", input.display()))?;
            preset
                .ingest(&payload)
                .with_context(|| format!("ingest {}", input.display()))?
        }
    };
    debug!(groups = grouped.len(), records = grouped.record_count(), "payload loaded");
    let table = preset.render_records(&grouped, config);
    info!(
        columns = table.columns.len(),
        rows = table.rows.len(),
        "table rendered"
    );
    Ok(table)
}

/// Merges a `--title` flag into an optional configuration file.
pub fn merge_title(config: Option<TableConfig>, title: Option<String>) -> Option<TableConfig> {
    match (config, title) {
        (config, None) => config,
        (Some(config), Some(title)) => Some(TableConfig {
            title: Some(title),
            ..config
        }),
        (None, Some(title)) => Some(TableConfig {
            title: Some(title),
            ..TableConfig::default()
        }),
    }
}
