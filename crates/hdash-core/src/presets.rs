//! Configurations for the dashboard's concrete tables.
//!
//! Each preset pairs a payload layout with a [`TableBuilder`]; the engine
//! itself is shared.

use std::fmt;

use hdash_model::{
    ClassificationPolicy, ColumnDescriptor, GroupedRecords, Predicate, Result, StatusStyle,
    StyleMap, TableConfig,
};
use serde_json::Value;

use crate::format::CellFormat;
use crate::ingest::{FlatLayout, GroupedLayout, flat_from_csv, flat_from_json, grouped_from_json};
use crate::table::{ColumnRule, RenderedTable, TableBuilder};

/// Density per 10,000 at or below which staffing is critical.
pub const DENSITY_CRITICAL_MAX: f64 = 0.5;
/// Density per 10,000 below which staffing is low.
pub const DENSITY_SAFE_MIN: f64 = 5.0;
/// Target shown when a population row carries none.
pub const DEFAULT_DENSITY_TARGET: &str = "15";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    NationalScorecard,
    Scorecard,
    LgaSummary,
    PopulationSummary,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::NationalScorecard,
        TableKind::Scorecard,
        TableKind::LgaSummary,
        TableKind::PopulationSummary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TableKind::NationalScorecard => "national-scorecard",
            TableKind::Scorecard => "scorecard",
            TableKind::LgaSummary => "lga-summary",
            TableKind::PopulationSummary => "population-summary",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TableKind::NationalScorecard => "States by indicator, yes/no status per cell",
            TableKind::Scorecard => "Single indicator list with a yes/no status",
            TableKind::LgaSummary => "LGA population, facilities, wards and reachability",
            TableKind::PopulationSummary => "Health workforce numbers and density per 10,000",
        }
    }

    pub fn from_name(name: &str) -> Option<TableKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn preset(&self) -> TablePreset {
        match self {
            TableKind::NationalScorecard => national_scorecard(),
            TableKind::Scorecard => scorecard(),
            TableKind::LgaSummary => lga_summary(),
            TableKind::PopulationSummary => population_summary(),
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload shape a preset accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadLayout {
    Grouped(GroupedLayout),
    Flat(FlatLayout),
}

impl PayloadLayout {
    pub fn shape(&self) -> &'static str {
        match self {
            PayloadLayout::Grouped(_) => "grouped",
            PayloadLayout::Flat(_) => "flat",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TablePreset {
    pub kind: TableKind,
    pub layout: PayloadLayout,
    pub builder: TableBuilder,
}

impl TablePreset {
    pub fn ingest(&self, payload: &Value) -> Result<GroupedRecords> {
        match &self.layout {
            PayloadLayout::Grouped(layout) => grouped_from_json(payload, layout),
            PayloadLayout::Flat(layout) => flat_from_json(payload, layout),
        }
    }

    /// Reads CSV rows; only flat presets accept CSV.
    pub fn ingest_csv<R: std::io::Read>(&self, reader: R) -> Result<GroupedRecords> {
        match &self.layout {
            PayloadLayout::Flat(layout) => flat_from_csv(reader, layout),
            PayloadLayout::Grouped(_) => Err(hdash_model::ModelError::PayloadShape {
                expected: "grouped json",
                found: "csv",
            }),
        }
    }

    /// Validates `payload` and renders it with optional caller configuration.
    pub fn render(&self, payload: &Value, config: Option<&TableConfig>) -> Result<RenderedTable> {
        let grouped = self.ingest(payload)?;
        Ok(self.render_records(&grouped, config))
    }

    pub fn render_records(
        &self,
        grouped: &GroupedRecords,
        config: Option<&TableConfig>,
    ) -> RenderedTable {
        let builder = match config {
            Some(config) => self.builder.clone().config(config),
            None => self.builder.clone(),
        };
        builder.build().render(grouped)
    }
}

pub fn yes_no_styles() -> StyleMap {
    StyleMap::new()
        .with("yes", StatusStyle::new("Yes", "green"))
        .with("no", StatusStyle::new("No", "red"))
}

pub fn reachability_styles() -> StyleMap {
    StyleMap::new()
        .with("safe", StatusStyle::new("Safe", "green"))
        .with("normal", StatusStyle::new("Normal", "white"))
        .with("hard", StatusStyle::new("Hard to Reach", "red"))
        .with("unknown", StatusStyle::new("Unknown", "gray"))
}

/// LGA reachability: band keys match directly, the API's Yes/No flag maps
/// onto `hard`/`safe`.
pub fn reachability_policy() -> ClassificationPolicy {
    ClassificationPolicy::enumerated(["safe", "normal", "hard", "unknown"], "unknown")
        .alias("Yes", "hard")
        .alias("No", "safe")
}

pub fn density_styles() -> StyleMap {
    StyleMap::new()
        .with("critical", StatusStyle::new("Critical (≤ 0.5)", "red"))
        .with("warning", StatusStyle::new("Low (< 5)", "yellow"))
        .with("safe", StatusStyle::new("Safe (≥ 5)", "green"))
        .with("unknown", StatusStyle::new("Unknown", "gray"))
}

pub fn density_policy() -> ClassificationPolicy {
    ClassificationPolicy::thresholds(
        [
            (Predicate::AtMost(DENSITY_CRITICAL_MAX), "critical"),
            (Predicate::Below(DENSITY_SAFE_MIN), "warning"),
        ],
        "safe",
        "unknown",
    )
}

/// States by indicator: `{"Abia": [{"indicator": "...", "status": "Yes"}]}`.
pub fn national_scorecard() -> TablePreset {
    TablePreset {
        kind: TableKind::NationalScorecard,
        layout: PayloadLayout::Grouped(GroupedLayout::new("indicator", "status")),
        builder: TableBuilder::new("National Scorecard")
            .group_column("state", "State")
            .policy(ClassificationPolicy::yes_no())
            .styles(yes_no_styles()),
    }
}

/// One row per indicator: `[{"indicator": "...", "status": "Yes"}]`.
pub fn scorecard() -> TablePreset {
    TablePreset {
        kind: TableKind::Scorecard,
        layout: PayloadLayout::Flat(FlatLayout::new(&["indicator"]).field("status", "status")),
        builder: TableBuilder::new("Scorecard")
            .group_column("indicator", "Indicator")
            .columns(vec![ColumnDescriptor::status("status", "Status")])
            .policy(ClassificationPolicy::yes_no())
            .styles(yes_no_styles()),
    }
}

/// LGA lookup rows as returned by the API.
pub fn lga_summary() -> TablePreset {
    TablePreset {
        kind: TableKind::LgaSummary,
        layout: PayloadLayout::Flat(
            FlatLayout::new(&["lga"])
                .field("lga_population", "population")
                .field("health_facilities", "health_facilities")
                .field("number_of_wards", "political_wards")
                .field("hard_to_reach_lgas", "hard_to_reach"),
        ),
        builder: TableBuilder::new("LGA Summary")
            .group_column("lga", "LGA")
            .columns(vec![
                ColumnDescriptor::text("population", "Population"),
                ColumnDescriptor::text("health_facilities", "Health Facilities"),
                ColumnDescriptor::text("political_wards", "Political Wards"),
                ColumnDescriptor::status("hard_to_reach", "Hard to Reach"),
            ])
            .policy(reachability_policy())
            .styles(reachability_styles())
            .column_rule("population", ColumnRule::text(CellFormat::Integer))
            .column_rule(
                "hard_to_reach",
                ColumnRule::status(CellFormat::BandLabel).classify_missing(),
            ),
    }
}

/// Workforce rows: occupation (or institution), number, density, target.
pub fn population_summary() -> TablePreset {
    TablePreset {
        kind: TableKind::PopulationSummary,
        layout: PayloadLayout::Flat(
            FlatLayout::new(&["institution", "occupation"])
                .field("number", "number")
                .field("density", "density")
                .field("target", "target"),
        ),
        builder: TableBuilder::new("Population by LGA")
            .group_column("occupation", "Occupation")
            .columns(vec![
                ColumnDescriptor::text("number", "Number"),
                ColumnDescriptor::status("density", "Density/10,000"),
                ColumnDescriptor::text("target", "Target"),
            ])
            .policy(density_policy())
            .styles(density_styles())
            .column_rule(
                "density",
                ColumnRule::status(CellFormat::IntegerOrNa).classify_missing(),
            )
            // Only absent or blank targets get the default; a reported 0 is shown as 0.
            .column_rule(
                "target",
                ColumnRule::text(CellFormat::Raw).with_placeholder(DEFAULT_DENSITY_TARGET),
            ),
    }
}
