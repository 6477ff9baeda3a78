//! Table engine: columns, rows, classified cells and legend in one pass.
//!
//! A [`TableEngine`] is an immutable configuration object built with
//! [`TableBuilder`]. Rendering is a pure function of the engine and the
//! grouped records, so an engine can be shared freely between threads and
//! reused for every payload.
//!
//! ```
//! use hdash_core::table::TableBuilder;
//! use hdash_model::{ClassificationPolicy, DomainRecord, GroupedRecords, StatusStyle, StyleMap};
//!
//! let engine = TableBuilder::new("Scorecard")
//!     .group_column("state", "State")
//!     .policy(ClassificationPolicy::yes_no())
//!     .styles(
//!         StyleMap::new()
//!             .with("yes", StatusStyle::new("Yes", "green"))
//!             .with("no", StatusStyle::new("No", "red")),
//!     )
//!     .build();
//!
//! let grouped: GroupedRecords =
//!     vec![DomainRecord::new("Abia", Some("ANC Coverage"), Some("Yes"))]
//!         .into_iter()
//!         .collect();
//! let table = engine.render(&grouped);
//! assert_eq!(table.columns.len(), 2);
//! assert_eq!(table.legend.len(), 2);
//! ```

use hdash_model::{
    CellValue, ClassificationPolicy, ColumnDescriptor, ColumnKind, GroupedRecords, PivotRow,
    StatusBand, StyleMap, TableConfig,
};
use serde::Serialize;
use tracing::debug;

use crate::classify::classify;
use crate::columns::derive_columns;
use crate::format::{CellFormat, format_cell};
use crate::pivot::pivot;

/// Per-column presentation rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRule {
    pub kind: ColumnKind,
    pub format: CellFormat,
    /// Policy for this column; the table policy applies when unset.
    pub policy: Option<ClassificationPolicy>,
    /// Display text for empty cells.
    pub placeholder: Option<String>,
    /// Classify empty status cells instead of leaving them blank.
    pub classify_missing: bool,
}

impl ColumnRule {
    pub fn text(format: CellFormat) -> Self {
        Self {
            kind: ColumnKind::Text,
            format,
            policy: None,
            placeholder: None,
            classify_missing: false,
        }
    }

    pub fn status(format: CellFormat) -> Self {
        Self {
            kind: ColumnKind::Status,
            format,
            policy: None,
            placeholder: None,
            classify_missing: false,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ClassificationPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn classify_missing(mut self) -> Self {
        self.classify_missing = true;
        self
    }
}

/// Where a table's non-group columns come from.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSource {
    /// Discovered from the records' dimension labels.
    Derived,
    /// Fixed by the caller, group column excluded.
    Explicit(Vec<ColumnDescriptor>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedCell {
    pub column: String,
    pub text: String,
    /// Resolved band for status cells that carry one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<StatusBand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRow {
    pub cells: Vec<RenderedCell>,
}

impl RenderedRow {
    pub fn cell(&self, column: &str) -> Option<&RenderedCell> {
        self.cells.iter().find(|cell| cell.column == column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub key: String,
    pub label: String,
    pub accent: String,
}

/// Render tree for one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedTable {
    pub title: String,
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<PivotRow>,
    pub body: Vec<RenderedRow>,
    pub legend: Vec<LegendEntry>,
}

impl RenderedTable {
    pub fn header(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.label.as_str()).collect()
    }
}

/// Builder for [`TableEngine`].
#[derive(Debug, Clone)]
pub struct TableBuilder {
    title: String,
    group_column: ColumnDescriptor,
    columns: ColumnSource,
    default_kind: ColumnKind,
    policy: ClassificationPolicy,
    styles: StyleMap,
    overrides: StyleMap,
    rules: Vec<(String, ColumnRule)>,
}

impl TableBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            group_column: ColumnDescriptor::text("state", "State"),
            columns: ColumnSource::Derived,
            default_kind: ColumnKind::Status,
            policy: ClassificationPolicy::yes_no(),
            styles: StyleMap::new(),
            overrides: StyleMap::new(),
            rules: Vec::new(),
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn group_column(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.group_column = ColumnDescriptor::text(key, label);
        self
    }

    /// Fixes the non-group columns instead of deriving them.
    #[must_use]
    pub fn columns(mut self, columns: Vec<ColumnDescriptor>) -> Self {
        self.columns = ColumnSource::Explicit(columns);
        self
    }

    /// Kind of derived columns without a rule.
    #[must_use]
    pub fn default_kind(mut self, kind: ColumnKind) -> Self {
        self.default_kind = kind;
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: ClassificationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Default styles; legend order follows this map.
    #[must_use]
    pub fn styles(mut self, styles: StyleMap) -> Self {
        self.styles = styles;
        self
    }

    /// Caller overrides layered over the default styles.
    #[must_use]
    pub fn style_overrides(mut self, overrides: &StyleMap) -> Self {
        self.overrides = self.overrides.merged(overrides);
        self
    }

    #[must_use]
    pub fn column_rule(mut self, key: impl Into<String>, rule: ColumnRule) -> Self {
        let key = key.into();
        self.rules.retain(|(existing, _)| *existing != key);
        self.rules.push((key, rule));
        self
    }

    /// Applies a caller configuration: title, style overrides and policy.
    #[must_use]
    pub fn config(mut self, config: &TableConfig) -> Self {
        if let Some(title) = &config.title {
            self.title = title.clone();
        }
        if let Some(overrides) = &config.status_styles {
            self = self.style_overrides(overrides);
        }
        if let Some(policy) = &config.classification_policy {
            self.policy = policy.clone();
        }
        self
    }

    pub fn build(self) -> TableEngine {
        TableEngine {
            title: self.title,
            group_column: self.group_column,
            columns: self.columns,
            default_kind: self.default_kind,
            policy: self.policy,
            styles: self.styles.merged(&self.overrides),
            rules: self.rules,
        }
    }
}

/// Immutable, reusable table configuration.
#[derive(Debug, Clone)]
pub struct TableEngine {
    title: String,
    group_column: ColumnDescriptor,
    columns: ColumnSource,
    default_kind: ColumnKind,
    policy: ClassificationPolicy,
    styles: StyleMap,
    rules: Vec<(String, ColumnRule)>,
}

impl TableEngine {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn group_column(&self) -> &ColumnDescriptor {
        &self.group_column
    }

    /// Default styles merged with overrides.
    pub fn styles(&self) -> &StyleMap {
        &self.styles
    }

    pub fn policy(&self) -> &ClassificationPolicy {
        &self.policy
    }

    fn rule(&self, key: &str) -> Option<&ColumnRule> {
        self.rules
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, rule)| rule)
    }

    /// Column set for `grouped`, group column first.
    pub fn columns_for(&self, grouped: &GroupedRecords) -> Vec<ColumnDescriptor> {
        match &self.columns {
            ColumnSource::Derived => derive_columns(grouped, &self.group_column, |key| {
                self.rule(key).map_or(self.default_kind, |rule| rule.kind)
            }),
            ColumnSource::Explicit(columns) => std::iter::once(self.group_column.clone())
                .chain(
                    columns
                        .iter()
                        .filter(|column| column.key != self.group_column.key)
                        .cloned(),
                )
                .collect(),
        }
    }

    /// Legend entries: every band of the merged style map, once, in map order.
    pub fn legend(&self) -> Vec<LegendEntry> {
        self.styles
            .iter()
            .map(|(key, style)| LegendEntry {
                key: key.to_string(),
                label: style.label.clone(),
                accent: style.accent.clone(),
            })
            .collect()
    }

    pub fn render(&self, grouped: &GroupedRecords) -> RenderedTable {
        let columns = self.columns_for(grouped);
        let rows = pivot(grouped, &self.group_column.key, &columns);
        let body = rows
            .iter()
            .map(|row| RenderedRow {
                cells: columns
                    .iter()
                    .map(|column| self.render_cell(column, row.get(&column.key)))
                    .collect(),
            })
            .collect();
        debug!(
            title = %self.title,
            columns = columns.len(),
            rows = rows.len(),
            "rendered table"
        );
        RenderedTable {
            title: self.title.clone(),
            columns,
            rows,
            body,
            legend: self.legend(),
        }
    }

    fn render_cell(&self, column: &ColumnDescriptor, value: Option<&CellValue>) -> RenderedCell {
        let rule = self.rule(&column.key);
        let empty = value.is_none_or(CellValue::is_blank);
        let band = match column.kind {
            ColumnKind::Status if !empty || rule.is_some_and(|rule| rule.classify_missing) => {
                let policy = rule
                    .and_then(|rule| rule.policy.as_ref())
                    .unwrap_or(&self.policy);
                Some(classify(value, policy, &self.styles))
            }
            _ => None,
        };
        let format = match rule {
            Some(rule) => rule.format,
            None if column.kind == ColumnKind::Status => CellFormat::BandLabel,
            None => CellFormat::Raw,
        };
        let placeholder = rule.and_then(|rule| rule.placeholder.as_deref());
        let text = match placeholder {
            Some(placeholder) if empty => placeholder.to_string(),
            _ => format_cell(value, format, band.as_ref()),
        };
        RenderedCell {
            column: column.key.clone(),
            text,
            band,
        }
    }
}

#[cfg(test)]
mod tests {
    use hdash_model::{DomainRecord, StatusStyle};

    use super::*;

    fn yes_no_styles() -> StyleMap {
        StyleMap::new()
            .with("yes", StatusStyle::new("Yes", "green"))
            .with("no", StatusStyle::new("No", "red"))
    }

    fn scorecard() -> TableEngine {
        TableBuilder::new("National Scorecard")
            .policy(ClassificationPolicy::yes_no())
            .styles(yes_no_styles())
            .build()
    }

    #[test]
    fn empty_status_cells_render_blank() {
        let grouped: GroupedRecords = vec![
            DomainRecord::new("Abia", Some("ANC Coverage"), Some("Yes")),
            DomainRecord::new("Kano", Some("Immunization"), Some("No")),
        ]
        .into_iter()
        .collect();
        let table = scorecard().render(&grouped);
        let abia = &table.body[0];
        let cell = abia.cell("immunization").expect("immunization cell");
        assert_eq!(cell.text, "");
        assert_eq!(cell.band, None);
        let anc = abia.cell("anc_coverage").expect("anc cell");
        assert_eq!(anc.text, "Yes");
        assert_eq!(anc.band.as_ref().map(|band| band.accent.as_str()), Some("green"));
    }

    #[test]
    fn group_cells_are_text() {
        let grouped: GroupedRecords =
            vec![DomainRecord::new("Abia", Some("ANC Coverage"), Some("Yes"))]
                .into_iter()
                .collect();
        let table = scorecard().render(&grouped);
        let state = table.body[0].cell("state").expect("state cell");
        assert_eq!(state.text, "Abia");
        assert_eq!(state.band, None);
    }

    #[test]
    fn placeholder_fills_empty_text_cells() {
        let engine = TableBuilder::new("Population")
            .group_column("occupation", "Occupation")
            .columns(vec![ColumnDescriptor::text("target", "Target")])
            .column_rule("target", ColumnRule::text(CellFormat::Raw).with_placeholder("15"))
            .build();
        let mut grouped = GroupedRecords::new();
        grouped.insert_group("Nurses");
        let table = engine.render(&grouped);
        assert_eq!(table.body[0].cell("target").map(|c| c.text.as_str()), Some("15"));
        assert_eq!(table.rows[0].get("target"), None);
    }

    #[test]
    fn config_overrides_title_styles_and_policy() {
        let config = TableConfig {
            title: Some("Renamed".to_string()),
            status_styles: Some(StyleMap::new().with("no", StatusStyle::new("Not met", "orange"))),
            classification_policy: Some(
                ClassificationPolicy::new("no").rule(hdash_model::Predicate::Equals("Met".into()), "yes"),
            ),
        };
        let engine = TableBuilder::new("Scorecard")
            .styles(yes_no_styles())
            .config(&config)
            .build();
        assert_eq!(engine.title(), "Renamed");
        let legend: Vec<(String, String)> = engine
            .legend()
            .into_iter()
            .map(|entry| (entry.key, entry.label))
            .collect();
        assert_eq!(
            legend,
            vec![
                ("yes".to_string(), "Yes".to_string()),
                ("no".to_string(), "Not met".to_string()),
            ]
        );
        let grouped: GroupedRecords = vec![DomainRecord::new("Abia", Some("ANC"), Some("Met"))]
            .into_iter()
            .collect();
        let table = engine.render(&grouped);
        let cell = table.body[0].cell("anc").expect("anc cell");
        assert_eq!(cell.band.as_ref().map(|band| band.key.as_str()), Some("yes"));
    }

    #[test]
    fn explicit_columns_skip_group_key_duplicates() {
        let engine = TableBuilder::new("Scorecard")
            .group_column("indicator", "Indicator")
            .columns(vec![
                ColumnDescriptor::text("indicator", "Indicator"),
                ColumnDescriptor::status("status", "Status"),
            ])
            .build();
        let columns = engine.columns_for(&GroupedRecords::new());
        let keys: Vec<&str> = columns.iter().map(|column| column.key.as_str()).collect();
        assert_eq!(keys, vec!["indicator", "status"]);
    }
}
