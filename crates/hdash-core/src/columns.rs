//! Column discovery from record content.

use std::collections::HashMap;

use hdash_model::{ColumnDescriptor, ColumnKind, GroupedRecords};
use tracing::debug;

use crate::normalize::normalize_label;

/// Derives the ordered column set for `grouped`.
///
/// The group column comes first. Every other column is a distinct
/// normalized dimension label, in first-seen order across all groups; the
/// first label seen for a key becomes its display label. Labels that are
/// empty after trimming are skipped, as is any label colliding with the
/// group column key. `kind_for` picks the kind of each derived column.
pub fn derive_columns<F>(
    grouped: &GroupedRecords,
    group_column: &ColumnDescriptor,
    kind_for: F,
) -> Vec<ColumnDescriptor>
where
    F: Fn(&str) -> ColumnKind,
{
    let mut columns = vec![group_column.clone()];
    let mut seen: HashMap<String, String> = HashMap::new();
    for (_, records) in grouped.groups() {
        for record in records {
            let Some(label) = record.dimension.as_deref().map(str::trim) else {
                continue;
            };
            let Some(key) = normalize_label(Some(label)) else {
                continue;
            };
            if key == group_column.key {
                debug!(label, key = %key, "dimension label collides with group column, skipping");
                continue;
            }
            if let Some(first) = seen.get(&key) {
                if first != label {
                    debug!(first = %first, merged = label, key = %key, "labels merged under one column key");
                }
                continue;
            }
            seen.insert(key.clone(), label.to_string());
            let kind = kind_for(&key);
            columns.push(ColumnDescriptor::new(key, label, kind));
        }
    }
    columns
}

/// Derives columns with every derived column rendered as a status.
pub fn derive_status_columns(
    grouped: &GroupedRecords,
    group_column: &ColumnDescriptor,
) -> Vec<ColumnDescriptor> {
    derive_columns(grouped, group_column, |_| ColumnKind::Status)
}

#[cfg(test)]
mod tests {
    use hdash_model::{CellValue, DomainRecord};

    use super::*;

    fn state() -> ColumnDescriptor {
        ColumnDescriptor::text("state", "State")
    }

    fn record(group: &str, dimension: Option<&str>) -> DomainRecord {
        DomainRecord::new(group, dimension, Some(CellValue::from("Yes")))
    }

    #[test]
    fn first_seen_order_across_groups() {
        let grouped: GroupedRecords = vec![
            record("Abia", Some("ANC Coverage")),
            record("Kano", Some("Immunization")),
            record("Kano", Some("ANC Coverage")),
            record("Lagos", Some("Malaria Testing")),
        ]
        .into_iter()
        .collect();
        let keys: Vec<String> = derive_status_columns(&grouped, &state())
            .into_iter()
            .map(|column| column.key)
            .collect();
        assert_eq!(keys, vec!["state", "anc_coverage", "immunization", "malaria_testing"]);
    }

    #[test]
    fn blank_and_missing_labels_never_become_columns() {
        let grouped: GroupedRecords = vec![
            record("Abia", None),
            record("Abia", Some("   ")),
            record("Abia", Some("")),
        ]
        .into_iter()
        .collect();
        assert_eq!(derive_status_columns(&grouped, &state()).len(), 1);
    }

    #[test]
    fn colliding_labels_merge_under_first_label() {
        let grouped: GroupedRecords = vec![
            record("Abia", Some(" ANC Coverage ")),
            record("Kano", Some("anc  coverage")),
        ]
        .into_iter()
        .collect();
        let columns = derive_status_columns(&grouped, &state());
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[1].label, "ANC Coverage");
        assert_eq!(columns[1].kind, ColumnKind::Status);
    }

    #[test]
    fn group_column_key_is_reserved() {
        let grouped: GroupedRecords = vec![record("Abia", Some("State"))].into_iter().collect();
        let columns = derive_status_columns(&grouped, &state());
        assert_eq!(columns, vec![state()]);
    }

    #[test]
    fn kind_selector_is_consulted_per_key() {
        let grouped: GroupedRecords = vec![
            record("Abia", Some("Population")),
            record("Abia", Some("Hard to Reach")),
        ]
        .into_iter()
        .collect();
        let columns = derive_columns(&grouped, &state(), |key| {
            if key == "population" { ColumnKind::Text } else { ColumnKind::Status }
        });
        assert_eq!(columns[1].kind, ColumnKind::Text);
        assert_eq!(columns[2].kind, ColumnKind::Status);
    }
}
