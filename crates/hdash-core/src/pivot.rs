//! Pivoting group-keyed records into table rows.

use hdash_model::{CellValue, ColumnDescriptor, GroupedRecords, PivotRow};
use tracing::trace;

use crate::normalize::normalize_label;

/// Builds one row per group, in group order.
///
/// The `group_key` column holds the group name. Every other column takes the
/// value of the first record in the group whose normalized dimension label
/// equals the column key; with no such record the cell stays empty.
pub fn pivot(
    grouped: &GroupedRecords,
    group_key: &str,
    columns: &[ColumnDescriptor],
) -> Vec<PivotRow> {
    grouped
        .groups()
        .map(|(group, records)| {
            let keyed: Vec<(String, Option<&CellValue>)> = records
                .iter()
                .filter_map(|record| {
                    normalize_label(record.dimension.as_deref())
                        .map(|key| (key, record.value.as_ref()))
                })
                .collect();
            let mut row = PivotRow::empty(columns);
            for column in columns {
                if column.key == group_key {
                    row.set(&column.key, Some(CellValue::from(group)));
                    continue;
                }
                let value = keyed
                    .iter()
                    .find(|(key, _)| *key == column.key)
                    .and_then(|(_, value)| value.cloned());
                row.set(&column.key, value);
            }
            trace!(group, cells = row.len(), "pivoted row");
            row
        })
        .collect()
}
