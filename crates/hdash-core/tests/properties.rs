//! Property tests for normalization, column derivation, pivoting and
//! classification.

use hdash_core::classify::classify_key;
use hdash_core::columns::derive_status_columns;
use hdash_core::normalize::normalize_key;
use hdash_core::pivot::pivot;
use hdash_core::presets::density_policy;
use hdash_model::{CellValue, ClassificationPolicy, ColumnDescriptor, DomainRecord, GroupedRecords};
use proptest::prelude::*;

fn label_strategy() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[ a-cA-C\t]{0,8}")
}

fn grouped_strategy() -> impl Strategy<Value = GroupedRecords> {
    proptest::collection::vec(
        ("[A-E]", proptest::collection::vec(label_strategy(), 0..6)),
        0..6,
    )
    .prop_map(|groups| {
        let mut grouped = GroupedRecords::new();
        for (group, labels) in groups {
            grouped.insert_group(group.clone());
            for label in labels {
                grouped.push(DomainRecord::new(
                    group.clone(),
                    label.as_deref(),
                    Some(CellValue::from("x")),
                ));
            }
        }
        grouped
    })
}

fn state() -> ColumnDescriptor {
    ColumnDescriptor::text("state", "State")
}

proptest! {
    #[test]
    fn normalize_is_idempotent(label in "[ a-zA-Z0-9_\t\n/,.-]{0,24}") {
        let once = normalize_key(&label);
        prop_assert_eq!(normalize_key(&once), once.clone());
        prop_assert!(!once.chars().any(char::is_whitespace));
    }

    #[test]
    fn derived_columns_are_distinct_keys_in_first_seen_order(grouped in grouped_strategy()) {
        let mut expected: Vec<String> = Vec::new();
        for (_, records) in grouped.groups() {
            for record in records {
                let key = normalize_key(record.dimension.as_deref().unwrap_or(""));
                if !key.is_empty() && !expected.contains(&key) {
                    expected.push(key);
                }
            }
        }
        let columns = derive_status_columns(&grouped, &state());
        let keys: Vec<String> = columns.iter().skip(1).map(|column| column.key.clone()).collect();
        prop_assert_eq!(&columns[0], &state());
        prop_assert_eq!(keys, expected);
    }

    #[test]
    fn every_row_has_one_cell_per_column(grouped in grouped_strategy()) {
        let columns = derive_status_columns(&grouped, &state());
        let rows = pivot(&grouped, "state", &columns);
        prop_assert_eq!(rows.len(), grouped.len());
        for ((group, records), row) in grouped.groups().zip(&rows) {
            prop_assert_eq!(row.len(), columns.len());
            prop_assert_eq!(row.get("state"), Some(&CellValue::from(group)));
            for column in columns.iter().skip(1) {
                let matched = records.iter().any(|record| {
                    normalize_key(record.dimension.as_deref().unwrap_or("")) == column.key
                });
                prop_assert_eq!(row.get(&column.key).is_some(), matched);
            }
        }
    }

    #[test]
    fn density_classification_is_monotonic(a in -100.0f64..100.0, b in -100.0f64..100.0) {
        let rank = |band: &str| match band {
            "critical" => 0,
            "warning" => 1,
            "safe" => 2,
            _ => 3,
        };
        let policy = density_policy();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let low_band = classify_key(Some(&CellValue::from(low)), &policy);
        let high_band = classify_key(Some(&CellValue::from(high)), &policy);
        prop_assert!(rank(low_band) <= rank(high_band));
    }

    #[test]
    fn only_yes_resolves_to_yes(text in "[a-zA-Z]{0,5}") {
        let policy = ClassificationPolicy::yes_no();
        let band = classify_key(Some(&CellValue::from(text.as_str())), &policy);
        let expected = if text.eq_ignore_ascii_case("yes") { "yes" } else { "no" };
        prop_assert_eq!(band, expected);
    }
}

#[test]
fn density_boundaries() {
    let policy = density_policy();
    let band = |value: f64| classify_key(Some(&CellValue::from(value)), &policy).to_string();
    assert_eq!(band(0.5), "critical");
    assert_eq!(band(0.51), "warning");
    assert_eq!(band(4.99), "warning");
    assert_eq!(band(5.0), "safe");
}
