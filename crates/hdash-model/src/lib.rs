//! Data model for health dashboard tables.
//!
//! Records arrive loosely typed from the dashboard API. This crate holds the
//! typed shapes they are validated into, plus the column, row, status band and
//! classification policy types the table engine works with.

pub mod column;
pub mod config;
pub mod error;
pub mod navigation;
pub mod policy;
pub mod record;
pub mod status;
pub mod value;

pub use column::{ColumnDescriptor, ColumnKind, PivotRow};
pub use config::TableConfig;
pub use error::{ModelError, Result};
pub use navigation::NavItem;
pub use policy::{ClassificationPolicy, Predicate, PolicyRule};
pub use record::{DomainRecord, GroupedRecords};
pub use status::{StatusBand, StatusStyle, StyleMap};
pub use value::CellValue;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouped_records_keep_first_seen_group_order() {
        let mut grouped = GroupedRecords::new();
        grouped.push(DomainRecord::new("Kano", Some("ANC Coverage"), Some("No")));
        grouped.push(DomainRecord::new("Abia", Some("ANC Coverage"), Some("Yes")));
        grouped.push(DomainRecord::new("Kano", Some("Immunization"), Some("Yes")));

        let groups: Vec<&str> = grouped.groups().map(|(group, _)| group).collect();
        assert_eq!(groups, vec!["Kano", "Abia"]);
        assert_eq!(grouped.records("Kano").map(<[DomainRecord]>::len), Some(2));
        assert_eq!(grouped.record_count(), 3);
    }

    #[test]
    fn table_config_deserializes_camel_case() {
        let json = r#"{
            "title": "Scorecard",
            "statusStyles": { "yes": { "label": "Met", "accent": "blue" } },
            "classificationPolicy": {
                "rules": [{ "when": { "op": "equalsIgnoreCase", "value": "met" }, "band": "yes" }],
                "fallback": "no"
            }
        }"#;
        let config: TableConfig = serde_json::from_str(json).expect("deserialize config");
        assert_eq!(config.title.as_deref(), Some("Scorecard"));
        let styles = config.status_styles.expect("styles");
        assert_eq!(styles.get("yes").map(|s| s.accent.as_str()), Some("blue"));
        let policy = config.classification_policy.expect("policy");
        assert_eq!(policy.fallback, "no");
        assert_eq!(policy.rules.len(), 1);
    }
}
