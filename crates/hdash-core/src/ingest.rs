//! Payload validation and conversion into [`GroupedRecords`].
//!
//! The dashboard API hands over two payload shapes:
//!
//! - **grouped**: an object of group key to record list
//!   (`{"Abia": [{"indicator": "...", "status": "Yes"}]}`)
//! - **flat**: a list of row objects, one per group
//!   (`[{"lga": "Aba North", "lga_population": 12345, ...}]`)
//!
//! Both are checked here, at the boundary; everything past this module works
//! on typed records only.

use std::io::Read;

use hdash_model::{CellValue, DomainRecord, GroupedRecords, ModelError, Result};
use serde_json::{Map, Value};
use tracing::debug;

/// Field names read from each record of a grouped payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedLayout {
    pub dimension_field: String,
    pub value_field: String,
}

impl GroupedLayout {
    pub fn new(dimension_field: impl Into<String>, value_field: impl Into<String>) -> Self {
        Self {
            dimension_field: dimension_field.into(),
            value_field: value_field.into(),
        }
    }
}

/// Maps one source field of a flat row onto a column key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatField {
    pub source: String,
    pub column: String,
}

/// Field names read from each row of a flat payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatLayout {
    /// Candidate group fields; the first non-blank one names the row.
    pub group_fields: Vec<String>,
    pub fields: Vec<FlatField>,
}

impl FlatLayout {
    pub fn new(group_fields: &[&str]) -> Self {
        Self {
            group_fields: group_fields.iter().map(|field| (*field).to_string()).collect(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, source: impl Into<String>, column: impl Into<String>) -> Self {
        self.fields.push(FlatField {
            source: source.into(),
            column: column.into(),
        });
        self
    }
}

/// Converts a JSON scalar into a cell value.
///
/// Strings and numbers map directly, booleans become "Yes"/"No". Null,
/// arrays and objects are treated as absent.
pub fn cell_from_json(value: &Value) -> Option<CellValue> {
    match value {
        Value::String(text) => Some(CellValue::Text(text.clone())),
        Value::Number(number) => number.as_f64().map(CellValue::Number),
        Value::Bool(flag) => Some(CellValue::from(if *flag { "Yes" } else { "No" })),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn label_from_json(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validates a grouped payload.
///
/// Group order follows the payload's key order. A group whose value is not a
/// list, or a record that is not an object, is rejected.
pub fn grouped_from_json(payload: &Value, layout: &GroupedLayout) -> Result<GroupedRecords> {
    let Value::Object(groups) = payload else {
        return Err(ModelError::PayloadShape {
            expected: "object",
            found: json_type(payload),
        });
    };
    let mut grouped = GroupedRecords::new();
    for (group, records) in groups {
        let Value::Array(records) = records else {
            return Err(ModelError::RecordShape {
                location: format!("group `{group}`"),
            });
        };
        grouped.insert_group(group.clone());
        for (index, record) in records.iter().enumerate() {
            let Value::Object(fields) = record else {
                return Err(ModelError::RecordShape {
                    location: format!("`{group}`[{index}]"),
                });
            };
            grouped.push(DomainRecord {
                group: group.clone(),
                dimension: label_from_json(fields.get(&layout.dimension_field)),
                value: fields.get(&layout.value_field).and_then(cell_from_json),
            });
        }
    }
    debug!(
        groups = grouped.len(),
        records = grouped.record_count(),
        "ingested grouped payload"
    );
    Ok(grouped)
}

/// Validates a flat payload, expanding each row into one record per
/// configured field. Every row becomes its own group, so rows sharing a name
/// stay separate.
pub fn flat_from_json(payload: &Value, layout: &FlatLayout) -> Result<GroupedRecords> {
    let Value::Array(rows) = payload else {
        return Err(ModelError::PayloadShape {
            expected: "array",
            found: json_type(payload),
        });
    };
    let mut grouped = GroupedRecords::new();
    for (index, row) in rows.iter().enumerate() {
        let Value::Object(fields) = row else {
            return Err(ModelError::RecordShape {
                location: format!("[{index}]"),
            });
        };
        push_flat_row(&mut grouped, index, layout, |name| {
            lookup(fields, name).and_then(cell_from_json)
        })?;
    }
    debug!(
        groups = grouped.len(),
        records = grouped.record_count(),
        "ingested flat payload"
    );
    Ok(grouped)
}

/// Reads a flat payload from CSV with a header row. Empty fields are absent.
pub fn flat_from_csv<R: Read>(reader: R, layout: &FlatLayout) -> Result<GroupedRecords> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = reader.headers()?.clone();
    let mut grouped = GroupedRecords::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        push_flat_row(&mut grouped, index, layout, |name| {
            let position = headers
                .iter()
                .position(|header| header.eq_ignore_ascii_case(name))?;
            let text = record.get(position)?;
            if text.is_empty() {
                None
            } else {
                Some(CellValue::from(text))
            }
        })?;
    }
    debug!(
        groups = grouped.len(),
        records = grouped.record_count(),
        "ingested csv payload"
    );
    Ok(grouped)
}

fn lookup<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    fields.get(name).or_else(|| {
        fields
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

fn push_flat_row<F>(
    grouped: &mut GroupedRecords,
    index: usize,
    layout: &FlatLayout,
    field: F,
) -> Result<()>
where
    F: Fn(&str) -> Option<CellValue>,
{
    let group = layout
        .group_fields
        .iter()
        .filter_map(|name| field(name.as_str()))
        .map(|value| value.to_string().trim().to_string())
        .find(|name| !name.is_empty())
        .ok_or_else(|| ModelError::MissingGroup {
            index,
            fields: layout.group_fields.join(", "),
        })?;
    let records = layout
        .fields
        .iter()
        .map(|mapping| DomainRecord {
            group: group.clone(),
            dimension: Some(mapping.column.clone()),
            value: field(&mapping.source),
        })
        .collect();
    grouped.push_row(group, records);
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn scorecard_layout() -> GroupedLayout {
        GroupedLayout::new("indicator", "status")
    }

    fn lga_layout() -> FlatLayout {
        FlatLayout::new(&["lga"])
            .field("lga_population", "population")
            .field("hard_to_reach_lgas", "hard_to_reach")
    }

    #[test]
    fn grouped_payload_keeps_key_order() {
        let payload = json!({
            "Kano": [{"indicator": "ANC Coverage", "status": "No"}],
            "Abia": [{"indicator": "ANC Coverage", "status": "Yes"}],
        });
        let grouped = grouped_from_json(&payload, &scorecard_layout()).expect("ingest");
        let groups: Vec<&str> = grouped.groups().map(|(group, _)| group).collect();
        assert_eq!(groups, vec!["Kano", "Abia"]);
    }

    #[test]
    fn grouped_payload_rejects_non_object_records() {
        let payload = json!({ "Kano": [{"indicator": "ANC"}, "oops"] });
        let error = grouped_from_json(&payload, &scorecard_layout()).unwrap_err();
        assert_eq!(error.to_string(), "record `Kano`[1] is not an object");
    }

    #[test]
    fn grouped_payload_must_be_an_object() {
        let error = grouped_from_json(&json!([]), &scorecard_layout()).unwrap_err();
        assert_eq!(error.to_string(), "expected object payload, found array");
    }

    #[test]
    fn empty_groups_are_kept() {
        let payload = json!({ "Ekiti": [] });
        let grouped = grouped_from_json(&payload, &scorecard_layout()).expect("ingest");
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped.record_count(), 0);
    }

    #[test]
    fn flat_rows_expand_to_one_record_per_field() {
        let payload = json!([
            {"lga": "Aba North", "lga_population": 106844.6, "hard_to_reach_lgas": "No"},
            {"lga": "Isuikwuato", "lga_population": "115794"},
        ]);
        let grouped = flat_from_json(&payload, &lga_layout()).expect("ingest");
        assert_eq!(grouped.len(), 2);
        let isuikwuato = grouped.records("Isuikwuato").expect("group");
        assert_eq!(isuikwuato.len(), 2);
        assert_eq!(isuikwuato[0].dimension.as_deref(), Some("population"));
        assert_eq!(isuikwuato[1].value, None);
    }

    #[test]
    fn flat_rows_with_the_same_name_stay_separate() {
        let payload = json!([
            {"lga": "Surulere", "lga_population": 500000, "hard_to_reach_lgas": "No"},
            {"lga": "Surulere", "lga_population": 137000, "hard_to_reach_lgas": "Yes"},
        ]);
        let grouped = flat_from_json(&payload, &lga_layout()).expect("ingest");
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped.record_count(), 4);
        let reach: Vec<_> = grouped
            .groups()
            .map(|(_, records)| records[1].value.clone())
            .collect();
        assert_eq!(reach, vec![Some(CellValue::from("No")), Some(CellValue::from("Yes"))]);
    }

    #[test]
    fn flat_rows_need_a_group_value() {
        let payload = json!([{"lga": "Aba North"}, {"lga": "  "}]);
        let error = flat_from_json(&payload, &lga_layout()).unwrap_err();
        assert_eq!(error.to_string(), "row 1 has no group value (looked for lga)");
    }

    #[test]
    fn booleans_become_yes_no() {
        assert_eq!(cell_from_json(&json!(true)), Some(CellValue::from("Yes")));
        assert_eq!(cell_from_json(&json!(false)), Some(CellValue::from("No")));
        assert_eq!(cell_from_json(&json!(null)), None);
    }

    #[test]
    fn csv_rows_match_headers_case_insensitively() {
        let data = "LGA,LGA_Population,hard_to_reach_lgas\nAba North,106844,Yes\nAba South,,\n";
        let grouped = flat_from_csv(data.as_bytes(), &lga_layout()).expect("ingest csv");
        assert_eq!(grouped.len(), 2);
        let aba_south = grouped.records("Aba South").expect("group");
        assert_eq!(aba_south[0].value, None);
        let aba_north = grouped.records("Aba North").expect("group");
        assert_eq!(aba_north[1].value, Some(CellValue::from("Yes")));
    }
}
