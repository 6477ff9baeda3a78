use serde::{Deserialize, Serialize};

use crate::value::CellValue;

/// One measured value for a group (state, LGA, occupation...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Group key the record belongs to (e.g. "Kano").
    pub group: String,
    /// Free-text dimension label (e.g. "ANC Coverage").
    pub dimension: Option<String>,
    pub value: Option<CellValue>,
}

impl DomainRecord {
    pub fn new<V: Into<CellValue>>(
        group: impl Into<String>,
        dimension: Option<&str>,
        value: Option<V>,
    ) -> Self {
        Self {
            group: group.into(),
            dimension: dimension.map(str::to_string),
            value: value.map(Into::into),
        }
    }
}

/// Records keyed by group, in first-seen group order.
///
/// Group order is the row order of every table built from it, so this is an
/// ordered list of groups rather than a hash map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedRecords {
    groups: Vec<(String, Vec<DomainRecord>)>,
}

impl GroupedRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record to its group, creating the group at the end if needed.
    pub fn push(&mut self, record: DomainRecord) {
        match self
            .groups
            .iter_mut()
            .find(|(group, _)| *group == record.group)
        {
            Some((_, records)) => records.push(record),
            None => self.groups.push((record.group.clone(), vec![record])),
        }
    }

    /// Ensures a group exists even when it has no records.
    pub fn insert_group(&mut self, group: impl Into<String>) {
        let group = group.into();
        if !self.groups.iter().any(|(existing, _)| *existing == group) {
            self.groups.push((group, Vec::new()));
        }
    }

    /// Appends a new group even when one with the same name exists.
    ///
    /// Flat payloads carry one row per record, and row names (LGA names in
    /// particular) repeat across states.
    pub fn push_row(&mut self, group: impl Into<String>, records: Vec<DomainRecord>) {
        self.groups.push((group.into(), records));
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &[DomainRecord])> {
        self.groups
            .iter()
            .map(|(group, records)| (group.as_str(), records.as_slice()))
    }

    /// Records of the first group named `group`.
    pub fn records(&self, group: &str) -> Option<&[DomainRecord]> {
        self.groups
            .iter()
            .find(|(existing, _)| existing == group)
            .map(|(_, records)| records.as_slice())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|(_, records)| records.len()).sum()
    }
}

impl FromIterator<DomainRecord> for GroupedRecords {
    fn from_iter<I: IntoIterator<Item = DomainRecord>>(iter: I) -> Self {
        let mut grouped = GroupedRecords::new();
        for record in iter {
            grouped.push(record);
        }
        grouped
    }
}
