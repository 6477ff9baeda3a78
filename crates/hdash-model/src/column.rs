use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::value::CellValue;

/// How a column's cells are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Raw (optionally formatted) value.
    Text,
    /// Colored indicator resolved through a classification policy.
    #[default]
    Status,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Text => "text",
            ColumnKind::Status => "status",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Normalized identifier, unique within a column set.
    pub key: String,
    /// Display text, taken from the first label seen for `key`.
    pub label: String,
    pub kind: ColumnKind,
}

impl ColumnDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
        }
    }

    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ColumnKind::Text)
    }

    pub fn status(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ColumnKind::Status)
    }
}

/// One table row: exactly one cell per column, in column order.
///
/// Rows are created with every cell empty and only existing cells can be
/// set, so a row never holds a key outside its column set.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow {
    cells: Vec<(String, Option<CellValue>)>,
}

impl PivotRow {
    pub fn empty(columns: &[ColumnDescriptor]) -> Self {
        Self {
            cells: columns
                .iter()
                .map(|column| (column.key.clone(), None))
                .collect(),
        }
    }

    /// Sets the cell for `key`. Returns false when the row has no such column.
    pub fn set(&mut self, key: &str, value: Option<CellValue>) -> bool {
        match self.cells.iter_mut().find(|(existing, _)| existing == key) {
            Some((_, cell)) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Cell value for `key`; `None` when the column is unknown or the cell is empty.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(existing, _)| existing == key)
            .and_then(|(_, cell)| cell.as_ref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.cells.iter().any(|(existing, _)| existing == key)
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, Option<&CellValue>)> {
        self.cells
            .iter()
            .map(|(key, cell)| (key.as_str(), cell.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for PivotRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (key, cell) in &self.cells {
            map.serialize_entry(key, cell)?;
        }
        map.end()
    }
}
