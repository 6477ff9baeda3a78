use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell value as supplied by the dashboard API.
///
/// Absent values are modelled as `Option<CellValue>::None` by the containers
/// that hold cells; there is no null variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Numeric reading of the value.
    ///
    /// Text is trimmed before parsing. Empty text, NaN and infinities (either
    /// parsed or stored) are treated as unparseable.
    pub fn as_number(&self) -> Option<f64> {
        let number = match self {
            CellValue::Number(value) => *value,
            CellValue::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()?
            }
        };
        number.is_finite().then_some(number)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            CellValue::Number(_) => None,
        }
    }

    /// True for whitespace-only text.
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Text(text) if text.trim().is_empty())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_numeric_text() {
        assert_eq!(CellValue::from(" 4.5 ").as_number(), Some(4.5));
        assert_eq!(CellValue::from(12.0).as_number(), Some(12.0));
    }

    #[test]
    fn rejects_blank_and_nan() {
        assert_eq!(CellValue::from("").as_number(), None);
        assert_eq!(CellValue::from("   ").as_number(), None);
        assert_eq!(CellValue::from("NaN").as_number(), None);
        assert_eq!(CellValue::from(f64::NAN).as_number(), None);
        assert_eq!(CellValue::from("n/a").as_number(), None);
    }

    #[test]
    fn rejects_infinities() {
        assert_eq!(CellValue::from("inf").as_number(), None);
        assert_eq!(CellValue::from(" -Infinity ").as_number(), None);
        assert_eq!(CellValue::from(f64::INFINITY).as_number(), None);
        assert_eq!(CellValue::from("1e3").as_number(), Some(1000.0));
    }

    #[test]
    fn integral_numbers_display_without_fraction() {
        assert_eq!(CellValue::from(5.0).to_string(), "5");
        assert_eq!(CellValue::from(0.25).to_string(), "0.25");
        assert_eq!(CellValue::from("Yes").to_string(), "Yes");
    }
}
