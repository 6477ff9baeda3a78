//! Display formatting for table cells.

use hdash_model::{CellValue, StatusBand};
use serde::{Deserialize, Serialize};

/// Marker shown for numbers that cannot be parsed.
pub const NOT_AVAILABLE: &str = "N/A";

/// How a cell value is turned into display text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellFormat {
    /// Value as-is.
    #[default]
    Raw,
    /// Rounded to the nearest integer; unparseable text is shown unchanged.
    Integer,
    /// Rounded to the nearest integer; unparseable or absent is [`NOT_AVAILABLE`].
    IntegerOrNa,
    /// The resolved band's label (status cells).
    BandLabel,
}

/// Formats a cell for display. Empty cells render as an empty string except
/// under [`CellFormat::IntegerOrNa`] and [`CellFormat::BandLabel`] with a band.
pub fn format_cell(value: Option<&CellValue>, format: CellFormat, band: Option<&StatusBand>) -> String {
    match format {
        CellFormat::Raw => value.map(ToString::to_string).unwrap_or_default(),
        CellFormat::Integer => match value {
            Some(value) => value
                .as_number()
                .map_or_else(|| value.to_string(), format_integer),
            None => String::new(),
        },
        CellFormat::IntegerOrNa => value
            .and_then(CellValue::as_number)
            .map_or_else(|| NOT_AVAILABLE.to_string(), format_integer),
        CellFormat::BandLabel => band.map(|band| band.label.clone()).unwrap_or_default(),
    }
}

/// Rounds half away from zero and prints without a fraction; `-0` prints as `0`.
pub fn format_integer(value: f64) -> String {
    let rounded = value.round();
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{rounded:.0}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_round_half_away_from_zero() {
        assert_eq!(format_integer(2.5), "3");
        assert_eq!(format_integer(-2.5), "-3");
        assert_eq!(format_integer(1234567.49), "1234567");
        assert_eq!(format_integer(-0.4), "0");
    }

    #[test]
    fn density_display() {
        let zero = CellValue::from("0");
        assert_eq!(format_cell(Some(&zero), CellFormat::IntegerOrNa, None), "0");
        let nan = CellValue::from("NaN");
        assert_eq!(format_cell(Some(&nan), CellFormat::IntegerOrNa, None), "N/A");
        assert_eq!(format_cell(None, CellFormat::IntegerOrNa, None), "N/A");
        let value = CellValue::from(4.6);
        assert_eq!(format_cell(Some(&value), CellFormat::IntegerOrNa, None), "5");
    }

    #[test]
    fn population_display() {
        let value = CellValue::from("3727347.8");
        assert_eq!(format_cell(Some(&value), CellFormat::Integer, None), "3727348");
        let text = CellValue::from("pending");
        assert_eq!(format_cell(Some(&text), CellFormat::Integer, None), "pending");
        assert_eq!(format_cell(None, CellFormat::Integer, None), "");
    }

    #[test]
    fn band_label_requires_band() {
        let band = StatusBand {
            key: "yes".to_string(),
            label: "Yes".to_string(),
            accent: "green".to_string(),
        };
        assert_eq!(format_cell(None, CellFormat::BandLabel, Some(&band)), "Yes");
        assert_eq!(format_cell(None, CellFormat::BandLabel, None), "");
    }
}
