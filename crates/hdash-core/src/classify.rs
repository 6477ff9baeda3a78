//! Value classification into status bands.

use hdash_model::{CellValue, ClassificationPolicy, Predicate, StatusBand, StatusStyle, StyleMap};
use tracing::trace;

/// Whether `predicate` holds for `value`.
pub fn matches(predicate: &Predicate, value: Option<&CellValue>) -> bool {
    match predicate {
        Predicate::Always => true,
        Predicate::Present => value.is_some_and(|value| !value.is_blank()),
        Predicate::Equals(expected) => value.is_some_and(|value| value.to_string() == *expected),
        Predicate::EqualsIgnoreCase(expected) => value
            .is_some_and(|value| value.to_string().to_lowercase() == expected.to_lowercase()),
        Predicate::AtMost(bound) => number(value).is_some_and(|n| n <= *bound),
        Predicate::Below(bound) => number(value).is_some_and(|n| n < *bound),
        Predicate::AtLeast(bound) => number(value).is_some_and(|n| n >= *bound),
        Predicate::Above(bound) => number(value).is_some_and(|n| n > *bound),
        Predicate::AnyNumber => number(value).is_some(),
    }
}

fn number(value: Option<&CellValue>) -> Option<f64> {
    value.and_then(CellValue::as_number)
}

/// Band key selected by `policy` for `value`: first matching rule, else the
/// policy fallback.
pub fn classify_key<'p>(value: Option<&CellValue>, policy: &'p ClassificationPolicy) -> &'p str {
    policy
        .rules
        .iter()
        .find(|rule| matches(&rule.when, value))
        .map_or(policy.fallback.as_str(), |rule| rule.band.as_str())
}

/// Classifies `value` and resolves the band's style.
///
/// A band without a style resolves to the fallback band's style. If the
/// fallback band has no style either, a neutral style labelled with the band
/// key is used, so classification always yields a renderable band.
pub fn classify(
    value: Option<&CellValue>,
    policy: &ClassificationPolicy,
    styles: &StyleMap,
) -> StatusBand {
    let key = classify_key(value, policy);
    if let Some(style) = styles.get(key) {
        return StatusBand::from_style(key, style);
    }
    trace!(band = key, fallback = %policy.fallback, "band has no style, using fallback");
    let fallback = policy.fallback.as_str();
    match styles.get(fallback) {
        Some(style) => StatusBand::from_style(fallback, style),
        None => StatusBand::from_style(fallback, &StatusStyle::new(fallback, "gray")),
    }
}
