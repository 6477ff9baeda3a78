//! Label to lookup-key normalization.

/// Normalizes a free-text label into a lookup key.
///
/// Surrounding whitespace is trimmed, internal whitespace runs collapse to a
/// single `_`, and the result is lowercased. Whitespace-only input yields an
/// empty key. Applying it twice changes nothing.
///
/// # Examples
///
/// ```
/// use hdash_core::normalize::normalize_key;
///
/// assert_eq!(normalize_key("  ANC   Coverage "), "anc_coverage");
/// assert_eq!(normalize_key("Density/10,000"), "density/10,000");
/// assert_eq!(normalize_key("   "), "");
/// ```
pub fn normalize_key(label: &str) -> String {
    label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Normalizes an optional label, dropping labels that normalize to nothing.
pub fn normalize_label(label: Option<&str>) -> Option<String> {
    let key = normalize_key(label?);
    if key.is_empty() { None } else { Some(key) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_whitespace() {
        assert_eq!(normalize_key("Skilled\tBirth \n Attendance"), "skilled_birth_attendance");
    }

    #[test]
    fn idempotent_on_normalized_keys() {
        let once = normalize_key(" Health  Facilities ");
        assert_eq!(normalize_key(&once), once);
    }

    #[test]
    fn empty_and_missing_labels_are_dropped() {
        assert_eq!(normalize_label(None), None);
        assert_eq!(normalize_label(Some("")), None);
        assert_eq!(normalize_label(Some(" \t ")), None);
        assert_eq!(normalize_label(Some("Immunization")), Some("immunization".to_string()));
    }
}
