//! Classification policies: ordered predicate rules with a fallback band.

use serde::{Deserialize, Serialize};

/// Test applied to a raw cell value.
///
/// Numeric predicates never match values that do not parse as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "camelCase")]
pub enum Predicate {
    Equals(String),
    EqualsIgnoreCase(String),
    AtMost(f64),
    Below(f64),
    AtLeast(f64),
    Above(f64),
    /// Any value that parses as a number.
    AnyNumber,
    /// Any non-blank value.
    Present,
    /// Matches everything, including absent values.
    Always,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRule {
    pub when: Predicate,
    pub band: String,
}

/// Rules evaluated top to bottom; first match wins, otherwise `fallback`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationPolicy {
    #[serde(default)]
    pub rules: Vec<PolicyRule>,
    pub fallback: String,
}

impl ClassificationPolicy {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            fallback: fallback.into(),
        }
    }

    #[must_use]
    pub fn rule(mut self, when: Predicate, band: impl Into<String>) -> Self {
        self.rules.push(PolicyRule {
            when,
            band: band.into(),
        });
        self
    }

    /// Case-insensitive "yes" maps to `yes`; everything else, absent
    /// included, maps to `no`.
    pub fn yes_no() -> Self {
        Self::new("no").rule(Predicate::EqualsIgnoreCase("yes".to_string()), "yes")
    }

    /// Values equal to one of `keys` map to that band.
    pub fn enumerated<I, S>(keys: I, fallback: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut policy = Self::new(fallback);
        for key in keys {
            let key = key.into();
            policy = policy.rule(Predicate::Equals(key.clone()), key);
        }
        policy
    }

    /// Maps an extra literal onto an existing band.
    #[must_use]
    pub fn alias(self, literal: impl Into<String>, band: impl Into<String>) -> Self {
        self.rule(Predicate::Equals(literal.into()), band)
    }

    /// Ordered numeric bounds; numbers past every bound land in `otherwise`,
    /// unparseable values in `fallback`.
    pub fn thresholds<I, S>(
        bounds: I,
        otherwise: impl Into<String>,
        fallback: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = (Predicate, S)>,
        S: Into<String>,
    {
        let mut policy = Self::new(fallback);
        for (when, band) in bounds {
            policy = policy.rule(when, band);
        }
        policy.rule(Predicate::AnyNumber, otherwise)
    }

    /// Every band key this policy can produce, in rule order, fallback last.
    pub fn band_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !keys.contains(&rule.band.as_str()) {
                keys.push(&rule.band);
            }
        }
        if !keys.contains(&self.fallback.as_str()) {
            keys.push(&self.fallback);
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_end_with_any_number_rule() {
        let policy = ClassificationPolicy::thresholds(
            [(Predicate::AtMost(0.5), "critical"), (Predicate::Below(5.0), "warning")],
            "safe",
            "unknown",
        );
        assert_eq!(policy.rules.len(), 3);
        assert_eq!(policy.rules[2].when, Predicate::AnyNumber);
        assert_eq!(policy.band_keys(), vec!["critical", "warning", "safe", "unknown"]);
    }

    #[test]
    fn predicate_json_shape() {
        let json = serde_json::to_string(&Predicate::AtMost(0.5)).expect("serialize");
        assert_eq!(json, r#"{"op":"atMost","value":0.5}"#);
        let any: Predicate = serde_json::from_str(r#"{"op":"anyNumber"}"#).expect("deserialize");
        assert_eq!(any, Predicate::AnyNumber);
    }
}
