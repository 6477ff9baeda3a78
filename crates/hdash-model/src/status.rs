//! Status bands and their visual styles.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Display label and accent identifier for one band.
///
/// Accents are symbolic color names (`green`, `red`, `gray`, ...); each
/// presentation layer maps them onto its own palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusStyle {
    pub label: String,
    pub accent: String,
}

impl StatusStyle {
    pub fn new(label: impl Into<String>, accent: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            accent: accent.into(),
        }
    }
}

/// A resolved classification outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBand {
    pub key: String,
    pub label: String,
    pub accent: String,
}

impl StatusBand {
    pub fn from_style(key: impl Into<String>, style: &StatusStyle) -> Self {
        Self {
            key: key.into(),
            label: style.label.clone(),
            accent: style.accent.clone(),
        }
    }
}

/// Band key to style, in declaration order.
///
/// Order drives legend order, so entries are kept as a list. Keys are
/// unique: inserting an existing key replaces its style in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: Vec<(String, StatusStyle)>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, style: StatusStyle) {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, existing)) => *existing = style,
            None => self.entries.push((key, style)),
        }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, style: StatusStyle) -> Self {
        self.insert(key, style);
        self
    }

    pub fn get(&self, key: &str) -> Option<&StatusStyle> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, style)| style)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Overrides layered over `self`: override wins per band, bands only
    /// present in `overrides` are appended in their own order.
    #[must_use]
    pub fn merged(&self, overrides: &StyleMap) -> StyleMap {
        let mut merged = self.clone();
        for (key, style) in &overrides.entries {
            merged.insert(key.clone(), style.clone());
        }
        merged
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StatusStyle)> {
        self.entries.iter().map(|(key, style)| (key.as_str(), style))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, StatusStyle)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, StatusStyle)>>(iter: I) -> Self {
        let mut map = StyleMap::new();
        for (key, style) in iter {
            map.insert(key, style);
        }
        map
    }
}

impl Serialize for StyleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, style) in &self.entries {
            map.serialize_entry(key, style)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StyleMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StyleMapVisitor)
    }
}

struct StyleMapVisitor;

impl<'de> Visitor<'de> for StyleMapVisitor {
    type Value = StyleMap;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of band keys to {label, accent} styles")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = StyleMap::new();
        while let Some((key, style)) = access.next_entry::<String, StatusStyle>()? {
            map.insert(key, style);
        }
        Ok(map)
    }
}
