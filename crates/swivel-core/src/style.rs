//! Style values and ordered style maps.
//!
//! A [`StyleMap`] describes a single point-in-time visual state as an ordered
//! mapping from property name to a scalar value. Insertion order defines
//! declaration order; the engine never reorders properties, so maps built the
//! same way serialize the same way.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single scalar style value.
///
/// Property values are either numeric (opacity, sizes in implicit units) or
/// textual (colors, lengths with units, keywords). The engine does not
/// validate values; malformed values are the host styling layer's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// Numeric value.
    Number(f64),
    /// Textual value (e.g. `"10px"`, `"red"`).
    Text(String),
}

impl StyleValue {
    /// Try to extract a numeric value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    /// Try to extract a textual value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(value) => Some(value),
        }
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// An ordered mapping from property name to scalar value.
///
/// Represents a flat visual state: the `from`/`to` endpoints of a transition
/// request, the final styles extracted from a keyframe sequence, or the
/// argument to the host's style-application primitive. No duplicate keys;
/// setting a property again overwrites in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleMap {
    properties: IndexMap<String, StyleValue>,
}

impl StyleMap {
    /// Create an empty style map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property value, builder style.
    pub fn set(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(property, value);
        self
    }

    /// Set a property value in place.
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<StyleValue>) {
        self.properties.insert(property.into(), value.into());
    }

    /// Get a property value.
    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.properties.get(property)
    }

    /// Check whether a property is declared.
    pub fn contains(&self, property: &str) -> bool {
        self.properties.contains_key(property)
    }

    /// Iterate over properties in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of declared properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Check whether the map declares no properties.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_value_accessors() {
        let v: StyleValue = 0.5.into();
        assert_eq!(v.as_number(), Some(0.5));
        assert_eq!(v.as_text(), None);

        let v: StyleValue = "10px".into();
        assert_eq!(v.as_text(), Some("10px"));
        assert_eq!(v.as_number(), None);
    }

    #[test]
    fn test_style_map_preserves_declaration_order() {
        let map = StyleMap::new()
            .set("width", "10px")
            .set("color", "red")
            .set("opacity", 1.0);

        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["width", "color", "opacity"]);
    }

    #[test]
    fn test_style_map_overwrites_in_place() {
        let map = StyleMap::new()
            .set("color", "red")
            .set("width", "10px")
            .set("color", "blue");

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("color"), Some(&StyleValue::Text("blue".into())));
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["color", "width"]);
    }

    #[test]
    fn test_style_map_serializes_as_plain_object() {
        let map = StyleMap::new().set("opacity", 0.0).set("color", "red");
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"opacity":0.0,"color":"red"}"#);
    }
}
