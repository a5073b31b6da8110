//! Non-pixel image attributes
//!
//! Attributes are kept in key order so that anything serialized from
//! them (headers, debug dumps) is deterministic.

use std::collections::BTreeMap;
use std::fmt;

/// Attribute value stored in image metadata.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f64),
    /// String value
    String(String),
}

impl AttrValue {
    /// Returns this value as an integer, if applicable.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns this value as a float, if applicable.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::String(_) => None,
        }
    }

    /// Returns this value as a string, if applicable.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

/// Key/value attribute map attached to an image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    attrs: BTreeMap<String, AttrValue>,
}

impl Metadata {
    /// Create an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Get an attribute.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    /// Get a string attribute.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AttrValue::as_str)
    }

    /// Get an integer attribute.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(AttrValue::as_int)
    }

    /// Remove an attribute, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.attrs.remove(key)
    }

    /// Whether an attribute is present.
    pub fn contains(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Iterate attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get() {
        let mut md = Metadata::new();
        md.set("Artist", "someone");
        md.set("rla:FrameNumber", 12i64);
        md.set("gamma", 2.2f64);
        assert_eq!(md.get_str("Artist"), Some("someone"));
        assert_eq!(md.get_int("rla:FrameNumber"), Some(12));
        assert_eq!(md.get("gamma").and_then(AttrValue::as_float), Some(2.2));
        assert_eq!(md.get_int("Artist"), None);
        assert_eq!(md.len(), 3);
    }

    #[test]
    fn test_iteration_is_key_ordered() {
        let mut md = Metadata::new();
        md.set("b", 1i64);
        md.set("a", 2i64);
        md.set("c", 3i64);
        let keys: Vec<&str> = md.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b", "c"]);
    }

    #[test]
    fn test_replace_and_remove() {
        let mut md = Metadata::new();
        md.set("k", "v1");
        md.set("k", "v2");
        assert_eq!(md.get_str("k"), Some("v2"));
        assert_eq!(md.remove("k"), Some(AttrValue::String("v2".into())));
        assert!(md.is_empty());
    }
}
