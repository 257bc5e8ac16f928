// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Observation value model.
//!
//! Provides the payload representation shared by observations and output
//! records. Payloads are either a scalar or an insertion-ordered map of
//! entries; tables are maps whose values are themselves maps.
//!
//! Both types serialize to plain JSON (scalars and objects) and keep the key
//! order of the source when deserialized.

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Value reported by MTConnect when a data item has no known value.
pub const UNAVAILABLE: &str = "UNAVAILABLE";

/// Payload of an observation.
///
/// Scalars carry VALUE observations and DATA_SET entries. The `Entries`
/// variant carries DATA_SET payloads (key -> scalar) and TABLE payloads
/// (key -> entries).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ObservationValue {
    /// No value supplied
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    /// Ordered key/value map
    Entries(Entries),
}

impl ObservationValue {
    // ========================================================================
    // Type Checking Predicates
    // ========================================================================

    /// Check if this value is a scalar (anything but a map).
    pub fn is_scalar(&self) -> bool {
        !matches!(self, ObservationValue::Entries(_))
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, ObservationValue::Null)
    }

    /// Check if this value is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ObservationValue::Integer(_) | ObservationValue::Float(_)
        )
    }

    /// Check if this value is a NaN or infinite float.
    ///
    /// JSON has no encoding for these; they serialize as `null`.
    pub fn is_non_finite(&self) -> bool {
        matches!(self, ObservationValue::Float(v) if !v.is_finite())
    }

    /// Check if this value is the `UNAVAILABLE` marker.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ObservationValue::Text(s) if s == UNAVAILABLE)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Try to get the inner text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ObservationValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ObservationValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to convert this value to i64 (integers only).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ObservationValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to convert this value to f64 (numeric values only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ObservationValue::Integer(v) => Some(*v as f64),
            ObservationValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get the inner entries.
    pub fn as_entries(&self) -> Option<&Entries> {
        match self {
            ObservationValue::Entries(e) => Some(e),
            _ => None,
        }
    }

    /// Consume the value, returning the inner entries if it is a map.
    pub fn into_entries(self) -> Option<Entries> {
        match self {
            ObservationValue::Entries(e) => Some(e),
            _ => None,
        }
    }

    /// Get the kind of this value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            ObservationValue::Null => "null",
            ObservationValue::Bool(_) => "bool",
            ObservationValue::Integer(_) => "integer",
            ObservationValue::Float(_) => "float",
            ObservationValue::Text(_) => "text",
            ObservationValue::Entries(_) => "entries",
        }
    }

    /// The `UNAVAILABLE` marker as a value.
    pub fn unavailable() -> Self {
        ObservationValue::Text(UNAVAILABLE.to_string())
    }
}

impl fmt::Display for ObservationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObservationValue::Null => write!(f, "null"),
            ObservationValue::Bool(v) => write!(f, "{v}"),
            ObservationValue::Integer(v) => write!(f, "{v}"),
            ObservationValue::Float(v) => write!(f, "{v}"),
            ObservationValue::Text(v) => write!(f, "{v}"),
            ObservationValue::Entries(e) => {
                write!(f, "{{")?;
                for (i, (key, value)) in e.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for ObservationValue {
    fn from(v: &str) -> Self {
        ObservationValue::Text(v.to_string())
    }
}

impl From<String> for ObservationValue {
    fn from(v: String) -> Self {
        ObservationValue::Text(v)
    }
}

impl From<i64> for ObservationValue {
    fn from(v: i64) -> Self {
        ObservationValue::Integer(v)
    }
}

impl From<i32> for ObservationValue {
    fn from(v: i32) -> Self {
        ObservationValue::Integer(v as i64)
    }
}

impl From<f64> for ObservationValue {
    fn from(v: f64) -> Self {
        ObservationValue::Float(v)
    }
}

impl From<bool> for ObservationValue {
    fn from(v: bool) -> Self {
        ObservationValue::Bool(v)
    }
}

impl From<Entries> for ObservationValue {
    fn from(v: Entries) -> Self {
        ObservationValue::Entries(v)
    }
}

/// Non-finite floats serialize as `null` (serde_json's behaviour) and read
/// back as [`ObservationValue::Null`]. Record builders replace them with
/// `UNAVAILABLE`, so projected documents never contain them.
impl Serialize for ObservationValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ObservationValue::Null => serializer.serialize_unit(),
            ObservationValue::Bool(v) => serializer.serialize_bool(*v),
            ObservationValue::Integer(v) => serializer.serialize_i64(*v),
            ObservationValue::Float(v) => serializer.serialize_f64(*v),
            ObservationValue::Text(v) => serializer.serialize_str(v),
            ObservationValue::Entries(e) => e.serialize(serializer),
        }
    }
}

struct ObservationValueVisitor;

impl<'de> Visitor<'de> for ObservationValueVisitor {
    type Value = ObservationValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a scalar or a map of entries")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(ObservationValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(ObservationValue::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        match i64::try_from(v) {
            Ok(v) => Ok(ObservationValue::Integer(v)),
            Err(_) => Ok(ObservationValue::Float(v as f64)),
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(ObservationValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(ObservationValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(ObservationValue::Text(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ObservationValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ObservationValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        ObservationValue::deserialize(deserializer)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        EntriesVisitor.visit_map(map).map(ObservationValue::Entries)
    }
}

impl<'de> Deserialize<'de> for ObservationValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ObservationValueVisitor)
    }
}

/// Insertion-ordered key/value map.
///
/// DATA_SET and TABLE payloads must keep the key order given by the device,
/// so this is a vector of pairs rather than a hash map. Inserting an existing
/// key replaces the value and keeps the original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entries {
    items: Vec<(String, ObservationValue)>,
}

impl Entries {
    /// Create an empty map.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Insert a value, returning the previous value for the key if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ObservationValue>,
    ) -> Option<ObservationValue> {
        let key = key.into();
        let value = value.into();
        match self.items.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.items.push((key, value));
                None
            }
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ObservationValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&ObservationValue> {
        self.items.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Check if a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ObservationValue)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<ObservationValue>> FromIterator<(K, V)> for Entries {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entries = Entries::new();
        for (k, v) in iter {
            entries.insert(k, v);
        }
        entries
    }
}

impl IntoIterator for Entries {
    type Item = (String, ObservationValue);
    type IntoIter = std::vec::IntoIter<(String, ObservationValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl Serialize for Entries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for (key, value) in &self.items {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct EntriesVisitor;

impl<'de> Visitor<'de> for EntriesVisitor {
    type Value = Entries;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of entries")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Entries::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, ObservationValue>()? {
            entries.insert(key, value);
        }
        Ok(entries)
    }
}

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EntriesVisitor)
    }
}
