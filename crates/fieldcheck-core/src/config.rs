//! Schema configuration model
//!
//! A schema configuration maps field names to field configurations, and a
//! field configuration maps constraint keys to argument lists whose last
//! element is the error message:
//!
//! ```json
//! {
//!   "name": {
//!     "type": ["string", "The name must be a string"],
//!     "required": ["The name is required"],
//!     "min": [2, "The name must consist of 2 characters minimum"]
//!   }
//! }
//! ```
//!
//! Both levels are stored as ordered lists of pairs. Constraints run in the
//! order they are declared, so deserialization keeps document order instead
//! of relying on the iteration order of a map type.
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// Key selecting the declared type of a field
pub const TYPE_KEY: &str = "type";

/// Key marking a field as mandatory
pub const REQUIRED_KEY: &str = "required";

/// Key reserved for the implicit optional marker
pub const OPTIONAL_KEY: &str = "optional";

/// Ordered constraint declarations for a single field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldConfig {
    rules: Vec<(String, Vec<Value>)>,
}

impl FieldConfig {
    /// Create an empty field configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule; re-declaring a key replaces its arguments in place
    pub fn rule<K: Into<String>>(mut self, key: K, args: Vec<Value>) -> Self {
        self.insert(key.into(), args);
        self
    }

    fn insert(&mut self, key: String, args: Vec<Value>) {
        match self.rules.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = args,
            None => self.rules.push((key, args)),
        }
    }

    /// Arguments declared for a key
    pub fn get(&self, key: &str) -> Option<&[Value]> {
        self.rules
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, args)| args.as_slice())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All rules in declaration order
    pub fn rules(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.rules
            .iter()
            .map(|(key, args)| (key.as_str(), args.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<(String, Vec<Value>)> for FieldConfig {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Value>)>>(iter: I) -> Self {
        let mut config = Self::new();
        for (key, args) in iter {
            config.insert(key, args);
        }
        config
    }
}

/// Ordered field configurations for a whole schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaConfig {
    fields: Vec<(String, FieldConfig)>,
}

impl SchemaConfig {
    /// Create an empty schema configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field; re-declaring a field replaces its configuration in place
    pub fn field<N: Into<String>>(mut self, name: N, config: FieldConfig) -> Self {
        self.insert(name.into(), config);
        self
    }

    fn insert(&mut self, name: String, config: FieldConfig) {
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = config,
            None => self.fields.push((name, config)),
        }
    }

    /// Parse a schema configuration from a JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| Error::json("Failed to parse schema configuration", e))
    }

    /// Parse a schema configuration from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| Error::json("Failed to parse schema configuration", e))
    }

    pub fn get(&self, name: &str) -> Option<&FieldConfig> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, config)| config)
    }

    /// All fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldConfig)> {
        self.fields
            .iter()
            .map(|(name, config)| (name.as_str(), config))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, FieldConfig)> for SchemaConfig {
    fn from_iter<I: IntoIterator<Item = (String, FieldConfig)>>(iter: I) -> Self {
        let mut config = Self::new();
        for (name, field) in iter {
            config.insert(name, field);
        }
        config
    }
}

/// Visitor collecting map entries in the order the deserializer yields them
struct OrderedEntries<V> {
    expecting: &'static str,
    marker: PhantomData<V>,
}

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedEntries<V> {
    type Value = Vec<(String, V)>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.expecting)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            entries.push((key, value));
        }
        Ok(entries)
    }
}

impl<'de> Deserialize<'de> for FieldConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = deserializer.deserialize_map(OrderedEntries::<Vec<Value>> {
            expecting: "a map of constraint keys to argument lists",
            marker: PhantomData,
        })?;
        Ok(entries.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for SchemaConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = deserializer.deserialize_map(OrderedEntries::<FieldConfig> {
            expecting: "a map of field names to field configurations",
            marker: PhantomData,
        })?;
        Ok(entries.into_iter().collect())
    }
}

impl Serialize for FieldConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rules.len()))?;
        for (key, args) in &self.rules {
            map.serialize_entry(key, args)?;
        }
        map.end()
    }
}

impl Serialize for SchemaConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, config) in &self.fields {
            map.serialize_entry(name, config)?;
        }
        map.end()
    }
}
