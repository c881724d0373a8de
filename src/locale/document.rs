use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, MapAccess, Visitor},
};
use serde_json::{Map, Value, ser::PrettyFormatter};

use crate::error::{Error, Result};

pub const DEFAULT_INDENT: &str = "    ";

/// Ordered key → value mapping of one locale file.
///
/// Backed by a `serde_json::Map` with `preserve_order`, so entries keep the
/// order they were loaded or appended in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocaleDocument {
    entries: Map<String, Value>,
}

impl LocaleDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a locale file. Blank content is an empty document.
    ///
    /// A key repeated at the top level is rejected rather than letting the
    /// last occurrence win.
    pub fn parse(locale: &str, text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }

        let value: Value = serde_json::from_str(text).map_err(|e| Error::InvalidDocument {
            locale: locale.to_string(),
            reason: e.to_string(),
        })?;

        if !value.is_object() {
            return Err(Error::InvalidDocument {
                locale: locale.to_string(),
                reason: format!("root must be an object, found {}", json_type(&value)),
            });
        }

        let UniqueEntries(entries) =
            serde_json::from_str(text).map_err(|e| Error::InvalidDocument {
                locale: locale.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Stored value when it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Append `key` at the end. Existing keys are never touched.
    ///
    /// Returns false if the key was already present.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, Value::String(value.into()));
        true
    }

    /// Pretty-print with `indent` and a trailing newline.
    ///
    /// Non-ASCII characters and `/` are written unescaped.
    pub fn to_json_string(&self, indent: &str) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.entries.serialize(&mut serializer)?;
        buf.push(b'\n');
        // serde_json only emits valid UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Top-level object that fails on a repeated key.
struct UniqueEntries(Map<String, Value>);

impl<'de> Deserialize<'de> for UniqueEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(UniqueEntriesVisitor)
    }
}

struct UniqueEntriesVisitor;

impl<'de> Visitor<'de> for UniqueEntriesVisitor {
    type Value = UniqueEntries;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<UniqueEntries, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Map::new();
        while let Some(key) = access.next_key::<String>()? {
            if entries.contains_key(&key) {
                return Err(de::Error::custom(format!("duplicate key \"{}\"", key)));
            }
            let value: Value = access.next_value()?;
            entries.insert(key, value);
        }
        Ok(UniqueEntries(entries))
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
