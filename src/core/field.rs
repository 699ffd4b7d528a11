//! Scalar field values and request payloads

use crate::core::error::RequestError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A scalar value carried by a request field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl FieldValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// String form used for pattern matching (`Null` is the empty string)
    pub fn string_form(&self) -> String {
        match self {
            FieldValue::String(s) => s.clone(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::Null => String::new(),
        }
    }

    /// Convert a JSON value, rejecting arrays and objects
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(FieldValue::Null),
            Value::Bool(b) => Some(FieldValue::Boolean(b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(FieldValue::Integer(i)),
                None => n.as_f64().map(FieldValue::Float),
            },
            Value::String(s) => Some(FieldValue::String(s)),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            other => write!(f, "{}", other.string_form()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

/// Decoded request data: a flat, ordered map of field name to scalar value
///
/// Built once per request from a JSON body or a query string and dropped
/// after the handler is done with it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Payload(IndexMap<String, FieldValue>);

impl Payload {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Decode a JSON document into a payload
    ///
    /// The document must be an object whose values are all scalars.
    pub fn from_json(value: Value) -> Result<Self, RequestError> {
        let Value::Object(map) = value else {
            return Err(RequestError::InvalidBody {
                message: "expected a JSON object".to_string(),
            });
        };

        let mut payload = Self::new();
        for (key, value) in map {
            let field = FieldValue::from_json(value).ok_or_else(|| RequestError::InvalidBody {
                message: format!("field '{}' must be a scalar value", key),
            })?;
            payload.insert(key, field);
        }
        Ok(payload)
    }

    /// Build a payload from decoded query-string pairs
    ///
    /// Values are strings, except an empty value (`?sortField=`) which is
    /// `Null`. A repeated key keeps its last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut payload = Self::new();
        for (key, value) in pairs {
            let value = value.into();
            let field = if value.is_empty() {
                FieldValue::Null
            } else {
                FieldValue::String(value)
            };
            payload.insert(key.into(), field);
        }
        payload
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for Payload {
    fn from_iter<T: IntoIterator<Item = (K, FieldValue)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
