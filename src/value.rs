//! Semantic values produced by matchers
//!
//! Grammars are declared as data, so the values flowing out of them share one
//! dynamic shape instead of a per-grammar type. Transform functions receive
//! and return `Value`; a hosting program extracts what it needs through the
//! accessors or through the JSON bridge.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Named results collected while a sequence runs, keyed by capture name
pub type Bindings = BTreeMap<String, Value>;

/// The result of a successful match, after transforms have been applied.
///
/// `Absent` stands for "nothing was there": `optional` produces it when its
/// inner matcher fails and `not` produces it when the lookahead succeeds.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Absent,
    Text(String),
    Number(f64),
    Seq(Vec<Value>),
    Record(Bindings),
}

impl Value {
    /// Build a text value
    pub fn text(text: impl Into<String>) -> Value {
        Value::Text(text.into())
    }

    /// Build a number value
    pub fn number(number: impl Into<f64>) -> Value {
        Value::Number(number.into())
    }

    /// Build a sequence value
    pub fn seq(items: impl IntoIterator<Item = Value>) -> Value {
        Value::Seq(items.into_iter().collect())
    }

    /// Build a record value from (name, value) pairs
    pub fn record<N: Into<String>>(fields: impl IntoIterator<Item = (N, Value)>) -> Value {
        Value::Record(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Bindings> {
        match self {
            Value::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Take the items out of a sequence value
    pub fn into_seq(self) -> Option<Vec<Value>> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Concatenate all text found in this value, depth first.
    ///
    /// The usual way to turn a repetition over characters back into a string:
    /// `Seq([Text("a"), Text("b")])` becomes `"ab"`. Absent and number values
    /// contribute nothing.
    pub fn join_text(&self) -> String {
        match self {
            Value::Text(text) => text.clone(),
            Value::Seq(items) => items.iter().map(Value::join_text).collect(),
            _ => String::new(),
        }
    }

    /// Convert to a `serde_json::Value` with the natural mapping.
    ///
    /// Absent maps to null; a non-finite number maps to null as well since
    /// JSON cannot represent it.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Absent => serde_json::Value::Null,
            Value::Text(text) => serde_json::Value::String(text.clone()),
            Value::Number(number) => serde_json::Number::from_f64(*number)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Seq(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Record(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(name, value)| (name.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Value {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Value {
        Value::Text(text)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Value {
        Value::Number(number)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Value {
        Value::Seq(items)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Absent => serializer.serialize_unit(),
            Value::Text(text) => serializer.serialize_str(text),
            Value::Number(number) => serializer.serialize_f64(*number),
            Value::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Record(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, value) in fields {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}
