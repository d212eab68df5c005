//! # Dynamic Attribute Values
//!
//! Remote resources are schemaless from the client's point of view: the API may add
//! fields at any time, and nested objects come back as plain JSON. Instead of generating
//! a struct per payload, every [`Resource`](crate::framework::Resource) carries an
//! [`Attributes`] map whose values are the tagged union [`Value`].
//!
//! Typed accessors for well-known fields are layered on top per resource kind
//! (see [`crate::model`]).

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Ordered mapping from attribute name to value.
pub type Attributes = BTreeMap<String, Value>;

/// A single attribute value as decoded from the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(Attributes),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of the value; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Attributes> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Converts back into a `serde_json::Value` for transmission.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Integer(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Attributes> for Value {
    fn from(map: Attributes) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

/// Builds an [`Attributes`] map from a JSON object.
///
/// Returns `None` when `json` is not an object.
///
/// ```
/// use blockscore::framework::{to_attributes, Value};
/// use serde_json::json;
///
/// let attrs = to_attributes(json!({ "answer": "yes", "score": 80 })).unwrap();
/// assert_eq!(attrs["answer"], Value::from("yes"));
/// assert_eq!(attrs["score"].as_i64(), Some(80));
/// ```
pub fn to_attributes(json: serde_json::Value) -> Option<Attributes> {
    match Value::from(json) {
        Value::Map(map) => Some(map),
        _ => None,
    }
}

/// Serializes typed request parameters into [`Attributes`].
///
/// `params` must serialize to a JSON object.
pub fn serialize_params<T: Serialize>(params: &T) -> Result<Attributes, Error> {
    let json = serde_json::to_value(params).map_err(|e| Error::InvalidParams(e.to_string()))?;
    to_attributes(json).ok_or_else(|| Error::InvalidParams("expected a JSON object".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_json_becomes_tagged_values() {
        let attrs = to_attributes(json!({
            "id": "p_1",
            "livemode": false,
            "score": 87.5,
            "question_sets": ["qs_1", "qs_2"],
            "details": { "ofac": "no_match" },
            "note": null
        }))
        .unwrap();

        assert_eq!(attrs["id"].as_str(), Some("p_1"));
        assert_eq!(attrs["livemode"].as_bool(), Some(false));
        assert_eq!(attrs["score"].as_f64(), Some(87.5));
        assert_eq!(attrs["question_sets"].as_list().map(<[Value]>::len), Some(2));
        assert_eq!(
            attrs["details"].as_map().and_then(|m| m["ofac"].as_str()),
            Some("no_match")
        );
        assert!(attrs["note"].is_null());
    }

    #[test]
    fn test_to_attributes_rejects_non_objects() {
        assert!(to_attributes(json!(["a", "b"])).is_none());
        assert!(to_attributes(json!("a")).is_none());
    }

    #[test]
    fn test_serializes_without_tags() {
        let mut attrs = Attributes::new();
        attrs.insert("answer".into(), Value::from("yes"));
        attrs.insert("count".into(), Value::from(3));
        attrs.insert("person_id".into(), Value::from(None::<String>));

        let json = serde_json::to_value(&attrs).unwrap();
        assert_eq!(json, json!({ "answer": "yes", "count": 3, "person_id": null }));
    }

    #[test]
    fn test_serialize_params_requires_object() {
        #[derive(Serialize)]
        struct Answer {
            question_id: i64,
            answer_id: i64,
        }

        let attrs = serialize_params(&Answer { question_id: 1, answer_id: 3 }).unwrap();
        assert_eq!(attrs["answer_id"].as_i64(), Some(3));
        assert!(matches!(serialize_params(&vec![1, 2]), Err(Error::InvalidParams(_))));
    }

    #[test]
    fn test_integers_widen_to_f64() {
        assert_eq!(Value::from(4).as_f64(), Some(4.0));
        assert_eq!(Value::from(4.5).as_i64(), None);
    }
}
