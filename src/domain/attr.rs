//! Structured key/value attributes carried by log records.

use serde_json::{Map, Number, Value as JsonValue};

/// A single attribute value.
///
/// Groups nest other attributes and render as nested JSON objects.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Group(Vec<Attr>),
}

impl Value {
    /// Returns the string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the nested attributes, if this is a group.
    pub fn as_group(&self) -> Option<&[Attr]> {
        match self {
            Value::Group(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Int(i) => JsonValue::Number((*i).into()),
            Value::Uint(u) => JsonValue::Number((*u).into()),
            // NaN and infinities have no JSON form
            Value::Float(f) => Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Group(attrs) => attrs_to_json(attrs),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Uint(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

/// A named attribute attached to a logger handle or a single record.
///
/// # Examples
///
/// ```
/// use httplog::domain::attr::Attr;
///
/// let attr = Attr::group("status", vec![Attr::uint("code", 200), Attr::string("msg", "OK")]);
/// assert_eq!(attr.to_json_pair().1["code"], 200);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, Value::String(value.into()))
    }

    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, Value::Int(value))
    }

    pub fn uint(key: impl Into<String>, value: u64) -> Self {
        Self::new(key, Value::Uint(value))
    }

    pub fn float(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, Value::Float(value))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, Value::Bool(value))
    }

    pub fn group(key: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self::new(key, Value::Group(attrs))
    }

    pub fn to_json_pair(&self) -> (String, JsonValue) {
        (self.key.clone(), self.value.to_json())
    }
}

/// Renders an attribute list as a JSON object.
///
/// A later attribute with the same key replaces an earlier one.
pub fn attrs_to_json(attrs: &[Attr]) -> JsonValue {
    let mut map = Map::with_capacity(attrs.len());
    for attr in attrs {
        map.insert(attr.key.clone(), attr.value.to_json());
    }
    JsonValue::Object(map)
}

/// Looks up an attribute by key, the last occurrence winning.
pub fn find<'a>(attrs: &'a [Attr], key: &str) -> Option<&'a Attr> {
    attrs.iter().rev().find(|a| a.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_renders_nested_object() {
        let attrs = vec![
            Attr::string("id", "abc"),
            Attr::group(
                "response",
                vec![
                    Attr::uint("size", 42),
                    Attr::group(
                        "status",
                        vec![Attr::uint("code", 200), Attr::string("msg", "OK")],
                    ),
                ],
            ),
        ];

        assert_eq!(
            attrs_to_json(&attrs),
            json!({
                "id": "abc",
                "response": { "size": 42, "status": { "code": 200, "msg": "OK" } }
            })
        );
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let attrs = vec![Attr::string("k", "first"), Attr::string("k", "second")];

        assert_eq!(attrs_to_json(&attrs), json!({ "k": "second" }));
        assert_eq!(find(&attrs, "k").unwrap().value.as_str(), Some("second"));
    }

    #[test]
    fn test_non_finite_float_renders_null() {
        assert_eq!(Value::Float(f64::NAN).to_json(), JsonValue::Null);
        assert_eq!(Value::Float(1.5).to_json(), json!(1.5));
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from("x"), Value::String("x".to_string()));
        assert_eq!(Value::from(-3i64), Value::Int(-3));
        assert_eq!(Value::from(3u64), Value::Uint(3));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert!(Value::from(1.0).as_group().is_none());
    }
}
