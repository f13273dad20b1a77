//! A single finalized log record.

use serde_json::{Value as JsonValue, json};

use crate::domain::attr::{self, Attr};
use crate::domain::severity::Severity;

/// A leveled, keyed record handed to a [`crate::domain::sink::LogSink`].
///
/// `attrs` holds the logger's accumulated attributes followed by any
/// attributes passed to the emitting call.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub severity: Severity,
    pub message: String,
    pub attrs: Vec<Attr>,
}

impl Record {
    pub fn new(severity: Severity, message: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self {
            severity,
            message: message.into(),
            attrs,
        }
    }

    /// Top-level attribute by key.
    pub fn attr(&self, key: &str) -> Option<&Attr> {
        attr::find(&self.attrs, key)
    }

    /// Attribute object only, without level or message.
    pub fn attrs_json(&self) -> JsonValue {
        attr::attrs_to_json(&self.attrs)
    }

    /// Full JSON line form: `level`, `msg`, then the attributes.
    pub fn to_json(&self) -> JsonValue {
        let mut line = json!({
            "level": self.severity.as_str(),
            "msg": self.message,
        });
        if let (Some(obj), JsonValue::Object(attrs)) = (line.as_object_mut(), self.attrs_json()) {
            obj.extend(attrs);
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json_flattens_attrs() {
        let record = Record::new(
            Severity::Warn,
            "404 Not Found",
            vec![Attr::string("id", "req-1"), Attr::group("response", vec![Attr::uint("size", 0)])],
        );

        let line = record.to_json();
        assert_eq!(line["level"], "WARN");
        assert_eq!(line["msg"], "404 Not Found");
        assert_eq!(line["id"], "req-1");
        assert_eq!(line["response"]["size"], 0);
    }

    #[test]
    fn test_attr_lookup() {
        let record = Record::new(Severity::Info, "ok", vec![Attr::bool("cached", true)]);

        assert!(record.attr("cached").is_some());
        assert!(record.attr("missing").is_none());
    }
}
