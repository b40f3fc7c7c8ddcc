//! Read-only access to a submitted form snapshot.

use serde_json::Value;

/// A submitted form: camelCase field name to JSON value.
pub type FormData = serde_json::Map<String, Value>;

/// Shape of one field's value as seen by the validators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Absent, `null`, or a blank string.
    Missing,
    /// A non-blank string, trimmed.
    Text(&'a str),
    Bool(bool),
    List(&'a [Value]),
    /// Any other JSON type (number, object).
    Other(&'a Value),
}

impl<'a> FieldValue<'a> {
    pub fn of(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => FieldValue::Missing,
            Some(Value::String(s)) => FieldValue::from_text(s),
            Some(Value::Bool(b)) => FieldValue::Bool(*b),
            Some(Value::Array(items)) => FieldValue::List(items),
            Some(other) => FieldValue::Other(other),
        }
    }

    /// Classify a raw string the same way a JSON string value would be.
    pub fn from_text(value: &'a str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            FieldValue::Missing
        } else {
            FieldValue::Text(trimmed)
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Look up `name` in `form`.
pub fn field<'a>(form: &'a FormData, name: &str) -> FieldValue<'a> {
    FieldValue::of(form.get(name))
}

/// The trimmed text of `name`, if it is a non-blank string.
pub fn text<'a>(form: &'a FormData, name: &str) -> Option<&'a str> {
    field(form, name).as_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(value: Value) -> FormData {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn blank_and_null_are_missing() {
        let f = form(json!({"a": "   ", "b": null}));
        assert!(field(&f, "a").is_missing());
        assert!(field(&f, "b").is_missing());
        assert!(field(&f, "c").is_missing());
    }

    #[test]
    fn text_is_trimmed() {
        let f = form(json!({"a": "  hello "}));
        assert_eq!(text(&f, "a"), Some("hello"));
    }

    #[test]
    fn other_types_are_classified() {
        let f = form(json!({"n": 3, "b": true, "l": ["x"], "o": {}}));
        assert!(matches!(field(&f, "n"), FieldValue::Other(_)));
        assert_eq!(field(&f, "b"), FieldValue::Bool(true));
        assert!(matches!(field(&f, "l"), FieldValue::List(items) if items.len() == 1));
        assert!(matches!(field(&f, "o"), FieldValue::Other(_)));
        assert_eq!(text(&f, "n"), None);
    }
}
