//! Component definitions
//!
//! A component definition is the JSON tree a Form.io builder produces for a
//! form, a wizard or a single field. This crate treats it as opaque apart from
//! its `type`, `display` and `components` members.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical `type`/`display` value for whole forms and wizards
pub const FORM_TYPE: &str = "form";

/// An opaque form component definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentDefinition(Map<String, Value>);

impl ComponentDefinition {
    /// Create a definition from its JSON members
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Create a definition with only a `type` tag
    pub fn of_type(component_type: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("type".to_string(), Value::String(component_type.into()));
        Self(fields)
    }

    /// Wrap a JSON value, which must be an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// The `type` tag, when it is a string
    pub fn component_type(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    /// The `display` mode, when it is a string
    pub fn display(&self) -> Option<&str> {
        self.0.get("display").and_then(Value::as_str)
    }

    /// Child components, when the definition has a `components` array
    pub fn components(&self) -> Option<&Vec<Value>> {
        self.0.get("components").and_then(Value::as_array)
    }

    /// Get a raw member
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a raw member
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Force `type` and `display` to the canonical form value.
    pub fn canonicalize_form(&mut self) {
        self.set("type", Value::String(FORM_TYPE.to_string()));
        self.set("display", Value::String(FORM_TYPE.to_string()));
    }

    /// Borrow the JSON members
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Take the JSON members
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ComponentDefinition {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Name of a JSON value's kind, for error messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
