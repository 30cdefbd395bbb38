//! Declarative option schemas
//!
//! An [`OptionsSchema`] lists the fields an options object may carry. Required
//! fields must be present, optional ones are filled from their default when
//! absent, and anything the schema does not mention passes through.

use std::fmt;
use std::sync::Arc;

use form_model::value_kind;
use serde_json::{Map, Value};

use crate::error::{ExportError, Result};

/// Documented kind of an option field; not enforced at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Any,
    Object,
    Number,
}

type DefaultFn = Arc<dyn Fn() -> Value + Send + Sync>;

/// Rules for one option field
#[derive(Clone)]
pub struct FieldSpec {
    /// Documented kind
    pub kind: FieldKind,
    /// Whether validation fails when the field is absent
    pub required: bool,
    default: Option<DefaultFn>,
}

impl FieldSpec {
    /// Create an optional field of the given kind
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
            default: None,
        }
    }

    /// Create an optional object field
    pub fn object() -> Self {
        Self::new(FieldKind::Object)
    }

    /// Create an optional field of any kind
    pub fn any() -> Self {
        Self::new(FieldKind::Any)
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set a default, produced anew on every validation
    pub fn with_default<F>(mut self, default: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(Arc::new(default));
        self
    }

    /// Whether a default is declared
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Produce the default value, if any
    pub fn default_value(&self) -> Option<Value> {
        self.default.as_ref().map(|default| default())
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("has_default", &self.has_default())
            .finish()
    }
}

/// Ordered collection of field rules
#[derive(Debug, Clone, Default)]
pub struct OptionsSchema {
    fields: Vec<(String, FieldSpec)>,
}

impl OptionsSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing an earlier one of the same name
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        let name = name.into();
        self.fields.retain(|(existing, _)| *existing != name);
        self.fields.push((name, spec));
        self
    }

    /// Get a field's rules
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, spec)| spec)
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Validate an options object.
    ///
    /// Returns a copy of the input with defaults filled in. A `null` member
    /// counts as absent.
    pub fn validate(&self, input: &Value) -> Result<Map<String, Value>> {
        let Value::Object(fields) = input else {
            return Err(ExportError::InvalidOptions(format!(
                "expected an object, got {}",
                value_kind(input)
            )));
        };

        let mut validated = fields.clone();
        for (name, spec) in &self.fields {
            let present = validated.get(name).is_some_and(|value| !value.is_null());
            if present {
                continue;
            }
            if spec.required {
                return Err(ExportError::MissingRequiredField(name.clone()));
            }
            if let Some(value) = spec.default_value() {
                validated.insert(name.clone(), value);
            }
        }
        Ok(validated)
    }
}
