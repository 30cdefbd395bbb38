//! Submission records and their identity metadata

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One unit of submitted data.
///
/// Either raw data (`{"data": {...}}`) or a full submission object that also
/// carries `_id`, `owner` and `modified`. Which one it is gets decided by a
/// [`FormShapes`](crate::FormShapes) implementation, not by this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionRecord(Value);

impl SubmissionRecord {
    /// Wrap a JSON value
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// A raw record holding only a data payload
    pub fn raw(data: Value) -> Self {
        Self(json!({ "data": data }))
    }

    /// A full submission record with identity and payload
    pub fn full(
        id: impl Into<Value>,
        owner: impl Into<Value>,
        modified: impl Into<Value>,
        data: Value,
    ) -> Self {
        Self(json!({
            "_id": id.into(),
            "owner": owner.into(),
            "modified": modified.into(),
            "data": data,
        }))
    }

    /// Get a top-level member
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Check for a top-level member
    pub fn has_field(&self, key: &str) -> bool {
        self.0.as_object().is_some_and(|fields| fields.contains_key(key))
    }

    /// The `data` payload, `null` when absent
    pub fn data(&self) -> Value {
        self.0.get("data").cloned().unwrap_or(Value::Null)
    }

    /// Borrow the underlying value
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Take the underlying value
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for SubmissionRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Identity metadata copied from a full submission.
///
/// Members are kept as raw JSON: `owner` is `null` for anonymous submissions
/// and `modified` is whatever timestamp representation the server emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionIdentity {
    pub id: Value,
    pub owner: Value,
    pub modified: Value,
}

impl SubmissionIdentity {
    /// Extract `_id`, `owner` and `modified`; missing members become `null`
    pub fn from_record(record: &SubmissionRecord) -> Self {
        let member = |key: &str| record.field(key).cloned().unwrap_or(Value::Null);
        Self {
            id: member("_id"),
            owner: member("owner"),
            modified: member("modified"),
        }
    }

    /// JSON object form, as attached to render options
    pub fn to_value(&self) -> Value {
        json!({
            "id": self.id,
            "owner": self.owner,
            "modified": self.modified,
        })
    }
}
