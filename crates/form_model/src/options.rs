//! Render options

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::submission::SubmissionIdentity;

/// Key under which submission identity is attached
pub const SUBMISSION_KEY: &str = "submission";

/// Renderer settings for one export entry.
///
/// Opaque to this crate except for the `submission` member, which carries the
/// identity of the submission a structure entry was built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderOptions(Map<String, Value>);

impl RenderOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value, which must be an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a member
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a member
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Attach submission identity, replacing any previous one
    pub fn attach_submission(&mut self, identity: &SubmissionIdentity) {
        self.insert(SUBMISSION_KEY, identity.to_value());
    }

    /// The attached submission identity, if any
    pub fn submission(&self) -> Option<SubmissionIdentity> {
        self.0
            .get(SUBMISSION_KEY)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether there are no members
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
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

impl From<Map<String, Value>> for RenderOptions {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
