//! Shape discriminators for component definitions and submission records

use crate::component::{ComponentDefinition, FORM_TYPE};
use crate::submission::SubmissionRecord;

/// Pure predicates over definition and record shapes
pub trait FormShapes {
    /// Whether the definition describes a whole form
    fn is_form(&self, component: &ComponentDefinition) -> bool;

    /// Whether the definition describes a multi-page wizard
    fn is_wizard(&self, component: &ComponentDefinition) -> bool;

    /// Whether the record is a full submission carrying identity fields
    fn is_full_submission(&self, record: &SubmissionRecord) -> bool;
}

/// Shape rules of Form.io definitions and submissions
#[derive(Debug, Clone, Copy, Default)]
pub struct FormioShapes;

impl FormioShapes {
    /// Members every full submission carries
    pub const IDENTITY_FIELDS: [&'static str; 3] = ["_id", "owner", "modified"];
}

impl FormShapes for FormioShapes {
    fn is_form(&self, component: &ComponentDefinition) -> bool {
        component.component_type() == Some(FORM_TYPE)
            || (component.display() == Some(FORM_TYPE) && component.components().is_some())
    }

    fn is_wizard(&self, component: &ComponentDefinition) -> bool {
        component.display() == Some("wizard")
    }

    fn is_full_submission(&self, record: &SubmissionRecord) -> bool {
        Self::IDENTITY_FIELDS.iter().all(|key| record.has_field(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn component(value: serde_json::Value) -> ComponentDefinition {
        ComponentDefinition::from_value(value).unwrap()
    }

    #[test]
    fn test_is_form() {
        let shapes = FormioShapes;
        assert!(shapes.is_form(&component(json!({"type": "form"}))));
        assert!(shapes.is_form(&component(json!({"display": "form", "components": []}))));
        assert!(!shapes.is_form(&component(json!({"display": "form"}))));
        assert!(!shapes.is_form(&component(json!({"type": "textfield"}))));
    }

    #[test]
    fn test_is_wizard() {
        let shapes = FormioShapes;
        assert!(shapes.is_wizard(&component(json!({"display": "wizard", "components": []}))));
        assert!(!shapes.is_wizard(&component(json!({"type": "wizard"}))));
    }

    #[test]
    fn test_is_full_submission() {
        let shapes = FormioShapes;
        assert!(shapes.is_full_submission(&SubmissionRecord::full("s1", "u1", 1, json!({}))));
        assert!(shapes.is_full_submission(&SubmissionRecord::new(
            json!({"_id": "s1", "owner": null, "modified": "2024-01-01", "data": {}})
        )));
        assert!(!shapes.is_full_submission(&SubmissionRecord::raw(json!({"a": 1}))));
        assert!(!shapes.is_full_submission(&SubmissionRecord::new(
            json!({"_id": "s1", "data": {}})
        )));
        assert!(!shapes.is_full_submission(&SubmissionRecord::new(json!("s1"))));
    }
}
