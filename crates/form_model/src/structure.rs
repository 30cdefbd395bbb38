//! Export input and normalized structure entries

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::component::ComponentDefinition;
use crate::options::RenderOptions;
use crate::submission::SubmissionRecord;

/// One normalized, renderable unit: a component, one submission's data and
/// the options used to render it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureEntry {
    /// Component definition after form/wizard normalization
    pub component: ComponentDefinition,
    /// Data payload of one submission
    pub data: Value,
    /// Render options, with submission identity when known
    pub options: RenderOptions,
}

impl StructureEntry {
    /// Create a structure entry
    pub fn new(component: ComponentDefinition, data: Value, options: RenderOptions) -> Self {
        Self { component, data, options }
    }
}

/// One unit of export work: a component with its submissions and options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportEntry {
    /// Component definition; entries without one are skipped
    #[serde(default)]
    pub component: Option<ComponentDefinition>,
    /// Submissions to render against the component, in order
    #[serde(default)]
    pub submission: Vec<SubmissionRecord>,
    /// Base render options shared by this entry's submissions
    #[serde(default)]
    pub option: RenderOptions,
}

impl ExportEntry {
    /// Create an entry for a component with no submissions yet
    pub fn new(component: ComponentDefinition) -> Self {
        Self {
            component: Some(component),
            ..Default::default()
        }
    }

    /// Create an entry that has no component
    pub fn without_component() -> Self {
        Self::default()
    }

    /// Add a submission
    pub fn with_submission(mut self, record: SubmissionRecord) -> Self {
        self.submission.push(record);
        self
    }

    /// Add several submissions
    pub fn with_submissions(mut self, records: impl IntoIterator<Item = SubmissionRecord>) -> Self {
        self.submission.extend(records);
        self
    }

    /// Set the base render options
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.option = options;
        self
    }
}

/// Ordered export work fed to the orchestrator
pub type ExportInput = Vec<ExportEntry>;
