//! Structure builder
//!
//! Turns [`ExportInput`] into the flat list of [`StructureEntry`] values the
//! renderers consume: one entry per submission, in input order.

use form_model::{
    ComponentFactory, ExportEntry, ExportInput, FormShapes, FormioComponentFactory, FormioShapes,
    StructureEntry, SubmissionIdentity,
};
use tracing::{debug, warn};

use crate::error::Result;

/// Normalized structure plus the entries that were skipped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuiltStructure {
    /// One entry per submission of every entry that had a component
    pub entries: Vec<StructureEntry>,
    /// Indices of input entries skipped for lacking a component
    pub skipped: Vec<usize>,
}

/// Builds structure entries using a set of shape rules and a component factory
#[derive(Debug, Clone, Default)]
pub struct StructureBuilder<S = FormioShapes, F = FormioComponentFactory> {
    shapes: S,
    factory: F,
}

impl StructureBuilder {
    /// Builder with the Form.io shape rules and factory
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S, F> StructureBuilder<S, F>
where
    S: FormShapes,
    F: ComponentFactory,
{
    /// Builder with custom shape rules and factory
    pub fn with_parts(shapes: S, factory: F) -> Self {
        Self { shapes, factory }
    }

    /// Build the structure.
    ///
    /// Stops at the first factory failure.
    pub fn build(&self, input: ExportInput) -> Result<BuiltStructure> {
        let mut built = BuiltStructure::default();

        for (index, entry) in input.into_iter().enumerate() {
            let ExportEntry {
                component,
                submission,
                option,
            } = entry;

            let Some(mut component) = component else {
                warn!(
                    target: "form_export::builder",
                    entry = index,
                    "no component defined"
                );
                built.skipped.push(index);
                continue;
            };

            if self.shapes.is_form(&component) || self.shapes.is_wizard(&component) {
                component.canonicalize_form();
            }

            for record in submission {
                // Each submission gets its own copy so identities never leak
                // between records of the same entry.
                let mut options = option.clone();
                if self.shapes.is_full_submission(&record) {
                    options.attach_submission(&SubmissionIdentity::from_record(&record));
                }
                let structure_entry = self.factory.create(&component, record.data(), options)?;
                built.entries.push(structure_entry);
            }
        }

        debug!(
            entries = built.entries.len(),
            skipped = built.skipped.len(),
            "built export structure"
        );
        Ok(built)
    }
}
