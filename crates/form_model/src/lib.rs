//! Form Model
//!
//! Data types shared by the form export pipeline:
//!
//! - [`ComponentDefinition`]: opaque Form.io component tree
//! - [`SubmissionRecord`] and [`SubmissionIdentity`]: submitted data, with
//!   identity metadata for full submissions
//! - [`RenderOptions`]: renderer settings, possibly carrying submission identity
//! - [`ExportEntry`] / [`ExportInput`]: the work fed to an export
//! - [`StructureEntry`]: one normalized unit ready for rendering
//!
//! plus the two seams the structure builder relies on: the [`FormShapes`]
//! discriminators and the [`ComponentFactory`].
//!
//! # Example
//!
//! ```rust
//! use form_model::{ComponentDefinition, FormShapes, FormioShapes, SubmissionRecord};
//! use serde_json::json;
//!
//! let wizard = ComponentDefinition::from_value(json!({"display": "wizard", "components": []})).unwrap();
//! assert!(FormioShapes.is_wizard(&wizard));
//!
//! let record = SubmissionRecord::full("s1", "u1", 123, json!({"a": 1}));
//! assert!(FormioShapes.is_full_submission(&record));
//! ```

mod component;
mod error;
mod factory;
mod options;
mod shapes;
mod structure;
mod submission;

pub use component::{value_kind, ComponentDefinition, FORM_TYPE};
pub use error::{FactoryError, Result};
pub use factory::{ComponentFactory, FormioComponentFactory};
pub use options::{RenderOptions, SUBMISSION_KEY};
pub use shapes::{FormShapes, FormioShapes};
pub use structure::{ExportEntry, ExportInput, StructureEntry};
pub use submission::{SubmissionIdentity, SubmissionRecord};
