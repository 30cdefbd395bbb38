//! Form Export
//!
//! Exports Form.io form definitions and their submissions through external
//! rendering plugins. This crate does no rendering itself; it:
//!
//! - **Validates** option objects against a declarative [`OptionsSchema`]
//! - **Builds** a normalized structure: one [`StructureEntry`] per submission,
//!   with forms and wizards collapsed to the canonical `form` type and
//!   submission identity attached to each entry's own options
//! - **Orchestrates** the conversions: structure to HTML, HTML to PDF, and
//!   config to spreadsheet, through the [`HtmlRenderer`], [`PdfRenderer`] and
//!   [`XlsxRenderer`] seams
//!
//! [`ProcessPlugin`] attaches an external program as a renderer.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use form_export::{ExportPlugins, FormExport, ProcessPlugin};
//! use form_model::{ComponentDefinition, ExportEntry, SubmissionRecord};
//! use serde_json::json;
//!
//! let input = vec![
//!     ExportEntry::new(ComponentDefinition::of_type("form"))
//!         .with_submission(SubmissionRecord::full("s1", "u1", 123, json!({"name": "Ada"}))),
//! ];
//! let renderer = ProcessPlugin::new("form-renderer");
//! let plugins = Arc::new(ExportPlugins::new(renderer.clone(), renderer.clone(), renderer));
//!
//! let export = FormExport::new(input, plugins).unwrap();
//! assert_eq!(export.structure().len(), 1);
//! assert_eq!(export.structure()[0].options.submission().unwrap().id, json!("s1"));
//! // export.to_pdf(&config).await runs the renderer program twice: html, then pdf
//! ```

mod builder;
mod convenience;
mod error;
mod export;
mod process;
mod renderer;
mod schema;

pub use builder::{BuiltStructure, StructureBuilder};
pub use convenience::{
    export_html, export_pdf, export_xlsx, html_options_schema, pdf_options_schema,
    random_pdf_filename, xlsx_options_schema,
};
pub use error::{BoxError, ExportError, RendererError, Result};
pub use export::{FormExport, SOURCE_KEY};
pub use process::ProcessPlugin;
pub use renderer::{ExportPlugins, HtmlRenderer, HtmlSource, PdfRenderer, XlsxRenderer};
pub use schema::{FieldKind, FieldSpec, OptionsSchema};

pub use form_model::{
    ComponentDefinition, ExportEntry, ExportInput, RenderOptions, StructureEntry,
    SubmissionIdentity, SubmissionRecord,
};
