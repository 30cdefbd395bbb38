//! One-shot export entry points
//!
//! Each function validates a single options object
//! `{component, data, formio, config}`, builds a one-entry export from it and
//! runs the matching [`FormExport`] conversion.

use std::sync::Arc;

use form_model::{
    value_kind, ComponentDefinition, ExportEntry, RenderOptions, SubmissionRecord,
};
use serde_json::{json, Map, Value};
use tracing::error;
use uuid::Uuid;

use crate::error::{ExportError, Result};
use crate::export::FormExport;
use crate::renderer::{ExportPlugins, HtmlRenderer, HtmlSource, PdfRenderer, XlsxRenderer};
use crate::schema::{FieldSpec, OptionsSchema};

/// Random file name for a PDF export, e.g. `export-3f9c2ab.pdf`
pub fn random_pdf_filename() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("export-{}.pdf", &id[..7])
}

fn base_schema() -> OptionsSchema {
    OptionsSchema::new()
        .field("component", FieldSpec::object().required())
        .field("data", FieldSpec::any())
        .field("formio", FieldSpec::object())
}

/// Schema for [`export_html`]
pub fn html_options_schema() -> OptionsSchema {
    base_schema()
}

/// Schema for [`export_pdf`]; `config` defaults to a random file name
pub fn pdf_options_schema() -> OptionsSchema {
    base_schema().field(
        "config",
        FieldSpec::object().with_default(|| json!({ "filename": random_pdf_filename() })),
    )
}

/// Schema for [`export_xlsx`]
pub fn xlsx_options_schema() -> OptionsSchema {
    base_schema().field("config", FieldSpec::object())
}

/// Options after validation, split into their parts
struct OneShot {
    entry: ExportEntry,
    config: Map<String, Value>,
}

fn prepare(schema: &OptionsSchema, options: &Value) -> Result<OneShot> {
    let prepared = schema.validate(options).and_then(split);
    if let Err(err) = &prepared {
        error!(error = %err, "invalid export options");
    }
    prepared
}

fn split(mut validated: Map<String, Value>) -> Result<OneShot> {
    let component = validated.remove("component").unwrap_or(Value::Null);
    let kind = value_kind(&component);
    let component = ComponentDefinition::from_value(component).ok_or_else(|| {
        ExportError::InvalidOptions(format!("component must be an object, got {kind}"))
    })?;

    let submissions = match validated.remove("data") {
        None | Some(Value::Null) => vec![SubmissionRecord::raw(json!({}))],
        Some(Value::Array(records)) => records.into_iter().map(SubmissionRecord::new).collect(),
        Some(record) => vec![SubmissionRecord::new(record)],
    };

    let options = match validated.remove("formio") {
        None | Some(Value::Null) => RenderOptions::new(),
        Some(value) => {
            let kind = value_kind(&value);
            RenderOptions::from_value(value).ok_or_else(|| {
                ExportError::InvalidOptions(format!("formio must be an object, got {kind}"))
            })?
        }
    };

    let config = match validated.remove("config") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(config)) => config,
        Some(other) => {
            return Err(ExportError::InvalidOptions(format!(
                "config must be an object, got {}",
                value_kind(&other)
            )))
        }
    };

    Ok(OneShot {
        entry: ExportEntry::new(component)
            .with_submissions(submissions)
            .with_options(options),
        config,
    })
}

/// Validate `options` and render them to HTML.
pub async fn export_html<H, P, X>(
    options: &Value,
    plugins: Arc<ExportPlugins<H, P, X>>,
) -> Result<HtmlSource>
where
    H: HtmlRenderer,
    P: PdfRenderer,
    X: XlsxRenderer,
{
    let OneShot { entry, .. } = prepare(&html_options_schema(), options)?;
    FormExport::new(vec![entry], plugins)?.to_html().await
}

/// Validate `options` and render them to PDF.
pub async fn export_pdf<H, P, X>(
    options: &Value,
    plugins: Arc<ExportPlugins<H, P, X>>,
) -> Result<P::Output>
where
    H: HtmlRenderer,
    P: PdfRenderer,
    X: XlsxRenderer,
{
    let OneShot { entry, config } = prepare(&pdf_options_schema(), options)?;
    FormExport::new(vec![entry], plugins)?.to_pdf(&config).await
}

/// Validate `options` and produce a spreadsheet.
pub async fn export_xlsx<H, P, X>(
    options: &Value,
    plugins: Arc<ExportPlugins<H, P, X>>,
) -> Result<X::Output>
where
    H: HtmlRenderer,
    P: PdfRenderer,
    X: XlsxRenderer,
{
    let OneShot { entry, config } = prepare(&xlsx_options_schema(), options)?;
    FormExport::new(vec![entry], plugins)?.to_xlsx(&config).await
}
