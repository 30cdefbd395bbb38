//! Recording renderers shared by the integration tests

#![allow(dead_code)]

use std::sync::Mutex;

use form_export::{HtmlRenderer, HtmlSource, PdfRenderer, RendererError, StructureEntry, XlsxRenderer};
use serde_json::{Map, Value};

/// Renders each entry as `<section data-type="..">data</section>`
#[derive(Default)]
pub struct SectionHtml {
    pub seen: Mutex<Vec<Vec<StructureEntry>>>,
}

impl HtmlRenderer for SectionHtml {
    async fn render_html(&self, structure: &[StructureEntry]) -> Result<HtmlSource, RendererError> {
        self.seen.lock().unwrap().push(structure.to_vec());
        Ok(structure
            .iter()
            .map(|entry| {
                format!(
                    "<section data-type=\"{}\">{}</section>",
                    entry.component.component_type().unwrap_or_default(),
                    entry.data
                )
            })
            .collect())
    }
}

/// Records every config it receives and returns a fixed artifact
pub struct RecordingArtifact {
    pub artifact: Vec<u8>,
    pub configs: Mutex<Vec<Map<String, Value>>>,
}

impl RecordingArtifact {
    pub fn new(artifact: &[u8]) -> Self {
        Self {
            artifact: artifact.to_vec(),
            configs: Mutex::new(Vec::new()),
        }
    }

    pub fn last_config(&self) -> Option<Map<String, Value>> {
        self.configs.lock().unwrap().last().cloned()
    }
}

impl PdfRenderer for RecordingArtifact {
    type Output = Vec<u8>;

    async fn render_pdf(&self, config: Map<String, Value>) -> Result<Vec<u8>, RendererError> {
        self.configs.lock().unwrap().push(config);
        Ok(self.artifact.clone())
    }
}

impl XlsxRenderer for RecordingArtifact {
    type Output = Vec<u8>;

    async fn render_xlsx(&self, config: Map<String, Value>) -> Result<Vec<u8>, RendererError> {
        self.configs.lock().unwrap().push(config);
        Ok(self.artifact.clone())
    }
}

/// Always fails
pub struct FailingHtml;

impl HtmlRenderer for FailingHtml {
    async fn render_html(&self, _structure: &[StructureEntry]) -> Result<HtmlSource, RendererError> {
        Err(RendererError::new(std::io::Error::other("template engine crashed")))
    }
}

pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(fields) => fields,
        other => panic!("expected an object, got {other}"),
    }
}
