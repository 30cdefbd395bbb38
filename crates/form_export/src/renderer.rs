//! Renderer plugin seams
//!
//! The actual HTML, PDF and spreadsheet rendering happens outside this
//! crate. An export only sequences calls to these traits.

use form_model::StructureEntry;
use serde_json::{Map, Value};

use crate::error::RendererError;

/// HTML produced from a structure
pub type HtmlSource = String;

/// Renders a structure to HTML.
#[trait_variant::make(Send)]
pub trait HtmlRenderer: Send + Sync {
    /// Render every structure entry, in order, into one HTML document.
    async fn render_html(&self, structure: &[StructureEntry]) -> Result<HtmlSource, RendererError>;
}

/// Renders HTML to PDF.
#[trait_variant::make(Send)]
pub trait PdfRenderer: Send + Sync {
    /// Rendered document type
    type Output: Send;

    /// Render the PDF described by `config`; the HTML is under `source`.
    async fn render_pdf(&self, config: Map<String, Value>) -> Result<Self::Output, RendererError>;
}

/// Produces a spreadsheet.
#[trait_variant::make(Send)]
pub trait XlsxRenderer: Send + Sync {
    /// Workbook type
    type Output: Send;

    async fn render_xlsx(&self, config: Map<String, Value>) -> Result<Self::Output, RendererError>;
}

/// The three renderers an export delegates to
#[derive(Debug, Clone, Default)]
pub struct ExportPlugins<H, P, X> {
    pub html: H,
    pub pdf: P,
    pub xlsx: X,
}

impl<H, P, X> ExportPlugins<H, P, X> {
    /// Bundle renderers
    pub fn new(html: H, pdf: P, xlsx: X) -> Self {
        Self { html, pdf, xlsx }
    }
}
