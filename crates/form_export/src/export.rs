//! Export orchestrator

use std::sync::Arc;

use form_model::{ComponentFactory, ExportInput, FormShapes, StructureEntry};
use serde_json::{Map, Value};
use tracing::debug;

use crate::builder::StructureBuilder;
use crate::error::Result;
use crate::renderer::{ExportPlugins, HtmlRenderer, HtmlSource, PdfRenderer, XlsxRenderer};

/// Key under which `to_pdf` hands the HTML to the PDF renderer
pub const SOURCE_KEY: &str = "source";

/// Exports a built structure through a set of renderer plugins.
///
/// The structure is built once, on construction, and never changes; the
/// conversions only read it.
pub struct FormExport<H, P, X> {
    structure: Vec<StructureEntry>,
    skipped: Vec<usize>,
    plugins: Arc<ExportPlugins<H, P, X>>,
}

impl<H, P, X> FormExport<H, P, X>
where
    H: HtmlRenderer,
    P: PdfRenderer,
    X: XlsxRenderer,
{
    /// Build the structure for `input` with the Form.io rules.
    pub fn new(input: ExportInput, plugins: Arc<ExportPlugins<H, P, X>>) -> Result<Self> {
        Self::with_builder(input, &StructureBuilder::new(), plugins)
    }

    /// Build the structure for `input` with a custom builder.
    pub fn with_builder<S, F>(
        input: ExportInput,
        builder: &StructureBuilder<S, F>,
        plugins: Arc<ExportPlugins<H, P, X>>,
    ) -> Result<Self>
    where
        S: FormShapes,
        F: ComponentFactory,
    {
        let built = builder.build(input)?;
        Ok(Self {
            structure: built.entries,
            skipped: built.skipped,
            plugins,
        })
    }

    /// The normalized structure
    pub fn structure(&self) -> &[StructureEntry] {
        &self.structure
    }

    /// Indices of input entries skipped for lacking a component
    pub fn skipped_entries(&self) -> &[usize] {
        &self.skipped
    }

    /// The renderers in use
    pub fn plugins(&self) -> &ExportPlugins<H, P, X> {
        &self.plugins
    }

    /// Render the structure to HTML.
    pub async fn to_html(&self) -> Result<HtmlSource> {
        debug!(entries = self.structure.len(), "rendering html");
        let html = self.plugins.html.render_html(&self.structure).await?;
        Ok(html)
    }

    /// Render the structure to HTML, then the HTML to PDF.
    ///
    /// The renderer receives a copy of `config` with the HTML under
    /// [`SOURCE_KEY`]; `config` itself is left alone.
    pub async fn to_pdf(&self, config: &Map<String, Value>) -> Result<P::Output> {
        let source = self.to_html().await?;
        let mut merged = config.clone();
        merged.insert(SOURCE_KEY.to_string(), Value::String(source));

        debug!(config_keys = merged.len(), "rendering pdf");
        let pdf = self.plugins.pdf.render_pdf(merged).await?;
        Ok(pdf)
    }

    /// Produce a spreadsheet from `config`.
    ///
    /// The structure is not passed along: the spreadsheet renderer works from
    /// its configuration alone.
    pub async fn to_xlsx(&self, config: &Map<String, Value>) -> Result<X::Output> {
        debug!(config_keys = config.len(), "rendering xlsx");
        let xlsx = self.plugins.xlsx.render_xlsx(config.clone()).await?;
        Ok(xlsx)
    }
}

impl<H, P, X> std::fmt::Debug for FormExport<H, P, X> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormExport")
            .field("structure", &self.structure)
            .field("skipped", &self.skipped)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExportError, RendererError};
    use form_model::{
        ComponentDefinition, ExportEntry, FactoryError, FormioShapes, RenderOptions, SubmissionRecord,
    };
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type RenderResult<T> = std::result::Result<T, RendererError>;

    /// Writes one line per entry: `<type>:<data>`
    #[derive(Default)]
    struct LineHtml {
        calls: AtomicUsize,
    }

    impl HtmlRenderer for LineHtml {
        async fn render_html(&self, structure: &[StructureEntry]) -> RenderResult<HtmlSource> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(structure
                .iter()
                .map(|entry| {
                    format!(
                        "{}:{}",
                        entry.component.component_type().unwrap_or_default(),
                        entry.data
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }

    /// Hands back the config it was given
    #[derive(Default)]
    struct EchoConfig;

    impl PdfRenderer for EchoConfig {
        type Output = Map<String, Value>;

        async fn render_pdf(&self, config: Map<String, Value>) -> RenderResult<Self::Output> {
            Ok(config)
        }
    }

    impl XlsxRenderer for EchoConfig {
        type Output = Map<String, Value>;

        async fn render_xlsx(&self, config: Map<String, Value>) -> RenderResult<Self::Output> {
            Ok(config)
        }
    }

    struct BrokenPdf;

    impl PdfRenderer for BrokenPdf {
        type Output = Vec<u8>;

        async fn render_pdf(&self, _config: Map<String, Value>) -> RenderResult<Self::Output> {
            Err(RendererError::msg("out of paper"))
        }
    }

    fn plugins() -> Arc<ExportPlugins<LineHtml, EchoConfig, EchoConfig>> {
        Arc::new(ExportPlugins::new(LineHtml::default(), EchoConfig, EchoConfig))
    }

    fn sample_input() -> ExportInput {
        vec![
            ExportEntry::new(ComponentDefinition::of_type("textfield"))
                .with_submission(SubmissionRecord::raw(json!({"a": 1})))
                .with_submission(SubmissionRecord::raw(json!({"a": 2}))),
            ExportEntry::without_component(),
        ]
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(fields) => fields,
            _ => panic!("expected an object"),
        }
    }

    #[tokio::test]
    async fn test_to_html() {
        let export = FormExport::new(sample_input(), plugins()).unwrap();

        let html = export.to_html().await.unwrap();

        assert_eq!(html, "textfield:{\"a\":1}\ntextfield:{\"a\":2}");
        assert_eq!(export.structure().len(), 2);
        assert_eq!(export.skipped_entries(), &[1]);
    }

    #[tokio::test]
    async fn test_to_pdf_merges_source_into_a_copy() {
        let export = FormExport::new(sample_input(), plugins()).unwrap();
        let config = object(json!({"filename": "out.pdf", "source": "stale"}));

        let pdf = export.to_pdf(&config).await.unwrap();

        let html = export.to_html().await.unwrap();
        assert_eq!(pdf["source"], json!(html));
        assert_eq!(pdf["filename"], json!("out.pdf"));
        assert_eq!(config["source"], json!("stale"));
        assert_eq!(export.plugins().html.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_to_xlsx_passes_config_through() {
        let export = FormExport::new(sample_input(), plugins()).unwrap();
        let config = object(json!({"sheet": "Answers"}));

        let xlsx = export.to_xlsx(&config).await.unwrap();

        assert_eq!(xlsx, config);
        assert_eq!(export.plugins().html.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_pdf_renderer_error_propagates() {
        let plugins = Arc::new(ExportPlugins::new(LineHtml::default(), BrokenPdf, EchoConfig));
        let export = FormExport::new(sample_input(), plugins).unwrap();

        let err = export.to_pdf(&Map::new()).await.unwrap_err();

        assert!(matches!(err, ExportError::Renderer(_)));
        assert_eq!(err.to_string(), "out of paper");
    }

    #[tokio::test]
    async fn test_custom_builder() {
        let factory = |component: &ComponentDefinition,
                       _data: Value,
                       options: RenderOptions|
         -> form_model::Result<StructureEntry> {
            Ok(StructureEntry::new(component.clone(), json!("masked"), options))
        };
        let builder = StructureBuilder::with_parts(FormioShapes, factory);

        let export = FormExport::with_builder(sample_input(), &builder, plugins()).unwrap();

        assert_eq!(
            export.to_html().await.unwrap(),
            "textfield:\"masked\"\ntextfield:\"masked\""
        );
    }

    #[test]
    fn test_factory_failure_fails_construction() {
        let factory = |_component: &ComponentDefinition,
                       _data: Value,
                       _options: RenderOptions|
         -> form_model::Result<StructureEntry> {
            Err(FactoryError::failed("renderer catalog unavailable"))
        };
        let builder = StructureBuilder::with_parts(FormioShapes, factory);

        let result = FormExport::with_builder(sample_input(), &builder, plugins());

        assert!(matches!(result, Err(ExportError::Factory(FactoryError::Failed(_)))));
    }

    #[test]
    fn test_untyped_component_is_exported() {
        let legacy = ComponentDefinition::from_value(json!({"display": "form", "title": "Legacy"}))
            .unwrap();
        let mut input = sample_input();
        input.push(ExportEntry::new(legacy).with_submission(SubmissionRecord::raw(json!({"b": 2}))));

        let export = FormExport::new(input, plugins()).unwrap();

        assert_eq!(export.structure().len(), 3);
        assert_eq!(export.structure()[2].data, json!({"b": 2}));
    }
}
