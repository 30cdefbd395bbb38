//! Command definitions and handlers

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use form_export::{
    pdf_options_schema, ExportPlugins, FieldSpec, FormExport, ProcessPlugin, StructureBuilder,
};
use form_model::ExportInput;
use serde_json::{Map, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Export Form.io submissions to HTML, PDF or spreadsheets
#[derive(Debug, Parser)]
#[command(name = "form-export", version, about)]
pub struct Cli {
    /// Export input JSON file; read from stdin when omitted
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// Log filter directives, e.g. `debug` or `form_export=trace`
    #[arg(long, global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the normalized structure as JSON
    Structure,
    /// Render the structure to HTML
    Html {
        #[command(flatten)]
        target: PluginArgs,
    },
    /// Render the structure to HTML, then to PDF
    Pdf {
        #[command(flatten)]
        target: PluginArgs,
        /// PDF renderer configuration as a JSON object
        #[arg(long)]
        config: Option<String>,
    },
    /// Produce a spreadsheet
    Xlsx {
        #[command(flatten)]
        target: PluginArgs,
        /// Spreadsheet renderer configuration as a JSON object
        #[arg(long)]
        config: Option<String>,
    },
}

/// Where rendering happens and where its output goes
#[derive(Debug, Args)]
pub struct PluginArgs {
    /// Renderer command line, e.g. "node render.js"
    #[arg(long)]
    pub plugin: String,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Kill the renderer after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl PluginArgs {
    fn plugin(&self) -> Result<ProcessPlugin> {
        let plugin = ProcessPlugin::from_command_line(&self.plugin)
            .ok_or_else(|| anyhow!("--plugin must name a program"))?;
        Ok(match self.timeout_secs {
            Some(secs) => plugin.with_timeout(Duration::from_secs(secs)),
            None => plugin,
        })
    }
}

type CliExport = FormExport<ProcessPlugin, ProcessPlugin, ProcessPlugin>;

/// Run the parsed command
pub async fn run(cli: Cli) -> Result<()> {
    let input = read_input(cli.input.as_deref()).await?;

    match cli.command {
        Command::Structure => {
            let built = StructureBuilder::new()
                .build(input)
                .context("failed to build export structure")?;
            let mut json = serde_json::to_string_pretty(&built.entries)?;
            json.push('\n');
            write_output(None, json.as_bytes()).await
        }
        Command::Html { target } => {
            let export = build_export(input, &target)?;
            let html = export.to_html().await.context("html export failed")?;
            write_output(target.output.as_deref(), html.as_bytes()).await
        }
        Command::Pdf { target, config } => {
            let config = match config {
                Some(raw) => parse_config(&raw)?,
                None => default_pdf_config(),
            };
            let export = build_export(input, &target)?;
            let pdf = export.to_pdf(&config).await.context("pdf export failed")?;
            let output = target.output.clone().or_else(|| config_filename(&config));
            write_output(output.as_deref(), &pdf).await
        }
        Command::Xlsx { target, config } => {
            let config = match config {
                Some(raw) => parse_config(&raw)?,
                None => Map::new(),
            };
            let export = build_export(input, &target)?;
            let xlsx = export.to_xlsx(&config).await.context("xlsx export failed")?;
            let output = target.output.clone().or_else(|| config_filename(&config));
            write_output(output.as_deref(), &xlsx).await
        }
    }
}

fn build_export(input: ExportInput, target: &PluginArgs) -> Result<CliExport> {
    let plugin = target.plugin()?;
    let plugins = Arc::new(ExportPlugins::new(plugin.clone(), plugin.clone(), plugin));
    let export = FormExport::new(input, plugins).context("failed to build export structure")?;
    if !export.skipped_entries().is_empty() {
        tracing::info!(skipped = ?export.skipped_entries(), "entries without a component were skipped");
    }
    Ok(export)
}

async fn read_input(path: Option<&Path>) -> Result<ExportInput> {
    let raw = match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("failed to read stdin")?;
            raw
        }
    };
    serde_json::from_str(&raw).context("input is not a valid export input")
}

fn parse_config(raw: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw).context("--config is not valid JSON")? {
        Value::Object(config) => Ok(config),
        _ => bail!("--config must be a JSON object"),
    }
}

/// The `config` default declared by the one-shot PDF schema
fn default_pdf_config() -> Map<String, Value> {
    match pdf_options_schema()
        .get("config")
        .and_then(FieldSpec::default_value)
    {
        Some(Value::Object(config)) => config,
        _ => Map::new(),
    }
}

fn config_filename(config: &Map<String, Value>) -> Option<PathBuf> {
    config.get("filename").and_then(Value::as_str).map(PathBuf::from)
}

async fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            tokio::fs::write(path, bytes)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote export");
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(bytes).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}
