//! Process plugins
//!
//! Runs an external renderer program per conversion. The program gets one
//! JSON request on stdin:
//!
//! ```json
//! {"format": "html", "structure": [...]}
//! {"format": "pdf", "config": {"source": "<html>...", ...}}
//! {"format": "xlsx", "config": {...}}
//! ```
//!
//! and answers with the rendered document on stdout. A non-zero exit status
//! is a failure; stderr becomes the error message.

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use form_model::StructureEntry;
use serde_json::{json, Map, Value};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::error::RendererError;
use crate::renderer::{HtmlRenderer, HtmlSource, PdfRenderer, XlsxRenderer};

/// An external program acting as a renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessPlugin {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl ProcessPlugin {
    /// Create a plugin running `program` without arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    /// Parse a whitespace separated command line, e.g. `"node render.js --pdf"`
    pub fn from_command_line(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program).with_args(parts))
    }

    /// Append one argument
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append arguments
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Bound the program's run time
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Program name
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Program arguments
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Configured timeout
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Send `request` to a fresh child process and collect its stdout.
    pub async fn run(&self, request: &Value) -> Result<Vec<u8>, RendererError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.exchange(request))
                .await
                .map_err(|_| {
                    RendererError::msg(format!(
                        "plugin `{}` timed out after {:?}",
                        self.program, limit
                    ))
                })?,
            None => self.exchange(request).await,
        }
    }

    async fn exchange(&self, request: &Value) -> Result<Vec<u8>, RendererError> {
        let payload = serde_json::to_vec(request)?;
        debug!(program = %self.program, bytes = payload.len(), "starting plugin");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                RendererError::msg(format!("failed to start plugin `{}`: {}", self.program, e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| RendererError::msg("plugin stdin is not available"))?;
        let write = async move {
            stdin.write_all(&payload).await?;
            stdin.shutdown().await
        };

        // Feed stdin while draining stdout.
        let (written, output) = tokio::join!(write, child.wait_with_output());
        let output = output?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RendererError::msg(format!(
                "plugin `{}` failed ({}): {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        if let Err(e) = written {
            if e.kind() != ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }

        debug!(program = %self.program, bytes = output.stdout.len(), "plugin finished");
        Ok(output.stdout)
    }
}

impl HtmlRenderer for ProcessPlugin {
    async fn render_html(&self, structure: &[StructureEntry]) -> Result<HtmlSource, RendererError> {
        let request = json!({
            "format": "html",
            "structure": serde_json::to_value(structure)?,
        });
        let stdout = self.run(&request).await?;
        String::from_utf8(stdout).map_err(RendererError::new)
    }
}

impl PdfRenderer for ProcessPlugin {
    type Output = Vec<u8>;

    async fn render_pdf(&self, config: Map<String, Value>) -> Result<Vec<u8>, RendererError> {
        let request = json!({ "format": "pdf", "config": Value::Object(config) });
        self.run(&request).await
    }
}

impl XlsxRenderer for ProcessPlugin {
    type Output = Vec<u8>;

    async fn render_xlsx(&self, config: Map<String, Value>) -> Result<Vec<u8>, RendererError> {
        let request = json!({ "format": "xlsx", "config": Value::Object(config) });
        self.run(&request).await
    }
}
