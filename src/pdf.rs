//! PDF export via wkhtmltopdf.
//!
//! The static HTML render goes to a temp file, wkhtmltopdf converts it, and
//! the resulting bytes come back to the caller. Same external-collaborator
//! treatment as the forensics tool: explicit timeout, stderr surfaced on
//! failure, no retry.

use crate::error::{DumpsightError, Result};
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct PdfExporter {
    binary: PathBuf,
    timeout: Duration,
}

impl PdfExporter {
    pub fn new<P: Into<PathBuf>>(binary: P, timeout: Duration) -> Self {
        Self { binary: binary.into(), timeout }
    }

    /// Render an HTML document to PDF bytes.
    pub async fn render(&self, html: &str) -> Result<Vec<u8>> {
        let workdir = tempfile::tempdir()?;
        let html_path = workdir.path().join("report.html");
        let pdf_path = workdir.path().join("report.pdf");
        tokio::fs::write(&html_path, html).await?;

        debug!("rendering {} bytes of HTML to PDF", html.len());

        let mut invocation = Command::new(&self.binary);
        invocation
            .arg("--quiet")
            .arg("--encoding")
            .arg("utf-8")
            .arg(&html_path)
            .arg(&pdf_path)
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, invocation.output())
            .await
            .map_err(|_| DumpsightError::tool_timeout("wkhtmltopdf", self.timeout.as_secs()))?
            .map_err(|e| DumpsightError::external_tool("wkhtmltopdf", e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DumpsightError::external_tool(
                "wkhtmltopdf",
                format!("exit status {}: {}", output.status, stderr.trim()),
            ));
        }

        let bytes = tokio::fs::read(&pdf_path).await.map_err(|_| {
            DumpsightError::external_tool("wkhtmltopdf", "no PDF produced".to_string())
        })?;
        Ok(bytes)
    }
}
