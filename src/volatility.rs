//! Volatility 3 integration.
//!
//! The only coupling to the forensics tool lives here, behind a narrow
//! interface: run one plugin against one dump, hand back captured stdout.
//! Parsing is someone else's job, so a future structured (JSON-emitting)
//! extractor can replace this module without touching the parser contract.
//!
//! Every invocation runs under an explicit timeout. Nonzero exit and empty
//! stdout are both surfaced as tool failures carrying the tool's stderr;
//! there is no retry.

use crate::error::{DumpsightError, Result};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Plugin that dumps kernel version banners; works without a symbol table.
pub const BANNER_COMMAND: &str = "banners.Banners";

/// Cached result of the availability probe (avoids a subprocess per request).
static VOLATILITY_AVAILABLE: OnceLock<bool> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct VolatilityRunner {
    binary: PathBuf,
    timeout: Duration,
}

impl VolatilityRunner {
    pub fn new<P: Into<PathBuf>>(binary: P, timeout: Duration) -> Self {
        Self { binary: binary.into(), timeout }
    }

    /// Check if the Volatility binary is runnable. Probed once per process.
    pub fn is_available(&self) -> bool {
        *VOLATILITY_AVAILABLE.get_or_init(|| {
            std::process::Command::new(&self.binary)
                .arg("--help")
                .output()
                .is_ok()
        })
    }

    /// Run one plugin against a dump and return its captured stdout.
    pub async fn run_plugin(&self, dump: &Path, command: &str) -> Result<String> {
        debug!("running {} {} on {}", self.binary.display(), command, dump.display());

        let mut invocation = Command::new(&self.binary);
        invocation
            .arg("-q")
            .arg("-f")
            .arg(dump)
            .arg(command)
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, invocation.output())
            .await
            .map_err(|_| DumpsightError::tool_timeout("vol", self.timeout.as_secs()))?
            .map_err(|e| DumpsightError::external_tool("vol", e.to_string()))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(DumpsightError::external_tool(
                "vol",
                format!("exit status {}: {}", output.status, stderr.trim()),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if stdout.trim().is_empty() {
            return Err(DumpsightError::external_tool(
                "vol",
                format!("{command} produced no output: {}", stderr.trim()),
            ));
        }

        Ok(stdout)
    }

    /// Capture the banner output used for profile extraction.
    pub async fn banner(&self, dump: &Path) -> Result<String> {
        self.run_plugin(dump, BANNER_COMMAND).await
    }
}
