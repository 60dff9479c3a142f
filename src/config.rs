use crate::error::{DumpsightError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Default timeout for external tool invocations (Volatility, wkhtmltopdf).
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(300);

/// Default listen address for the HTTP server.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8281";

/// Filename of the single persisted analysis slot inside the data directory.
pub const ANALYSIS_FILE: &str = "last_analysis.json";

/// Filename the uploaded dump is stored under inside the uploads directory.
/// Single slot: a new upload overwrites the previous dump.
pub const DUMP_FILE: &str = "last.dump";

/// Get the data directory for dumpsight.
/// Returns OS-appropriate data directory:
/// - macOS: ~/Library/Application Support/dumpsight
/// - Linux: ~/.local/share/dumpsight
/// - Windows: %LOCALAPPDATA%\dumpsight
pub fn data_dir() -> Result<PathBuf> {
    let base = dirs::data_local_dir()
        .ok_or_else(|| DumpsightError::configuration("failed to get system data directory"))?;

    let path = base.join("dumpsight");
    if !path.exists() {
        std::fs::create_dir_all(&path)?;
    }

    Ok(path)
}

/// Runtime configuration for the analysis pipeline and server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Volatility 3 executable (name resolved via PATH, or an absolute path)
    pub volatility_bin: PathBuf,
    /// wkhtmltopdf executable for PDF export
    pub wkhtmltopdf_bin: PathBuf,
    /// Timeout applied to every external tool invocation
    pub tool_timeout: Duration,
    /// Directory holding the persisted analysis document
    pub data_dir: PathBuf,
    /// Directory holding the last uploaded dump
    pub uploads_dir: PathBuf,
    /// HTTP listen address
    pub listen: String,
}

impl Config {
    /// Build a configuration rooted at the OS data directory.
    pub fn from_env() -> Result<Self> {
        let data_dir = data_dir()?;
        let uploads_dir = data_dir.join("uploads");
        if !uploads_dir.exists() {
            std::fs::create_dir_all(&uploads_dir)?;
        }

        Ok(Self {
            volatility_bin: PathBuf::from("vol"),
            wkhtmltopdf_bin: PathBuf::from("wkhtmltopdf"),
            tool_timeout: DEFAULT_TOOL_TIMEOUT,
            data_dir,
            uploads_dir,
            listen: DEFAULT_LISTEN.to_string(),
        })
    }

    /// Validate the configuration and return errors for invalid settings.
    pub fn validate(&self) -> Result<()> {
        if self.volatility_bin.as_os_str().is_empty() {
            return Err(DumpsightError::configuration("volatility_bin must not be empty"));
        }
        if self.wkhtmltopdf_bin.as_os_str().is_empty() {
            return Err(DumpsightError::configuration("wkhtmltopdf_bin must not be empty"));
        }
        if self.tool_timeout.is_zero() {
            return Err(DumpsightError::configuration("tool_timeout must be greater than 0"));
        }
        if self.listen.is_empty() {
            return Err(DumpsightError::configuration("listen address must not be empty"));
        }
        Ok(())
    }

    /// Path of the single persisted analysis document.
    pub fn analysis_path(&self) -> PathBuf {
        self.data_dir.join(ANALYSIS_FILE)
    }

    /// Path the uploaded dump is stored under.
    pub fn dump_path(&self) -> PathBuf {
        self.uploads_dir.join(DUMP_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(root: &std::path::Path) -> Config {
        Config {
            volatility_bin: PathBuf::from("vol"),
            wkhtmltopdf_bin: PathBuf::from("wkhtmltopdf"),
            tool_timeout: DEFAULT_TOOL_TIMEOUT,
            data_dir: root.to_path_buf(),
            uploads_dir: root.join("uploads"),
            listen: DEFAULT_LISTEN.to_string(),
        }
    }

    #[test]
    fn test_default_config_validates() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(test_config(tmp.path()).validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config { tool_timeout: Duration::ZERO, ..test_config(tmp.path()) };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_binary_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config { volatility_bin: PathBuf::new(), ..test_config(tmp.path()) };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_slot_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        assert!(config.analysis_path().ends_with(ANALYSIS_FILE));
        assert!(config.dump_path().ends_with(DUMP_FILE));
    }
}
