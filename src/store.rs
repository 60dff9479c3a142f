//! Single-slot persistence for the last analysis.
//!
//! One JSON document per process instance, overwritten wholesale by each
//! extraction. Writes go to a temp file in the target directory and are
//! renamed into place, so a concurrent reader never observes a partial
//! document. Two concurrent writers race and the later rename wins — an
//! accepted limitation of the single-slot model.

use crate::document::AnalysisDocument;
use crate::error::{DumpsightError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct AnalysisStore {
    path: PathBuf,
}

impl AnalysisStore {
    /// Store rooted at the given slot path. The parent directory must exist.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the document, replacing any previous one atomically from the
    /// reader's perspective.
    pub fn save(&self, doc: &AnalysisDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(doc)?;

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!("analysis saved to {}", self.path.display());
        Ok(())
    }

    /// Load the last persisted document.
    pub fn load(&self) -> Result<AnalysisDocument> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DumpsightError::NoPriorAnalysis);
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&json)?)
    }
}
