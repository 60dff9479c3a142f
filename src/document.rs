//! Data model for parsed analysis results.
//!
//! # Key Types
//! - `Record` - one parsed row of tool output, an ordered field → value map
//! - `Table` - an ordered sequence of records sharing one schema
//! - `ProfileInfo` - OS identification derived from the banner extraction
//! - `AnalysisDocument` - the single persisted unit: profile + last command
//!   output, overwritten wholesale by each extraction

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One parsed row of tool output: ordered (field name, value) pairs.
///
/// Field order follows the command's layout in the registry, so rendering
/// can iterate the schema and the record in lockstep. Values are always
/// text; the renderer decides display, not the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Look up a field value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Field names in layout order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(field, _)| field.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// An ordered set of records sharing a schema, from one plugin invocation.
///
/// The first record is conventionally the tool's own column-header echo;
/// rendering drops it (see `render`), parsing keeps it.
pub type Table = Vec<Record>;

/// OS identification extracted from the banner output, one per dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInfo {
    pub kernel_version: String,
    pub distribution: String,
    pub distro_version: String,
    /// The whole kernel-version banner line, trimmed.
    pub full_version: String,
}

/// The persisted analysis: exactly one instance exists at a time, created on
/// a successful profile extraction and mutated (command + output replaced)
/// by each subsequent extraction request. Last write wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDocument {
    pub os: String,
    pub kernel_version: String,
    pub distribution: String,
    pub distribution_version: String,
    /// Registry id of the command that produced `output`.
    pub command: String,
    pub output: Table,
    pub analysis_timestamp: DateTime<Utc>,
}

impl AnalysisDocument {
    /// Create a document from a freshly extracted profile.
    pub fn from_profile(profile: &ProfileInfo, command: &str, output: Table) -> Self {
        Self {
            os: "Linux".to_string(),
            kernel_version: profile.kernel_version.clone(),
            distribution: profile.distribution.clone(),
            distribution_version: profile.distro_version.clone(),
            command: command.to_string(),
            output,
            analysis_timestamp: Utc::now(),
        }
    }

    /// Replace the command output, keeping the profile fields.
    pub fn replace_output(&mut self, command: &str, output: Table) {
        self.command = command.to_string();
        self.output = output;
        self.analysis_timestamp = Utc::now();
    }
}
