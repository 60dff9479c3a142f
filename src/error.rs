use thiserror::Error;

/// dumpsight's error types, matching the failure taxonomy of the analysis
/// pipeline: external tool failures carry the tool's stderr, user-facing
/// conditions (no analysis yet, unsupported command) are distinct variants.
///
/// Malformed output lines are NOT errors — the parser drops them silently
/// and the table simply has fewer rows.
#[derive(Debug, Error)]
pub enum DumpsightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{tool} failed: {message}")]
    ExternalTool { tool: String, message: String },

    #[error("{tool} did not finish within {secs}s")]
    ToolTimeout { tool: String, secs: u64 },

    #[error("no kernel version banner found in the dump")]
    ProfileNotFound,

    #[error("command not supported: {command}")]
    UnsupportedCommand { command: String },

    #[error("no analysis has been run yet")]
    NoPriorAnalysis,

    #[error("no memory dump has been uploaded yet")]
    NoDump,

    #[error("invalid upload: {message}")]
    InvalidUpload { message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {message}")]
    Configuration { message: String },
}

pub type Result<T> = std::result::Result<T, DumpsightError>;

impl DumpsightError {
    pub fn external_tool<S1: Into<String>, S2: Into<String>>(tool: S1, message: S2) -> Self {
        Self::ExternalTool { tool: tool.into(), message: message.into() }
    }

    pub fn tool_timeout<S: Into<String>>(tool: S, secs: u64) -> Self {
        Self::ToolTimeout { tool: tool.into(), secs }
    }

    pub fn unsupported_command<S: Into<String>>(command: S) -> Self {
        Self::UnsupportedCommand { command: command.into() }
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration { message: message.into() }
    }

    pub fn invalid_upload<S: Into<String>>(message: S) -> Self {
        Self::InvalidUpload { message: message.into() }
    }

    /// Returns true if the error is a client-side condition (bad request,
    /// nothing analyzed yet) rather than a server/tool fault.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::ProfileNotFound
                | Self::UnsupportedCommand { .. }
                | Self::NoPriorAnalysis
                | Self::NoDump
                | Self::InvalidUpload { .. }
        )
    }
}
