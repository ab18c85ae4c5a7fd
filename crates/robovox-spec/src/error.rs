//! Error types for style tables and metadata processing.

use thiserror::Error;

/// Result type for spec operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors raised while building or loading canonical types.
#[derive(Debug, Error)]
pub enum SpecError {
    /// A style profile failed validation.
    #[error("invalid style '{id}': {message}")]
    InvalidStyle {
        /// Style identifier.
        id: String,
        /// What was wrong.
        message: String,
    },

    /// Two profiles in one table share an identifier.
    #[error("duplicate style id '{0}'")]
    DuplicateStyle(String),

    /// A style table with no profiles.
    #[error("style table is empty")]
    EmptyTable,

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpecError {
    /// Creates an invalid style error.
    pub fn invalid_style(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidStyle {
            id: id.into(),
            message: message.into(),
        }
    }
}

impl BackendError for SpecError {
    fn code(&self) -> &'static str {
        match self {
            SpecError::InvalidStyle { .. } => "SPEC_001",
            SpecError::DuplicateStyle(_) => "SPEC_002",
            SpecError::EmptyTable => "SPEC_003",
            SpecError::JsonParse(_) => "SPEC_004",
            SpecError::Io(_) => "SPEC_005",
        }
    }

    fn category(&self) -> &'static str {
        "spec"
    }
}

/// Trait for errors that can be reported with a stable code.
///
/// ```
/// use robovox_spec::error::{BackendError, SpecError};
///
/// fn describe<E: BackendError>(err: &E) -> String {
///     format!("[{}] {}", err.code(), err.message())
/// }
///
/// let err = SpecError::EmptyTable;
/// assert_eq!(describe(&err), "[SPEC_003] style table is empty");
/// ```
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "SYNTH_001" or "SPEC_002". These codes are
    /// stable and can be matched on by callers.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_style_helper() {
        let err = SpecError::invalid_style("rock", "scale must not be empty");
        assert!(err.to_string().contains("rock"));
        assert!(err.to_string().contains("scale must not be empty"));
        assert_eq!(err.code(), "SPEC_001");
        assert_eq!(err.category(), "spec");
    }

    #[test]
    fn test_json_error_code() {
        let err: SpecError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.code(), "SPEC_004");
    }
}
