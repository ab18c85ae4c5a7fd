//! Error types for the synthesis engine.

use robovox_spec::{BackendError, SpecError};
use thiserror::Error;

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors that can occur during song generation.
#[derive(Debug, Error)]
pub enum SynthError {
    /// The requested style id is not in the style table.
    #[error("style not found: '{id}'")]
    StyleNotFound {
        /// The unknown identifier.
        id: String,
    },

    /// A request parameter is out of range.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameters {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// The style profile handed to the engine failed validation.
    #[error(transparent)]
    Style(#[from] SpecError),

    /// Malformed WAV data passed to the header parser.
    #[error("invalid WAV data: {message}")]
    InvalidWav {
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SynthError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a style not found error.
    pub fn style_not_found(id: impl Into<String>) -> Self {
        Self::StyleNotFound { id: id.into() }
    }

    /// Creates an invalid WAV error.
    pub fn invalid_wav(message: impl Into<String>) -> Self {
        Self::InvalidWav {
            message: message.into(),
        }
    }
}

impl BackendError for SynthError {
    fn code(&self) -> &'static str {
        match self {
            SynthError::StyleNotFound { .. } => "SYNTH_001",
            SynthError::InvalidParameters { .. } => "SYNTH_002",
            SynthError::Style(_) => "SYNTH_003",
            SynthError::InvalidWav { .. } => "SYNTH_004",
            SynthError::Io(_) => "SYNTH_005",
        }
    }

    fn category(&self) -> &'static str {
        "synth"
    }
}
