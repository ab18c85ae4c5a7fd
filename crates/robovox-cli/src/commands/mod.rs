//! CLI command implementations

pub mod batch;
pub mod fallback;
pub mod inspect;
pub mod map_vocals;
pub mod render;
pub mod styles;

use std::process::ExitCode;

use colored::Colorize;
use robovox_spec::BackendError;
use robovox_synth::SynthError;

/// Exit code for input the engine rejected.
pub const EXIT_INVALID_INPUT: u8 = 1;

/// Exit code for a failed generation.
pub const EXIT_GENERATION_FAILED: u8 = 2;

/// Maps an engine error to the process exit code.
pub fn exit_code_for(err: &SynthError) -> ExitCode {
    match err {
        SynthError::StyleNotFound { .. }
        | SynthError::InvalidParameters { .. }
        | SynthError::Style(_)
        | SynthError::InvalidWav { .. } => ExitCode::from(EXIT_INVALID_INPUT),
        _ => ExitCode::from(EXIT_GENERATION_FAILED),
    }
}

/// Prints an engine error with its code.
pub(crate) fn report_synth_error(err: &SynthError) {
    eprintln!("{} [{}] {}", "error".red().bold(), err.code(), err.message());
}
