//! Render command implementation
//!
//! Renders one song to a WAVE file.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use robovox_spec::{GenerationRequest, StyleTable};
use robovox_synth::{generate, GenerateResult};
use serde::Serialize;

use super::{exit_code_for, report_synth_error};

/// Options for a single render.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Style id.
    pub style: String,
    /// Seed.
    pub seed: u32,
    /// Duration in seconds.
    pub duration: f64,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Fixed tempo.
    pub bpm: Option<u32>,
    /// Output WAVE path.
    pub out: PathBuf,
}

impl RenderOptions {
    fn request(&self) -> GenerationRequest {
        let mut request = GenerationRequest::new(&self.style, self.seed, self.duration)
            .with_sample_rate(self.sample_rate);
        request.tempo_override = self.bpm;
        request
    }
}

#[derive(Debug, Serialize)]
struct RenderReport<'a> {
    style: &'a str,
    seed: u32,
    file: String,
    tempo_bpm: u32,
    key: &'a str,
    num_samples: usize,
    sample_rate: u32,
    pcm_hash: &'a str,
}

/// Run the render command
///
/// # Returns
/// Exit code: 0 on success, 1 on invalid input, 2 on generation failure
pub fn run(styles: &StyleTable, options: &RenderOptions, json_output: bool) -> Result<ExitCode> {
    let result = match generate(styles, &options.request()) {
        Ok(result) => result,
        Err(err) => {
            report_synth_error(&err);
            return Ok(exit_code_for(&err));
        }
    };

    write_output(&options.out, &result)?;

    let report = RenderReport {
        style: &options.style,
        seed: options.seed,
        file: options.out.display().to_string(),
        tempo_bpm: result.tempo_bpm,
        key: &result.key.name,
        num_samples: result.num_samples,
        sample_rate: result.audio.sample_rate,
        pcm_hash: &result.audio.pcm_hash,
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} {}", "ok".green().bold(), report.file);
        println!("  {} {}", "style:".dimmed(), report.style);
        println!("  {} {}", "tempo:".dimmed(), report.tempo_bpm);
        println!("  {} {}", "key:".dimmed(), report.key);
        println!(
            "  {} {} ({:.2}s)",
            "samples:".dimmed(),
            report.num_samples,
            result.audio.duration_seconds()
        );
        println!("  {} {}", "pcm hash:".dimmed(), &report.pcm_hash[..16]);
    }

    Ok(ExitCode::SUCCESS)
}

/// Writes the WAVE bytes, creating parent directories.
pub(crate) fn write_output(path: &Path, result: &GenerateResult) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, &result.audio.wav_data)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}
