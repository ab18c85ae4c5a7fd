//! Inspect command implementation
//!
//! Prints the header fields of a WAVE file along with its duration, peak
//! sample and PCM hash.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use robovox_synth::wav::{decode_pcm16, extract_pcm_data, hash_pcm, PCM_SCALE};
use robovox_synth::{SynthError, WavHeader};
use serde::Serialize;

use super::{exit_code_for, report_synth_error};

/// Summary of a WAVE file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WavReport {
    /// Format tag; 1 is linear PCM.
    pub audio_format: u16,
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bytes per second.
    pub byte_rate: u32,
    /// Bytes per sample frame.
    pub block_align: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Byte offset of the PCM payload.
    pub data_offset: usize,
    /// PCM payload size in bytes.
    pub data_size: u32,
    /// Number of sample frames.
    pub num_samples: usize,
    /// Payload duration in seconds.
    pub duration_seconds: f64,
    /// Largest absolute sample, normalized to full scale.
    pub peak: f64,
    /// True for a canonical 44-byte 16-bit mono header.
    pub canonical: bool,
    /// BLAKE3 hash of the PCM payload.
    pub pcm_hash: String,
}

/// Builds the report for WAVE bytes.
pub fn inspect_bytes(wav: &[u8]) -> Result<WavReport, SynthError> {
    let header = WavHeader::parse(wav)?;
    let pcm = extract_pcm_data(wav).ok_or_else(|| SynthError::invalid_wav("missing data chunk"))?;

    let peak = if header.bits_per_sample == 16 {
        decode_pcm16(pcm)
            .iter()
            .map(|&s| (s as f64).abs() / PCM_SCALE)
            .fold(0.0, f64::max)
    } else {
        0.0
    };

    Ok(WavReport {
        audio_format: header.audio_format,
        channels: header.channels,
        sample_rate: header.sample_rate,
        byte_rate: header.byte_rate,
        block_align: header.block_align,
        bits_per_sample: header.bits_per_sample,
        data_offset: header.data_offset,
        data_size: header.data_size,
        num_samples: header.num_samples(),
        duration_seconds: header.duration_seconds(),
        peak,
        canonical: header.is_canonical(),
        pcm_hash: hash_pcm(pcm),
    })
}

/// Run the inspect command
///
/// # Returns
/// Exit code: 0 on success, 1 if the file is not a readable WAVE
pub fn run(path: &Path, json_output: bool) -> Result<ExitCode> {
    let wav = fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

    let report = match inspect_bytes(&wav) {
        Ok(report) => report,
        Err(err) => {
            report_synth_error(&err);
            return Ok(exit_code_for(&err));
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "WAVE".cyan().bold(), path.display());
    let layout = if report.canonical {
        "canonical".green()
    } else {
        "non-canonical".yellow()
    };
    println!("  {} {}", "layout:".dimmed(), layout);
    println!(
        "  {} {} Hz, {} ch, {} bit (format {})",
        "format:".dimmed(),
        report.sample_rate,
        report.channels,
        report.bits_per_sample,
        report.audio_format
    );
    println!(
        "  {} {} B/s, block align {}",
        "rate:".dimmed(),
        report.byte_rate,
        report.block_align
    );
    println!(
        "  {} {} bytes at offset {}",
        "data:".dimmed(),
        report.data_size,
        report.data_offset
    );
    println!(
        "  {} {} ({:.3}s)",
        "samples:".dimmed(),
        report.num_samples,
        report.duration_seconds
    );
    println!("  {} {:.4}", "peak:".dimmed(), report.peak);
    println!("  {} {}", "pcm hash:".dimmed(), report.pcm_hash);

    Ok(ExitCode::SUCCESS)
}
