//! Batch command implementation
//!
//! Renders `count` tracks per style in parallel, then writes the
//! `tracks.json` index and `LICENSE.md` next to them.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use rayon::prelude::*;
use robovox_spec::{
    track_index_to_json, track_seed, GenerationRequest, Preset, SeedScheme, StyleProfile,
    StyleTable, TrackDescriptor, LICENSE_TEXT,
};
use robovox_synth::{generate, SynthError};
use serde::Serialize;
use tracing::{info, warn};

use super::EXIT_GENERATION_FAILED;
use crate::commands::render::write_output;

/// Name of the metadata index written into the output directory.
pub const INDEX_FILE: &str = "tracks.json";

/// Name of the license note written into the output directory.
pub const LICENSE_FILE: &str = "LICENSE.md";

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Preset whose naming and seed scheme apply.
    pub preset: Preset,
    /// Output directory.
    pub out_dir: PathBuf,
    /// URL path under which the files are served.
    pub url_prefix: String,
    /// Tracks per style.
    pub count: u32,
    /// Track duration in seconds.
    pub duration: f64,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl BatchOptions {
    /// Defaults of a preset: output folder, count and duration.
    pub fn for_preset(preset: Preset) -> Self {
        let (dir, duration) = match preset {
            Preset::Tracks => ("tracks", 8.0),
            Preset::Vocal => ("tracks_real_assets", 10.0),
            Preset::Fallback => ("tracks_fallback", 8.0),
        };
        Self {
            preset,
            out_dir: Path::new("public").join(dir),
            url_prefix: format!("/{}", dir),
            count: 20,
            duration,
            sample_rate: robovox_spec::CANONICAL_SAMPLE_RATE,
        }
    }

    fn seed_scheme(&self) -> SeedScheme {
        match self.preset {
            Preset::Tracks | Preset::Fallback => SeedScheme::TRACKS,
            Preset::Vocal => SeedScheme::VOCAL,
        }
    }
}

/// File name of the `index`-th (1-based) track of a style.
pub fn track_file_name(preset: Preset, style_id: &str, index: u32) -> String {
    match preset {
        Preset::Tracks => format!("{}-{:02}.wav", style_id, index),
        Preset::Vocal => format!("{}-vocal-{:02}.wav", style_id, index),
        Preset::Fallback => format!("{}-fallback-{:02}.wav", style_id, index),
    }
}

#[derive(Debug, Serialize)]
struct BatchReport {
    generated: usize,
    failed: usize,
    out_dir: String,
    index: String,
}

struct Job<'a> {
    style: &'a StyleProfile,
    index: u32,
}

/// Run the batch command
///
/// # Returns
/// Exit code: 0 when every track was written, 2 if any generation failed
pub fn run(styles: &StyleTable, options: &BatchOptions, json_output: bool) -> Result<ExitCode> {
    fs::create_dir_all(&options.out_dir)
        .with_context(|| format!("Failed to create directory: {}", options.out_dir.display()))?;

    let jobs: Vec<Job<'_>> = styles
        .iter()
        .flat_map(|style| (1..=options.count).map(move |index| Job { style, index }))
        .collect();

    info!(
        jobs = jobs.len(),
        preset = options.preset.as_str(),
        out_dir = %options.out_dir.display(),
        "starting batch"
    );

    // Collect keeps job order regardless of scheduling.
    let outcomes: Vec<Result<Result<TrackDescriptor, SynthError>>> =
        jobs.par_iter().map(|job| render_job(styles, options, job)).collect();

    let mut tracks = Vec::with_capacity(outcomes.len());
    let mut failed = 0;
    for outcome in outcomes {
        match outcome? {
            Ok(track) => tracks.push(track),
            Err(err) => {
                warn!(error = %err, "skipping track");
                failed += 1;
            }
        }
    }

    let index_path = options.out_dir.join(INDEX_FILE);
    fs::write(&index_path, track_index_to_json(&tracks)?)
        .with_context(|| format!("Failed to write index: {}", index_path.display()))?;
    let license_path = options.out_dir.join(LICENSE_FILE);
    fs::write(&license_path, LICENSE_TEXT)
        .with_context(|| format!("Failed to write license: {}", license_path.display()))?;

    let report = BatchReport {
        generated: tracks.len(),
        failed,
        out_dir: options.out_dir.display().to_string(),
        index: index_path.display().to_string(),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} {}", "Generated tracks:".cyan().bold(), report.generated);
        if failed > 0 {
            println!("{} {}", "Failed:".red().bold(), failed);
        }
        println!("  {} {}", "index:".dimmed(), report.index);
    }

    if failed > 0 {
        Ok(ExitCode::from(EXIT_GENERATION_FAILED))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Renders and writes one track. The outer error is I/O, the inner one a
/// generation failure that only skips this track.
fn render_job(
    styles: &StyleTable,
    options: &BatchOptions,
    job: &Job<'_>,
) -> Result<Result<TrackDescriptor, SynthError>> {
    let id = job.style.id.as_str();
    let seed = track_seed(id, job.index, options.seed_scheme());
    let request =
        GenerationRequest::new(id, seed, options.duration).with_sample_rate(options.sample_rate);

    let result = match generate(styles, &request) {
        Ok(result) => result,
        Err(err) => return Ok(Err(err)),
    };

    let name = track_file_name(options.preset, id, job.index);
    write_output(&options.out_dir.join(id).join(&name), &result)?;

    let url = format!("{}/{}/{}", options.url_prefix.trim_end_matches('/'), id, name);
    Ok(Ok(TrackDescriptor::generated(id, job.index, result.tempo_bpm, url)))
}
