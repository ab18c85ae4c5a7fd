//! Map-vocals command implementation
//!
//! Points the tracks of a `tracks.json` index at recorded vocal assets found
//! under `<source>/<theme>/`, assigning them round-robin per theme.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use robovox_spec::{parse_track_index, track_index_to_json, TrackDescriptor};
use serde::Serialize;
use walkdir::WalkDir;

/// Extensions accepted as vocal assets (lowercase, without the dot).
pub const AUDIO_EXTENSIONS: [&str; 5] = ["mp3", "wav", "m4a", "ogg", "aac"];

/// Default URL path under which the assets are served.
pub const DEFAULT_URL_PREFIX: &str = "/tracks_real_assets";

/// Options for a mapping run.
#[derive(Debug, Clone)]
pub struct MapVocalsOptions {
    /// Track index to rewrite.
    pub tracks: PathBuf,
    /// Folder holding one subfolder of assets per theme.
    pub source: PathBuf,
    /// URL path of `source`.
    pub url_prefix: String,
}

/// Asset pool of one theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemePool {
    /// Theme (style id) the files belong to.
    pub theme: String,
    /// File names, sorted.
    pub files: Vec<String>,
}

/// Outcome of a mapping run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingSummary {
    /// Tracks pointed at an asset.
    pub updated: usize,
    /// Tracks whose theme has no assets.
    pub skipped: usize,
    /// Pools in order of first appearance in the index.
    pub pools: Vec<ThemePool>,
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Lists the audio files directly inside `dir`, sorted by name. A missing
/// folder gives an empty list.
pub fn list_audio_files(dir: &Path) -> Vec<String> {
    if !dir.is_dir() {
        return Vec::new();
    }
    let mut files: Vec<String> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| is_audio_file(e.path()))
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .collect();
    files.sort();
    files
}

/// Assigns pool files to tracks round-robin per theme.
///
/// The n-th track of a theme gets file `n % pool.len()`. Tracks whose theme
/// has an empty pool are left untouched.
pub fn assign_vocals(
    tracks: &mut [TrackDescriptor],
    pools: &[ThemePool],
    url_prefix: &str,
) -> (usize, usize) {
    let prefix = url_prefix.trim_end_matches('/');
    let mut counters = vec![0usize; pools.len()];
    let mut updated = 0;
    let mut skipped = 0;

    for track in tracks.iter_mut() {
        let slot = pools
            .iter()
            .position(|p| p.theme == track.theme && !p.files.is_empty());
        let Some(slot) = slot else {
            skipped += 1;
            continue;
        };

        let pool = &pools[slot];
        let file = &pool.files[counters[slot] % pool.files.len()];
        counters[slot] += 1;

        track.file = format!("{}/{}/{}", prefix, track.theme, file);
        track.vocal = true;
        track.add_tag("vocal");
        track.add_tag("real");
        updated += 1;
    }

    (updated, skipped)
}

/// Builds the pools for the themes of an index, in first-appearance order.
pub fn collect_pools(tracks: &[TrackDescriptor], source: &Path) -> Vec<ThemePool> {
    let mut pools: Vec<ThemePool> = Vec::new();
    for track in tracks {
        if pools.iter().any(|p| p.theme == track.theme) {
            continue;
        }
        pools.push(ThemePool {
            theme: track.theme.clone(),
            files: list_audio_files(&source.join(&track.theme)),
        });
    }
    pools
}

/// Rewrites the index at `options.tracks` in place.
pub fn map_vocals(options: &MapVocalsOptions) -> Result<MappingSummary> {
    let json = fs::read_to_string(&options.tracks)
        .with_context(|| format!("Failed to read track index: {}", options.tracks.display()))?;
    let mut tracks = parse_track_index(&json)
        .with_context(|| format!("Failed to parse track index: {}", options.tracks.display()))?;

    let pools = collect_pools(&tracks, &options.source);
    let (updated, skipped) = assign_vocals(&mut tracks, &pools, &options.url_prefix);

    fs::write(&options.tracks, track_index_to_json(&tracks)?)
        .with_context(|| format!("Failed to write track index: {}", options.tracks.display()))?;

    Ok(MappingSummary {
        updated,
        skipped,
        pools,
    })
}

/// Run the map-vocals command
pub fn run(options: &MapVocalsOptions, json_output: bool) -> Result<ExitCode> {
    let summary = map_vocals(options)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Mapped".cyan().bold(), options.tracks.display());
    println!("  {} {}", "source:".dimmed(), options.source.display());
    println!("  {} {}", "updated:".dimmed(), summary.updated);
    println!("  {} {}", "skipped (no source files):".dimmed(), summary.skipped);
    for pool in &summary.pools {
        println!("  {}: {} source files", pool.theme, pool.files.len());
    }

    Ok(ExitCode::SUCCESS)
}
