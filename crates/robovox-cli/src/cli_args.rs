//! CLI argument definitions for the Robovox command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use robovox_cli::config::PresetArg;

/// Robovox - Procedural Song Generator
#[derive(Parser)]
#[command(name = "robovox")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Built-in style table (default: fallback for the fallback command, tracks otherwise)
    #[arg(long, global = true, value_enum)]
    pub preset: Option<PresetArg>,

    /// JSON style table replacing the built-in preset
    #[arg(long, global = true)]
    pub styles: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Generate a folder of tracks for every style, plus tracks.json
    Batch {
        /// Output directory (default: public/tracks, or public/tracks_real_assets for --preset vocal)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Tracks per style
        #[arg(short, long)]
        count: Option<u32>,

        /// Track duration in seconds (default: 8, or 10 for --preset vocal)
        #[arg(short, long)]
        duration: Option<f64>,

        /// Sample rate in Hz
        #[arg(long, default_value_t = robovox_spec::CANONICAL_SAMPLE_RATE)]
        sample_rate: u32,

        /// URL path the output directory is served under (default: /<out dir name>)
        #[arg(long)]
        url_prefix: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Render a single track
    Render {
        /// Style id
        #[arg(short, long)]
        style: String,

        /// Seed
        #[arg(long, default_value_t = 0)]
        seed: u32,

        /// Duration in seconds
        #[arg(short, long, default_value_t = 8.0)]
        duration: f64,

        /// Sample rate in Hz
        #[arg(long, default_value_t = robovox_spec::CANONICAL_SAMPLE_RATE)]
        sample_rate: u32,

        /// Fixed tempo in bpm instead of a sampled one
        #[arg(long)]
        bpm: Option<u32>,

        /// Output WAVE file
        #[arg(short, long)]
        out: PathBuf,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Render the prompt-driven fallback song and print its JSON payload
    Fallback {
        /// Display genre name (Jazz, Rock, Hip-hop, K-Pop, Lullaby)
        #[arg(short, long, default_value = "Jazz")]
        genre: String,

        /// Requested tempo, clamped to 80..=170
        #[arg(long)]
        bpm: Option<u32>,

        /// Free-text prompt
        #[arg(short, long)]
        prompt: Option<String>,

        /// Write the WAVE here instead of embedding it as a data URL
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the header fields, duration, peak and PCM hash of a WAVE file
    Inspect {
        /// WAVE file
        file: PathBuf,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Point tracks.json entries at recorded vocal assets
    MapVocals {
        /// Track index to rewrite
        #[arg(short, long)]
        tracks: PathBuf,

        /// Folder with one subfolder of assets per theme
        #[arg(short, long)]
        source: PathBuf,

        /// URL path the source folder is served under
        #[arg(long, default_value = robovox_cli::commands::map_vocals::DEFAULT_URL_PREFIX)]
        url_prefix: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List the active style table
    Styles {
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },
}
