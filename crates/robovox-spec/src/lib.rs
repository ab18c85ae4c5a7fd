//! Robovox Canonical Types
//!
//! This crate provides the shared data model for the Robovox procedural song
//! generator: style profiles, generation requests, seed derivation, and the
//! track metadata written next to generated audio.
//!
//! # Overview
//!
//! - **Style profiles** bundle a genre's tempo range, harmonic material and
//!   timbral tunables. A [`StyleTable`] is built once at startup and shared
//!   read-only with every generation call.
//! - **Generation requests** name a style, a seed, and a target duration.
//! - **Seeds** for batch tracks and prompt-driven fallbacks are derived here,
//!   outside the engine, so the engine only ever sees a resolved `u32`.
//!
//! # Example
//!
//! ```
//! use robovox_spec::{GenerationRequest, Preset, StyleTable};
//!
//! let styles = StyleTable::builtin(Preset::Tracks);
//! let rock = styles.get("rock").unwrap();
//! assert_eq!(rock.tempo.min, 120);
//!
//! let request = GenerationRequest::new("rock", 42, 8.0);
//! assert_eq!(request.sample_rate, robovox_spec::CANONICAL_SAMPLE_RATE);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error type and the [`BackendError`] trait
//! - [`note`]: Note number to frequency conversion and note names
//! - [`request`]: Per-call generation request
//! - [`seed`]: Seed derivation utilities
//! - [`style`]: Style profiles, presets and tables
//! - [`track`]: Track metadata descriptors

pub mod error;
pub mod note;
pub mod request;
pub mod seed;
pub mod style;
pub mod track;

// Re-export commonly used types at the crate root
pub use error::{BackendError, SpecError, SpecResult};
pub use note::{midi_to_frequency, note_name};
pub use request::{
    GenerationRequest, CANONICAL_SAMPLE_RATE, MAX_DURATION_SECONDS, MAX_SAMPLE_RATE, MAX_TEMPO_BPM,
    MIN_SAMPLE_RATE,
};
pub use seed::{text_seed, track_seed, SeedScheme};
pub use style::{
    is_valid_style_id, validate_profile, DrumKit, FormantSet, HarmonyVariation, Hit, Kick,
    MasteringParams, MelodicWalk, Partial, Preset, StyleProfile, StyleTable, TempoRange, VocalTimbre, VoiceLevels,
    MAX_HIT_SECONDS,
};
pub use track::{
    parse_track_index, track_index_to_json, TrackDescriptor, GENERATED_LICENSE, LICENSE_TEXT,
};
