//! Robovox Synthesis Engine
//!
//! Renders a short procedural song (bass, lead, pseudo-vocal and drums) from a
//! style profile and a seed, masters it, and encodes it as a 16-bit mono WAVE
//! file.
//!
//! # Determinism
//!
//! All randomness comes from a 32-bit LCG seeded per call. Given the same
//! style, seed, duration and sample rate, the output is byte-identical. Calls
//! share nothing mutable, so they can run on any number of threads.
//!
//! # Example
//!
//! ```
//! use robovox_spec::{GenerationRequest, Preset, StyleTable};
//! use robovox_synth::generate;
//!
//! let styles = StyleTable::builtin(Preset::Tracks);
//! let request = GenerationRequest::new("lullaby", 12345, 1.0);
//! let result = generate(&styles, &request).unwrap();
//!
//! assert!((68..88).contains(&result.tempo_bpm));
//! assert_eq!(result.audio.wav_data.len(), 44 + 2 * 22050);
//! ```
//!
//! # Crate Structure
//!
//! - [`generate()`] - Main entry point
//! - [`rng`] - Deterministic LCG
//! - [`plan`] - Tempo and melodic walk
//! - [`synthesis`] - Voices and drums
//! - [`master`] - Soft clip, gain and fades
//! - [`wav`] - WAVE encoder and header inspection

pub mod buffer;
pub mod error;
pub mod generate;
pub mod master;
pub mod plan;
pub mod rng;
pub mod synthesis;
pub mod wav;

pub use buffer::SampleBuffer;
pub use error::{SynthError, SynthResult};
pub use generate::{
    generate, generate_with_profile, render, validate_request, GenerateResult, Key, Rendering,
};
pub use plan::{plan_composition, CompositionPlan, Harmony};
pub use rng::Lcg32;
pub use wav::{EncodedAudio, WavHeader};
