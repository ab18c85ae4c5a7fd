//! Per-call generation request.

use serde::{Deserialize, Serialize};

/// Sample rate used across the system.
pub const CANONICAL_SAMPLE_RATE: u32 = 22050;

/// Longest duration the engine will render.
pub const MAX_DURATION_SECONDS: f64 = 600.0;

/// Lowest accepted sample rate.
pub const MIN_SAMPLE_RATE: u32 = 8000;

/// Highest accepted sample rate.
pub const MAX_SAMPLE_RATE: u32 = 192_000;

/// Fastest tempo a style range or tempo override may ask for.
pub const MAX_TEMPO_BPM: u32 = 400;

/// One generation call: created by the caller, consumed once by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationRequest {
    /// Style identifier to look up in the style table.
    pub style_id: String,
    /// Resolved PRNG seed.
    pub seed: u32,
    /// Target duration in seconds.
    pub duration_seconds: f64,
    /// Output sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Fixed tempo that replaces the sampled one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo_override: Option<u32>,
}

fn default_sample_rate() -> u32 {
    CANONICAL_SAMPLE_RATE
}

impl GenerationRequest {
    /// Creates a request at the canonical sample rate.
    pub fn new(style_id: impl Into<String>, seed: u32, duration_seconds: f64) -> Self {
        Self {
            style_id: style_id.into(),
            seed,
            duration_seconds,
            sample_rate: CANONICAL_SAMPLE_RATE,
            tempo_override: None,
        }
    }

    /// Sets the sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Pins the tempo instead of sampling it from the style range.
    pub fn with_tempo(mut self, bpm: u32) -> Self {
        self.tempo_override = Some(bpm);
        self
    }

    /// Output sample count: `round(duration * sample_rate)`.
    ///
    /// Returns 0 for non-finite or non-positive durations.
    pub fn num_samples(&self) -> usize {
        let samples = self.duration_seconds * self.sample_rate as f64;
        if samples.is_finite() && samples > 0.0 {
            samples.round() as usize
        } else {
            0
        }
    }
}
