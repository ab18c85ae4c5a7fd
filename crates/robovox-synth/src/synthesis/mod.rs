//! Signal synthesis.
//!
//! Each voice is a pure function of the sample position:
//! - `bass` - Sine one octave below the bar's root, optionally swelling
//! - `lead` - Saw/triangle blend following the melody, gated per step
//! - `vocal` - Vibrato carrier with harmonic or vowel formants
//!
//! Percussion is rendered separately, once per beat, by [`drums`].

pub mod drums;
pub mod oscillators;
pub mod voices;

pub use drums::render_drums;
pub use voices::{BassVoice, LeadVoice, VocalVoice};

use robovox_spec::StyleProfile;

use crate::buffer::SampleBuffer;
use crate::plan::CompositionPlan;

/// Where a sample falls on the musical grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Time in seconds.
    pub t: f64,
    /// Time in beats.
    pub beat: f64,
    /// Bar index (four beats per bar).
    pub bar: usize,
    /// Eighth-note step index, not yet wrapped to the melody length.
    pub step: usize,
}

impl Position {
    /// Computes the grid position of sample `index`.
    #[inline]
    pub fn at(index: usize, sample_rate: f64, beat_seconds: f64) -> Self {
        let t = index as f64 / sample_rate;
        let beat = t / beat_seconds;
        Self {
            t,
            beat,
            bar: (beat / 4.0).floor() as usize,
            step: (beat * 2.0).floor() as usize,
        }
    }
}

/// A continuous voice evaluated independently at every sample.
pub trait Voice {
    /// Amplitude contribution at `pos`.
    fn sample(&self, pos: &Position) -> f64;
}

/// Builds the continuous voices a style enables.
pub fn voices_for<'a>(style: &'a StyleProfile, plan: &'a CompositionPlan) -> Vec<Box<dyn Voice + 'a>> {
    let mut voices: Vec<Box<dyn Voice + 'a>> = vec![
        Box::new(BassVoice::new(style, plan)),
        Box::new(LeadVoice::new(style, plan)),
    ];
    if let Some(timbre) = &style.vocal {
        voices.push(Box::new(VocalVoice::new(timbre, plan)));
    }
    voices
}

/// Accumulates every continuous voice into `buffer`.
pub fn render_voices(
    buffer: &mut SampleBuffer,
    style: &StyleProfile,
    plan: &CompositionPlan,
    sample_rate: u32,
) {
    let voices = voices_for(style, plan);
    let sample_rate = sample_rate as f64;

    for (index, out) in buffer.as_mut_slice().iter_mut().enumerate() {
        let pos = Position::at(index, sample_rate, plan.beat_seconds);
        *out += voices.iter().map(|voice| voice.sample(&pos)).sum::<f64>();
    }
}
