//! Style profiles.
//!
//! A style profile is an immutable genre preset: tempo range, root-note
//! progression, scale, drive, and the timbral tunables for every voice of the
//! synthesizer. Profiles are loaded once into a [`StyleTable`] and never
//! mutated afterwards.

mod presets;
mod table;
mod validation;


pub use presets::Preset;
pub use table::StyleTable;
pub use validation::{is_valid_style_id, validate_profile, MAX_HIT_SECONDS};

use serde::{Deserialize, Serialize};

/// Tempo range in beats per minute.
///
/// Serialized as a `[min, max]` pair. Sampling covers `[min, max)`; a range
/// with `min == max` always yields `min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct TempoRange {
    /// Lowest tempo (inclusive).
    pub min: u32,
    /// Highest tempo (exclusive unless equal to `min`).
    pub max: u32,
}

impl TempoRange {
    /// Creates a tempo range.
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Maps a uniform draw in `[0, 1)` onto the range, flooring to whole bpm.
    pub fn sample(&self, unit: f64) -> u32 {
        let span = self.max.saturating_sub(self.min);
        if span == 0 {
            return self.min;
        }
        let offset = (unit.clamp(0.0, 1.0) * span as f64).floor() as u32;
        self.min + offset.min(span - 1)
    }

    /// Returns true if `bpm` lies within `[min, max]`.
    pub fn contains(&self, bpm: u32) -> bool {
        (self.min..=self.max).contains(&bpm)
    }
}

impl From<[u32; 2]> for TempoRange {
    fn from(pair: [u32; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<TempoRange> for [u32; 2] {
    fn from(range: TempoRange) -> Self {
        [range.min, range.max]
    }
}

/// Levels of the continuous backing voices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct VoiceLevels {
    /// Bass sine amplitude before drive scaling.
    pub bass: f64,
    /// Lead gate level on even (accented) steps.
    pub lead_accent: f64,
    /// Lead gate level on odd steps.
    pub lead_weak: f64,
    /// Sawtooth share of the lead blend; the triangle gets the remainder.
    pub saw_blend: f64,
    /// Rate of the slow bass swell in Hz.
    pub bass_lfo_rate: f64,
    /// Depth of the bass swell; 0 holds the bass steady.
    pub bass_lfo_depth: f64,
}

impl Default for VoiceLevels {
    fn default() -> Self {
        Self {
            bass: 0.17,
            lead_accent: 0.12,
            lead_weak: 0.07,
            saw_blend: 0.65,
            bass_lfo_rate: 0.0,
            bass_lfo_depth: 0.0,
        }
    }
}

/// Biased random walk over scale degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct MelodicWalk {
    /// Cumulative probabilities for a +2, +1, -1 and -2 move; the rest holds.
    pub thresholds: [f64; 4],
    /// Redraw a fresh random degree every `phrase_length` steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phrase_length: Option<u32>,
}

impl Default for MelodicWalk {
    fn default() -> Self {
        Self {
            thresholds: [0.2, 0.5, 0.75, 0.88],
            phrase_length: None,
        }
    }
}

impl MelodicWalk {
    /// Maps one uniform draw to a degree movement.
    pub fn movement(&self, draw: f64) -> i64 {
        let [up_leap, up_step, down_step, down_leap] = self.thresholds;
        if draw < up_leap {
            2
        } else if draw < up_step {
            1
        } else if draw < down_step {
            -1
        } else if draw < down_leap {
            -2
        } else {
            0
        }
    }
}

/// A harmonic partial relative to the vocal carrier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Partial {
    /// Frequency multiple of the carrier.
    pub ratio: f64,
    /// Gain relative to the carrier.
    pub gain: f64,
}

/// Resonances layered on the vocal carrier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum FormantSet {
    /// Sine partials at fixed multiples of the carrier frequency.
    Harmonic {
        /// Partials summed with the carrier.
        partials: Vec<Partial>,
    },
    /// Fixed vowel formants ring-modulated by the carrier.
    Vowel {
        /// F1, F2, F3 in Hz.
        frequencies: [f64; 3],
        /// Gain per formant.
        gains: [f64; 3],
    },
}

/// Pseudo-vocal layer parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VocalTimbre {
    /// Semitones above the melody note.
    pub interval: i32,
    /// Vibrato rate in Hz.
    pub vibrato_rate: f64,
    /// Vibrato depth as a fraction of the carrier frequency.
    pub vibrato_depth: f64,
    /// Carrier sine gain.
    pub carrier_gain: f64,
    /// Overall layer level.
    pub level: f64,
    /// Syllable envelope cycles per beat; 0 holds the voice open.
    pub syllable_rate: f64,
    /// Melody steps advanced per beat by the vocal line.
    pub phrase_rate: f64,
    /// Envelope level on odd beats (1.0 disables the pulse).
    pub offbeat_level: f64,
    /// Scale degrees the vocal line sits above the melody.
    #[serde(default)]
    pub degree_shift: usize,
    /// Harmonic partials track the vibrato instead of the steady note.
    #[serde(default)]
    pub partials_follow_vibrato: bool,
    /// Resonances added to the carrier.
    pub formants: FormantSet,
}

/// Per-song changes to the progression and scale, drawn after the tempo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct HarmonyVariation {
    /// A root is lifted when its draw lands above this value.
    pub lift_threshold: f64,
    /// Semitones added to a lifted root.
    pub lift: u8,
    /// Candidate scales, one drawn per song. Empty keeps the style's scale.
    pub scales: Vec<Vec<u8>>,
    /// The progression starts on a bar drawn from `0..bar_offsets`.
    pub bar_offsets: u32,
}

impl Default for HarmonyVariation {
    fn default() -> Self {
        Self {
            lift_threshold: 0.7,
            lift: 2,
            scales: Vec::new(),
            bar_offsets: 1,
        }
    }
}

/// Kick drum: a decaying sine with a downward pitch sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Kick {
    /// Hit length in seconds.
    pub length: f64,
    /// Exponential decay rate (1/s).
    pub decay: f64,
    /// Start frequency in Hz.
    pub start_freq: f64,
    /// Frequency drop in Hz per second.
    pub sweep: f64,
    /// Peak gain.
    pub gain: f64,
}

/// Noise hit (snare or hat).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Hit {
    /// Hit length in seconds.
    pub length: f64,
    /// Exponential decay rate (1/s).
    pub decay: f64,
    /// Peak gain.
    pub gain: f64,
}

/// Drum kit tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DrumKit {
    /// Kick on every beat.
    pub kick: Kick,
    /// Snare on beats 1 and 3 of each bar.
    pub snare: Hit,
    /// Hat on and halfway through every beat.
    pub hat: Hit,
}

impl Default for DrumKit {
    fn default() -> Self {
        Self {
            kick: Kick {
                length: 0.15,
                decay: 20.0,
                start_freq: 115.0,
                sweep: 70.0,
                gain: 0.55,
            },
            snare: Hit {
                length: 0.12,
                decay: 24.0,
                gain: 0.2,
            },
            hat: Hit {
                length: 0.025,
                decay: 110.0,
                gain: 0.08,
            },
        }
    }
}

/// Final dynamics stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct MasteringParams {
    /// Input multiplier for the tanh soft clip.
    pub drive: f64,
    /// Output gain after clipping; must stay below 1.
    pub gain: f64,
    /// Fade-in window in seconds.
    pub fade_in: f64,
    /// Fade-out window in seconds.
    pub fade_out: f64,
}

impl Default for MasteringParams {
    fn default() -> Self {
        Self {
            drive: 1.3,
            gain: 0.68,
            fade_in: 0.08,
            fade_out: 0.2,
        }
    }
}

/// A genre preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleProfile {
    /// Style identifier (e.g. "rock").
    pub id: String,
    /// Tempo range in bpm.
    #[serde(rename = "bpm")]
    pub tempo: TempoRange,
    /// Root note per bar, cycled.
    pub roots: Vec<u8>,
    /// Semitone offsets from the root, ascending, ending on the octave.
    pub scale: Vec<u8>,
    /// Energy scalar in (0, 1].
    pub drive: f64,
    /// Semitones added to the lead oscillator only.
    #[serde(default)]
    pub lead_transpose: i32,
    /// Backing voice levels.
    #[serde(default)]
    pub voices: VoiceLevels,
    /// Melodic walk distribution.
    #[serde(default)]
    pub walk: MelodicWalk,
    /// Optional per-song harmony variation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation: Option<HarmonyVariation>,
    /// Optional pseudo-vocal layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocal: Option<VocalTimbre>,
    /// Percussion tunables.
    #[serde(default)]
    pub drums: DrumKit,
    /// Mastering tunables.
    #[serde(default)]
    pub mastering: MasteringParams,
}

impl StyleProfile {
    /// Number of scale degrees.
    pub fn scale_len(&self) -> usize {
        self.scale.len()
    }
}
