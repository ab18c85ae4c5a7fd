//! Composition planning: tempo, harmony, step grid and melody.

use robovox_spec::{HarmonyVariation, StyleProfile};

use crate::rng::Lcg32;

/// Progression and scale a song is played in.
#[derive(Debug, Clone, PartialEq)]
pub struct Harmony {
    /// Root note per bar, cycled; entry 0 plays on bar 0.
    pub roots: Vec<u8>,
    /// Semitone offsets of the scale degrees.
    pub scale: Vec<u8>,
}

impl Harmony {
    /// The style's progression and scale, unvaried.
    pub fn of(style: &StyleProfile) -> Self {
        Self {
            roots: style.roots.clone(),
            scale: style.scale.clone(),
        }
    }

    /// Root note for a bar index.
    #[inline]
    pub fn root_for_bar(&self, bar: usize) -> u8 {
        self.roots[bar % self.roots.len()]
    }

    /// Semitone offset of a scale degree.
    #[inline]
    pub fn offset(&self, degree: usize) -> u8 {
        self.scale[degree % self.scale.len()]
    }
}

/// Draws a song's harmony: one lift draw per root, one scale choice when
/// candidates exist, then the starting bar.
fn vary_harmony(style: &StyleProfile, variation: &HarmonyVariation, rng: &mut Lcg32) -> Harmony {
    let mut roots: Vec<u8> = style
        .roots
        .iter()
        .map(|&root| {
            if rng.next_f64() > variation.lift_threshold {
                root.saturating_add(variation.lift)
            } else {
                root
            }
        })
        .collect();

    let scale = if variation.scales.is_empty() {
        style.scale.clone()
    } else {
        variation.scales[rng.next_index(variation.scales.len())].clone()
    };

    let start_bar = rng.next_index(variation.bar_offsets.max(1) as usize);
    let len = roots.len();
    roots.rotate_left(start_bar % len);

    Harmony { roots, scale }
}

/// Call-scoped arrangement derived from a style and a seeded generator.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionPlan {
    /// Tempo in whole beats per minute.
    pub tempo_bpm: u32,
    /// Progression and scale after variation.
    pub harmony: Harmony,
    /// Beat length in seconds.
    pub beat_seconds: f64,
    /// Number of eighth-note steps that fit the duration.
    pub step_count: usize,
    /// Scale-degree index per step. Never empty; every entry is below the
    /// scale length.
    pub melody: Vec<usize>,
}

impl CompositionPlan {
    /// Scale degree for a step, cycling through the melody.
    #[inline]
    pub fn degree_at(&self, step: usize) -> usize {
        self.melody[step % self.melody.len()]
    }

    /// Number of whole beats in `duration_seconds`.
    pub fn beat_count(&self, duration_seconds: f64) -> usize {
        (duration_seconds / self.beat_seconds).floor() as usize
    }
}

/// Wraps a possibly negative degree into `[0, len)`.
#[inline]
fn wrap_degree(index: i64, len: usize) -> usize {
    index.rem_euclid(len as i64) as usize
}

/// Derives the tempo and melodic sequence for one generation call.
///
/// Draw order: one value for the tempo (consumed even when `tempo_override`
/// is set), the harmony draws when the style carries a variation, one for
/// the starting degree, then one per step for the walk plus one per phrase
/// reset.
///
/// # Arguments
/// * `style` - Validated style profile
/// * `rng` - The call's generator, advanced in place
/// * `duration_seconds` - Target duration
/// * `tempo_override` - Fixed tempo replacing the sampled one
pub fn plan_composition(
    style: &StyleProfile,
    rng: &mut Lcg32,
    duration_seconds: f64,
    tempo_override: Option<u32>,
) -> CompositionPlan {
    let sampled = style.tempo.sample(rng.next_f64());
    let tempo_bpm = tempo_override.unwrap_or(sampled);
    let beat_seconds = 60.0 / tempo_bpm as f64;
    let step_count = (duration_seconds / (beat_seconds / 2.0)).floor() as usize;

    let harmony = match &style.variation {
        Some(variation) => vary_harmony(style, variation, rng),
        None => Harmony::of(style),
    };

    let scale_len = harmony.scale.len();
    let mut degree = rng.next_index(scale_len) as i64;
    let mut melody = Vec::with_capacity(step_count.max(1));

    for step in 0..step_count {
        degree += style.walk.movement(rng.next_f64());
        if let Some(phrase) = style.walk.phrase_length {
            if step % phrase as usize == 0 {
                degree = rng.next_index(scale_len) as i64;
            }
        }
        degree = wrap_degree(degree, scale_len) as i64;
        melody.push(degree as usize);
    }

    if melody.is_empty() {
        melody.push(wrap_degree(degree, scale_len));
    }

    CompositionPlan {
        tempo_bpm,
        harmony,
        beat_seconds,
        step_count,
        melody,
    }
}
