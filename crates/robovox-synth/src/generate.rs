//! Main entry point for song generation.
//!
//! Pipeline: request validation, planning, voices, drums, mastering, and
//! encoding. Every call builds its own generator and buffer; the style table
//! is only ever read.

use robovox_spec::{
    note_name, validate_profile, GenerationRequest, StyleProfile, StyleTable, MAX_DURATION_SECONDS,
    MAX_SAMPLE_RATE, MAX_TEMPO_BPM, MIN_SAMPLE_RATE,
};
use tracing::debug;

use crate::buffer::SampleBuffer;
use crate::error::{SynthError, SynthResult};
use crate::master::master;
use crate::plan::{plan_composition, CompositionPlan, Harmony};
use crate::rng::create_rng;
use crate::synthesis::{render_drums, render_voices};
use crate::wav::EncodedAudio;

/// Tonal centre of a song: the root of its first bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    /// MIDI note number.
    pub root: u8,
    /// Scientific pitch name, e.g. "E2".
    pub name: String,
}

impl Key {
    /// Key of a song's harmony.
    pub fn of(harmony: &Harmony) -> Self {
        let root = harmony.root_for_bar(0);
        Self {
            root,
            name: note_name(root),
        }
    }
}

/// Mastered float samples with the plan that produced them.
#[derive(Debug, Clone)]
pub struct Rendering {
    /// Mastered mono samples, all within (-1, 1).
    pub samples: SampleBuffer,
    /// Tempo and melody used.
    pub plan: CompositionPlan,
}

/// Result of song generation.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// Encoded WAVE file.
    pub audio: EncodedAudio,
    /// Chosen tempo in bpm.
    pub tempo_bpm: u32,
    /// Key of the song.
    pub key: Key,
    /// Number of melody steps.
    pub step_count: usize,
    /// Number of output samples.
    pub num_samples: usize,
}

/// Checks request parameters and returns the output sample count.
pub fn validate_request(request: &GenerationRequest) -> SynthResult<usize> {
    let duration = request.duration_seconds;
    if !duration.is_finite() || duration <= 0.0 {
        return Err(SynthError::invalid_param(
            "duration_seconds",
            format!("must be a positive number of seconds, got {}", duration),
        ));
    }
    if duration > MAX_DURATION_SECONDS {
        return Err(SynthError::invalid_param(
            "duration_seconds",
            format!("must be <= {} seconds, got {}", MAX_DURATION_SECONDS, duration),
        ));
    }
    if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&request.sample_rate) {
        return Err(SynthError::invalid_param(
            "sample_rate",
            format!(
                "must be within {}..={} Hz, got {}",
                MIN_SAMPLE_RATE, MAX_SAMPLE_RATE, request.sample_rate
            ),
        ));
    }
    if let Some(bpm) = request.tempo_override {
        if bpm == 0 || bpm > MAX_TEMPO_BPM {
            return Err(SynthError::invalid_param(
                "tempo_override",
                format!("must be within 1..={} bpm, got {}", MAX_TEMPO_BPM, bpm),
            ));
        }
    }

    let num_samples = request.num_samples();
    if num_samples == 0 {
        return Err(SynthError::invalid_param(
            "duration_seconds",
            format!("{} seconds is shorter than one sample", duration),
        ));
    }
    Ok(num_samples)
}

/// Renders mastered float samples for a style.
///
/// # Errors
/// * [`SynthError::Style`] if the profile fails validation
/// * [`SynthError::InvalidParameters`] for a degenerate request
pub fn render(style: &StyleProfile, request: &GenerationRequest) -> SynthResult<Rendering> {
    validate_profile(style)?;
    let num_samples = validate_request(request)?;
    let mut rng = create_rng(request.seed);

    let plan = plan_composition(
        style,
        &mut rng,
        request.duration_seconds,
        request.tempo_override,
    );

    let mut samples = SampleBuffer::zeros(num_samples);
    render_voices(&mut samples, style, &plan, request.sample_rate);
    render_drums(
        &mut samples,
        &style.drums,
        &plan,
        request.sample_rate,
        request.duration_seconds,
        &mut rng,
    );
    master(&mut samples, &style.mastering, request.sample_rate);

    debug!(
        style = %style.id,
        seed = request.seed,
        tempo_bpm = plan.tempo_bpm,
        steps = plan.step_count,
        samples = num_samples,
        "rendered song"
    );

    Ok(Rendering { samples, plan })
}

/// Generates a song with a style from `styles`.
///
/// # Errors
/// * [`SynthError::StyleNotFound`] if the id is not in the table
/// * [`SynthError::InvalidParameters`] for a degenerate duration or sample rate
pub fn generate(styles: &StyleTable, request: &GenerationRequest) -> SynthResult<GenerateResult> {
    let style = styles
        .get(&request.style_id)
        .ok_or_else(|| SynthError::style_not_found(&request.style_id))?;
    generate_from_style(style, request)
}

/// Generates a song from a standalone profile, validating it first.
pub fn generate_with_profile(
    style: &StyleProfile,
    request: &GenerationRequest,
) -> SynthResult<GenerateResult> {
    generate_from_style(style, request)
}

fn generate_from_style(style: &StyleProfile, request: &GenerationRequest) -> SynthResult<GenerateResult> {
    let Rendering { samples, plan } = render(style, request)?;
    let audio = EncodedAudio::from_mono(samples.as_slice(), request.sample_rate);

    Ok(GenerateResult {
        tempo_bpm: plan.tempo_bpm,
        key: Key::of(&plan.harmony),
        step_count: plan.step_count,
        num_samples: audio.num_samples,
        audio,
    })
}
