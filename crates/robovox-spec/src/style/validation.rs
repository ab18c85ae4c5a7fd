//! Style profile validation.

use std::sync::OnceLock;

use regex::Regex;

use super::{FormantSet, Hit, StyleProfile};
use crate::error::{SpecError, SpecResult};
use crate::request::MAX_TEMPO_BPM;

/// Longest drum hit, in seconds.
pub const MAX_HIT_SECONDS: f64 = 2.0;

fn style_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z][a-z0-9_-]{1,31}$").expect("valid regex"))
}

/// Returns true if `id` is a well-formed style identifier.
pub fn is_valid_style_id(id: &str) -> bool {
    style_id_pattern().is_match(id)
}

fn check(cond: bool, id: &str, message: impl FnOnce() -> String) -> SpecResult<()> {
    if cond {
        Ok(())
    } else {
        Err(SpecError::invalid_style(id, message()))
    }
}

fn positive(id: &str, name: &str, value: f64) -> SpecResult<()> {
    check(value.is_finite() && value > 0.0, id, || {
        format!("{} must be positive, got {}", name, value)
    })
}

fn non_negative(id: &str, name: &str, value: f64) -> SpecResult<()> {
    check(value.is_finite() && value >= 0.0, id, || {
        format!("{} must be >= 0, got {}", name, value)
    })
}

fn hit_length(id: &str, name: &str, length: f64) -> SpecResult<()> {
    check(
        length.is_finite() && (0.0..=MAX_HIT_SECONDS).contains(&length),
        id,
        || format!("drums.{}.length must be in [0, {}] s, got {}", name, MAX_HIT_SECONDS, length),
    )
}

fn validate_scale(id: &str, name: &str, scale: &[u8]) -> SpecResult<()> {
    check(!scale.is_empty(), id, || format!("{} must not be empty", name))?;
    check(scale.windows(2).all(|w| w[0] < w[1]), id, || {
        format!("{} offsets must be strictly ascending", name)
    })
}

fn validate_hit(id: &str, name: &str, hit: &Hit) -> SpecResult<()> {
    hit_length(id, name, hit.length)?;
    positive(id, &format!("drums.{}.decay", name), hit.decay)?;
    non_negative(id, &format!("drums.{}.gain", name), hit.gain)
}

/// Validates a single style profile.
///
/// Guarantees the planner and synthesizer rely on: a positive tempo no faster
/// than [`MAX_TEMPO_BPM`], bounded drum hits, at least one root, non-empty
/// strictly ascending scales (including variation candidates), and a
/// mastering gain below one.
pub fn validate_profile(profile: &StyleProfile) -> SpecResult<()> {
    let id = profile.id.as_str();

    check(is_valid_style_id(id), id, || {
        "id must match ^[a-z][a-z0-9_-]{1,31}$".to_string()
    })?;

    let tempo = profile.tempo;
    check(tempo.min > 0, id, || "bpm minimum must be > 0".to_string())?;
    check(tempo.min <= tempo.max, id, || {
        format!("bpm range [{}, {}] is inverted", tempo.min, tempo.max)
    })?;
    check(tempo.max <= MAX_TEMPO_BPM, id, || {
        format!("bpm maximum must be <= {}, got {}", MAX_TEMPO_BPM, tempo.max)
    })?;

    check(!profile.roots.is_empty(), id, || "roots must not be empty".to_string())?;
    check(profile.roots.iter().all(|&r| (12..=108).contains(&r)), id, || {
        "roots must lie within MIDI notes 12..=108".to_string()
    })?;

    validate_scale(id, "scale", &profile.scale)?;

    if let Some(variation) = &profile.variation {
        check((0.0..=1.0).contains(&variation.lift_threshold), id, || {
            format!(
                "variation.lift_threshold must be in [0, 1], got {}",
                variation.lift_threshold
            )
        })?;
        check(variation.lift <= 12, id, || {
            format!("variation.lift must be <= 12 semitones, got {}", variation.lift)
        })?;
        for scale in &variation.scales {
            validate_scale(id, "variation.scales entry", scale)?;
        }
        check(variation.bar_offsets > 0, id, || {
            "variation.bar_offsets must be > 0".to_string()
        })?;
    }

    check(
        profile.drive.is_finite() && profile.drive > 0.0 && profile.drive <= 1.0,
        id,
        || format!("drive must be in (0, 1], got {}", profile.drive),
    )?;

    let voices = &profile.voices;
    non_negative(id, "voices.bass", voices.bass)?;
    non_negative(id, "voices.lead_accent", voices.lead_accent)?;
    non_negative(id, "voices.lead_weak", voices.lead_weak)?;
    check((0.0..=1.0).contains(&voices.saw_blend), id, || {
        format!("voices.saw_blend must be in [0, 1], got {}", voices.saw_blend)
    })?;
    non_negative(id, "voices.bass_lfo_rate", voices.bass_lfo_rate)?;
    check((0.0..=1.0).contains(&voices.bass_lfo_depth), id, || {
        format!("voices.bass_lfo_depth must be in [0, 1], got {}", voices.bass_lfo_depth)
    })?;

    let thresholds = profile.walk.thresholds;
    check(
        thresholds.iter().all(|t| (0.0..=1.0).contains(t))
            && thresholds.windows(2).all(|w| w[0] <= w[1]),
        id,
        || "walk thresholds must be non-decreasing within [0, 1]".to_string(),
    )?;
    check(profile.walk.phrase_length != Some(0), id, || {
        "walk.phrase_length must be > 0 when set".to_string()
    })?;

    if let Some(vocal) = &profile.vocal {
        non_negative(id, "vocal.vibrato_rate", vocal.vibrato_rate)?;
        non_negative(id, "vocal.vibrato_depth", vocal.vibrato_depth)?;
        non_negative(id, "vocal.carrier_gain", vocal.carrier_gain)?;
        non_negative(id, "vocal.level", vocal.level)?;
        non_negative(id, "vocal.syllable_rate", vocal.syllable_rate)?;
        positive(id, "vocal.phrase_rate", vocal.phrase_rate)?;
        non_negative(id, "vocal.offbeat_level", vocal.offbeat_level)?;
        match &vocal.formants {
            FormantSet::Harmonic { partials } => {
                for partial in partials {
                    positive(id, "vocal.formants.partials.ratio", partial.ratio)?;
                    non_negative(id, "vocal.formants.partials.gain", partial.gain)?;
                }
            }
            FormantSet::Vowel { frequencies, gains } => {
                for &f in frequencies {
                    positive(id, "vocal.formants.frequencies", f)?;
                }
                for &g in gains {
                    non_negative(id, "vocal.formants.gains", g)?;
                }
            }
        }
    }

    let kick = &profile.drums.kick;
    hit_length(id, "kick", kick.length)?;
    positive(id, "drums.kick.decay", kick.decay)?;
    positive(id, "drums.kick.start_freq", kick.start_freq)?;
    non_negative(id, "drums.kick.sweep", kick.sweep)?;
    non_negative(id, "drums.kick.gain", kick.gain)?;
    validate_hit(id, "snare", &profile.drums.snare)?;
    validate_hit(id, "hat", &profile.drums.hat)?;

    let mastering = &profile.mastering;
    positive(id, "mastering.drive", mastering.drive)?;
    check(mastering.gain > 0.0 && mastering.gain < 1.0, id, || {
        format!("mastering.gain must be in (0, 1), got {}", mastering.gain)
    })?;
    non_negative(id, "mastering.fade_in", mastering.fade_in)?;
    non_negative(id, "mastering.fade_out", mastering.fade_out)?;

    Ok(())
}
