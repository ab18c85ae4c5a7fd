//! Property-based tests for the planner, encoder and engine.

use proptest::prelude::*;

use robovox_spec::{GenerationRequest, Preset, StyleTable};
use robovox_synth::rng::create_rng;
use robovox_synth::wav::{decode_pcm16, sample_to_i16};
use robovox_synth::{generate, plan_composition};

const STYLE_IDS: [&str; 5] = ["rock", "hiphop", "kpop", "lullaby", "jazz"];

fn style_id() -> impl Strategy<Value = &'static str> {
    prop::sample::select(STYLE_IDS.to_vec())
}

// ============================================================================
// 1. Melodic index validity
// ============================================================================

proptest! {
    /// Every planned degree indexes the scale, for any seed.
    #[test]
    fn melody_indices_stay_in_scale(seed in any::<u32>(), id in style_id(), duration in 0.0f64..60.0) {
        let styles = StyleTable::builtin(Preset::Tracks);
        let style = styles.get(id).unwrap();
        let plan = plan_composition(style, &mut create_rng(seed), duration, None);

        prop_assert!(!plan.melody.is_empty());
        prop_assert!(plan.melody.iter().all(|&d| d < style.scale_len()));
        prop_assert!(style.tempo.contains(plan.tempo_bpm));
    }

    /// Adversarial walks that only ever descend still wrap into range.
    #[test]
    fn descending_walks_wrap(seed in any::<u32>(), phrase in prop::option::of(1u32..32)) {
        let mut style = StyleTable::builtin(Preset::Vocal).get("hiphop").unwrap().clone();
        style.walk.thresholds = [0.0, 0.0, 0.0, 1.0];
        style.walk.phrase_length = phrase;
        let plan = plan_composition(&style, &mut create_rng(seed), 30.0, None);
        prop_assert!(plan.melody.iter().all(|&d| d < style.scale_len()));
    }
}

// ============================================================================
// 2. PCM conversion
// ============================================================================

proptest! {
    /// Any float, including NaN and infinities, maps into [-32767, 32767].
    #[test]
    fn pcm_conversion_is_bounded(bits in any::<u64>()) {
        let sample = f64::from_bits(bits);
        let value = sample_to_i16(sample);
        prop_assert!(value >= -32767);
        if sample.is_nan() {
            prop_assert_eq!(value, 0);
        }
    }
}

// ============================================================================
// 3. Engine output
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Short renders are deterministic, correctly sized and bounded.
    #[test]
    fn engine_output_is_well_formed(seed in any::<u32>(), id in style_id(), duration in 0.01f64..0.4) {
        let styles = StyleTable::builtin(Preset::Vocal);
        let request = GenerationRequest::new(id, seed, duration);
        let result = generate(&styles, &request).unwrap();

        let expected = (duration * 22050.0).round() as usize;
        prop_assert_eq!(result.num_samples, expected);
        prop_assert_eq!(result.audio.wav_data.len(), 44 + 2 * expected);

        let samples = decode_pcm16(result.audio.pcm_bytes());
        prop_assert!(samples.iter().all(|&s| s > i16::MIN));

        let again = generate(&styles, &request).unwrap();
        prop_assert_eq!(result.audio.pcm_hash, again.audio.pcm_hash);
    }
}
