//! Percussion pass: kick, snare and hat triggered on the beat grid.
//!
//! Runs after the continuous voices and draws its noise from the same
//! generator the planner used, so the whole song is a function of one seed.

use robovox_spec::{DrumKit, Hit, Kick};

use super::oscillators::TWO_PI;
use crate::buffer::SampleBuffer;
use crate::plan::CompositionPlan;
use crate::rng::Lcg32;

/// Hit length in whole samples.
#[inline]
fn hit_len(length_seconds: f64, sample_rate: f64) -> usize {
    (sample_rate * length_seconds).floor() as usize
}

/// Exponentially decaying sine with a linear downward pitch sweep. The tail
/// stops at the end of the buffer.
fn add_kick(buffer: &mut SampleBuffer, kick: &Kick, start: usize, sample_rate: f64) {
    for n in 0..hit_len(kick.length, sample_rate) {
        let index = start + n;
        if index >= buffer.len() {
            break;
        }
        let tt = n as f64 / sample_rate;
        let freq = kick.start_freq - tt * kick.sweep;
        let env = (-tt * kick.decay).exp();
        buffer.add(index, (TWO_PI * freq * tt).sin() * env * kick.gain);
    }
}

/// Exponentially decaying white noise. Noise is only drawn for samples that
/// land inside the buffer.
fn add_noise_hit(buffer: &mut SampleBuffer, hit: &Hit, start: usize, sample_rate: f64, rng: &mut Lcg32) {
    for n in 0..hit_len(hit.length, sample_rate) {
        let index = start + n;
        if index >= buffer.len() {
            break;
        }
        let tt = n as f64 / sample_rate;
        let env = (-tt * hit.decay).exp();
        buffer.add(index, rng.next_bipolar() * env * hit.gain);
    }
}

/// Returns true for the beats of a bar that carry the snare (1 and 3).
#[inline]
pub fn is_snare_beat(beat_index: usize) -> bool {
    matches!(beat_index % 4, 1 | 3)
}

/// Renders the drum kit into `buffer`.
///
/// One pass per whole beat in `duration_seconds`. Tails past the end of the
/// buffer are dropped.
pub fn render_drums(
    buffer: &mut SampleBuffer,
    kit: &DrumKit,
    plan: &CompositionPlan,
    sample_rate: u32,
    duration_seconds: f64,
    rng: &mut Lcg32,
) {
    let sr = sample_rate as f64;
    let beat = plan.beat_seconds;

    for beat_index in 0..plan.beat_count(duration_seconds) {
        let beat_start = (beat_index as f64 * beat * sr).floor() as usize;

        add_kick(buffer, &kit.kick, beat_start, sr);

        if is_snare_beat(beat_index) {
            add_noise_hit(buffer, &kit.snare, beat_start, sr, rng);
        }

        for half in 0..2 {
            let hat_start = beat_start + (half as f64 * beat * 0.5 * sr).floor() as usize;
            add_noise_hit(buffer, &kit.hat, hat_start, sr, rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Harmony;
    use crate::rng::create_rng;

    fn plan(bpm: u32) -> CompositionPlan {
        CompositionPlan {
            tempo_bpm: bpm,
            harmony: Harmony {
                roots: vec![40],
                scale: vec![0, 12],
            },
            beat_seconds: 60.0 / bpm as f64,
            step_count: 1,
            melody: vec![0],
        }
    }

    fn quiet_kit() -> DrumKit {
        let mut kit = DrumKit::default();
        kit.snare.gain = 0.0;
        kit.hat.gain = 0.0;
        kit
    }

    #[test]
    fn test_snare_beats() {
        let snares: Vec<usize> = (0..8).filter(|&b| is_snare_beat(b)).collect();
        assert_eq!(snares, vec![1, 3, 5, 7]);
    }

    #[test]
    fn test_kick_starts_at_zero_and_decays() {
        let mut buffer = SampleBuffer::zeros(22050);
        let mut rng = create_rng(1);
        render_drums(&mut buffer, &quiet_kit(), &plan(120), 22050, 1.0, &mut rng);

        let samples = buffer.as_slice();
        assert_eq!(samples[0], 0.0);
        let early = samples[10..200].iter().fold(0.0_f64, |m, s| m.max(s.abs()));
        let late = samples[2500..3300].iter().fold(0.0_f64, |m, s| m.max(s.abs()));
        assert!(early > late);
        // Kick length is 0.15 s = 3307 samples; the next beat starts at 11025.
        assert!(samples[3400..11025].iter().all(|&s| s == 0.0));
        assert!(samples[11030].abs() > 0.0);
    }

    #[test]
    fn test_tails_are_clipped_at_buffer_end() {
        // 1.0 s at 60 bpm -> one beat; buffer is shorter than the kick.
        let mut buffer = SampleBuffer::zeros(100);
        let mut rng = create_rng(1);
        render_drums(&mut buffer, &DrumKit::default(), &plan(60), 22050, 1.0, &mut rng);
        assert_eq!(buffer.len(), 100);
    }

    #[test]
    fn test_oversized_kick_stops_at_buffer_end() {
        // hit_len saturates to usize::MAX; the loop must still end.
        let mut kit = quiet_kit();
        kit.kick.length = 1e30;
        let mut buffer = SampleBuffer::zeros(500);
        let mut rng = create_rng(1);
        render_drums(&mut buffer, &kit, &plan(120), 22050, 0.5, &mut rng);
        assert_eq!(buffer.len(), 500);
        assert!(buffer.as_slice()[1..].iter().any(|&s| s != 0.0));
    }

    #[test]
    fn test_noise_draws_skip_out_of_range_samples() {
        // Beat 0 has no snare, only two hats; the buffer holds 10 samples.
        let mut buffer = SampleBuffer::zeros(10);
        let mut rng = create_rng(77);
        render_drums(&mut buffer, &DrumKit::default(), &plan(60), 22050, 1.0, &mut rng);

        // First hat draws 10 values; the mid-beat hat starts past the end.
        let mut expected = create_rng(77);
        for _ in 0..10 {
            expected.next_f64();
        }
        assert_eq!(rng, expected);
    }

    #[test]
    fn test_drums_are_deterministic() {
        let kit = DrumKit::default();
        let mut a = SampleBuffer::zeros(44100);
        let mut b = SampleBuffer::zeros(44100);
        render_drums(&mut a, &kit, &plan(100), 22050, 2.0, &mut create_rng(9));
        render_drums(&mut b, &kit, &plan(100), 22050, 2.0, &mut create_rng(9));
        assert_eq!(a, b);
    }
}
