//! Continuous voices: bass, lead and pseudo-vocal.

use robovox_spec::{midi_to_frequency, FormantSet, StyleProfile, VocalTimbre};

use super::oscillators::{rectified_sine, saw, sine, triangle};
use super::{Position, Voice};
use crate::plan::CompositionPlan;

/// Sine an octave below the current bar's root, with an optional slow swell.
#[derive(Debug)]
pub struct BassVoice<'a> {
    style: &'a StyleProfile,
    plan: &'a CompositionPlan,
    amplitude: f64,
}

impl<'a> BassVoice<'a> {
    /// Creates the bass voice for a style and plan.
    pub fn new(style: &'a StyleProfile, plan: &'a CompositionPlan) -> Self {
        Self {
            style,
            plan,
            amplitude: style.voices.bass * style.drive,
        }
    }

    /// Swell factor: `1 - depth + sin(2 pi rate t) * depth`.
    pub fn swell(&self, t: f64) -> f64 {
        let voices = &self.style.voices;
        1.0 - voices.bass_lfo_depth + sine(voices.bass_lfo_rate, t) * voices.bass_lfo_depth
    }
}

impl Voice for BassVoice<'_> {
    fn sample(&self, pos: &Position) -> f64 {
        let root = self.plan.harmony.root_for_bar(pos.bar) as f64;
        sine(midi_to_frequency(root - 12.0), pos.t) * self.amplitude * self.swell(pos.t)
    }
}

/// Saw/triangle blend on the melody, accented on even steps.
#[derive(Debug)]
pub struct LeadVoice<'a> {
    style: &'a StyleProfile,
    plan: &'a CompositionPlan,
}

impl<'a> LeadVoice<'a> {
    /// Creates the lead voice for a style and plan.
    pub fn new(style: &'a StyleProfile, plan: &'a CompositionPlan) -> Self {
        Self { style, plan }
    }

    /// MIDI note of the lead at a position.
    pub fn note(&self, pos: &Position) -> f64 {
        let step = pos.step % self.plan.melody.len();
        let harmony = &self.plan.harmony;
        let root = harmony.root_for_bar(pos.bar) as i32;
        let offset = harmony.offset(self.plan.melody[step]) as i32;
        (root + offset + self.style.lead_transpose) as f64
    }
}

impl Voice for LeadVoice<'_> {
    fn sample(&self, pos: &Position) -> f64 {
        let voices = &self.style.voices;
        let freq = midi_to_frequency(self.note(pos));
        let blend = voices.saw_blend * saw(freq, pos.t) + (1.0 - voices.saw_blend) * triangle(freq, pos.t);

        let step = pos.step % self.plan.melody.len();
        let gate = if step % 2 == 0 {
            voices.lead_accent
        } else {
            voices.lead_weak
        };
        blend * gate * self.style.drive
    }
}

/// Formant-coloured carrier with vibrato, pulsed by a syllable envelope.
#[derive(Debug)]
pub struct VocalVoice<'a> {
    timbre: &'a VocalTimbre,
    plan: &'a CompositionPlan,
}

impl<'a> VocalVoice<'a> {
    /// Creates the vocal voice.
    pub fn new(timbre: &'a VocalTimbre, plan: &'a CompositionPlan) -> Self {
        Self { timbre, plan }
    }

    /// MIDI note sung at a position, before vibrato.
    pub fn note(&self, pos: &Position) -> f64 {
        let phrase_step = (pos.beat * self.timbre.phrase_rate).floor() as usize;
        let degree = self.plan.degree_at(phrase_step) + self.timbre.degree_shift;
        let harmony = &self.plan.harmony;
        let root = harmony.root_for_bar(pos.bar) as i32;
        (root + self.timbre.interval + harmony.offset(degree) as i32) as f64
    }

    /// Syllable and beat-pulse envelope.
    pub fn envelope(&self, pos: &Position) -> f64 {
        let syllable = if self.timbre.syllable_rate > 0.0 {
            rectified_sine(pos.beat * self.timbre.syllable_rate)
        } else {
            1.0
        };
        let pulse = if (pos.beat.floor() as u64) % 2 == 0 {
            1.0
        } else {
            self.timbre.offbeat_level
        };
        syllable * pulse
    }
}

impl Voice for VocalVoice<'_> {
    fn sample(&self, pos: &Position) -> f64 {
        let timbre = self.timbre;
        let base = midi_to_frequency(self.note(pos));
        let vibrato = sine(timbre.vibrato_rate, pos.t) * timbre.vibrato_depth;
        let sung = base * (1.0 + vibrato);
        let carrier = sine(sung, pos.t);
        let partial_base = if timbre.partials_follow_vibrato { sung } else { base };

        let formants: f64 = match &timbre.formants {
            FormantSet::Harmonic { partials } => partials
                .iter()
                .map(|p| sine(partial_base * p.ratio, pos.t) * p.gain)
                .sum(),
            FormantSet::Vowel { frequencies, gains } => frequencies
                .iter()
                .zip(gains)
                .map(|(&f, &g)| sine(f, pos.t) * carrier * g)
                .sum(),
        };

        (timbre.carrier_gain * carrier + formants) * timbre.level * self.envelope(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Harmony;
    use robovox_spec::{Preset, StyleTable};

    const SR: f64 = 22050.0;

    fn plan(style: &StyleProfile, melody: Vec<usize>) -> CompositionPlan {
        CompositionPlan {
            tempo_bpm: 120,
            harmony: Harmony::of(style),
            beat_seconds: 0.5,
            step_count: melody.len(),
            melody,
        }
    }

    fn table(preset: Preset) -> StyleTable {
        StyleTable::builtin(preset)
    }

    #[test]
    fn test_bass_matches_formula() {
        let table = table(Preset::Tracks);
        let rock = table.get("rock").unwrap();
        let plan = plan(rock, vec![0]);
        let bass = BassVoice::new(rock, &plan);
        let pos = Position::at(1234, SR, 0.5);
        let expected = (2.0 * std::f64::consts::PI * midi_to_frequency(28.0) * pos.t).sin() * 0.17 * 0.9;
        assert!((bass.sample(&pos) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_bass_follows_bar_roots() {
        let table = table(Preset::Tracks);
        let rock = table.get("rock").unwrap();
        let plan = plan(rock, vec![0]);
        // Bar 1 of rock is root 43.
        let pos = Position::at((2.0 * SR) as usize + 10, SR, 0.5);
        assert_eq!(pos.bar, 1);
        let bass = BassVoice::new(rock, &plan);
        let expected = sine(midi_to_frequency(31.0), pos.t) * 0.17 * 0.9;
        assert!((bass.sample(&pos) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_bass_follows_varied_harmony() {
        let table = table(Preset::Tracks);
        let rock = table.get("rock").unwrap();
        let mut plan = plan(rock, vec![0]);
        plan.harmony.roots = vec![47, 50];
        let bass = BassVoice::new(rock, &plan);
        let pos = Position::at((2.0 * SR) as usize + 10, SR, 0.5);
        let expected = sine(midi_to_frequency(38.0), pos.t) * 0.17 * 0.9;
        assert!((bass.sample(&pos) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_bass_swell() {
        let tracks = table(Preset::Tracks);
        let rock = tracks.get("rock").unwrap();
        let steady_plan = plan(rock, vec![0]);
        let steady = BassVoice::new(rock, &steady_plan);
        for t in [0.0, 0.7, 3.3] {
            assert_eq!(steady.swell(t), 1.0);
        }

        let fallback = table(Preset::Fallback);
        let jazz = fallback.get("jazz").unwrap();
        let swell_plan = plan(jazz, vec![0]);
        let bass = BassVoice::new(jazz, &swell_plan);
        let pos = Position::at(30000, SR, 0.5);
        let lfo = 0.95 + (2.0 * std::f64::consts::PI * 0.22 * pos.t).sin() * 0.05;
        assert!((bass.swell(pos.t) - lfo).abs() < 1e-12);
        let expected = sine(midi_to_frequency(48.0), pos.t) * 0.17 * lfo;
        assert!((bass.sample(&pos) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_lead_note_uses_transpose() {
        let table = table(Preset::Tracks);
        let pos = Position::at(0, SR, 0.5);

        let rock = table.get("rock").unwrap();
        let rock_plan = plan(rock, vec![2, 0]);
        assert_eq!(LeadVoice::new(rock, &rock_plan).note(&pos), (40 + 3) as f64);

        let kpop = table.get("kpop").unwrap();
        let kpop_plan = plan(kpop, vec![2, 0]);
        assert_eq!(LeadVoice::new(kpop, &kpop_plan).note(&pos), (48 + 4 + 12) as f64);
    }

    #[test]
    fn test_lead_gate_alternates() {
        let table = table(Preset::Tracks);
        let jazz = table.get("jazz").unwrap();
        let plan = plan(jazz, vec![0, 0, 0, 0]);
        let lead = LeadVoice::new(jazz, &plan);

        // Step length is 0.25 s.
        let even = Position::at(0, SR, plan.beat_seconds);
        assert_eq!(even.step, 0);
        let odd = Position::at((0.25 * SR) as usize, SR, plan.beat_seconds);
        assert_eq!(odd.step, 1);

        // At t = 0 the blend is 0.65 * -1 + 0.35 * 1.
        let expected = (0.65 * -1.0 + 0.35 * 1.0) * 0.12 * 0.65;
        assert!((lead.sample(&even) - expected).abs() < 1e-12);
        let ratio = lead.sample(&odd).abs() / 0.07;
        assert!(ratio <= 0.65 + 1e-9);
    }

    #[test]
    fn test_hum_has_no_syllable_gating() {
        let table = table(Preset::Tracks);
        let rock = table.get("rock").unwrap();
        let plan = plan(rock, vec![0; 8]);
        let vocal = VocalVoice::new(rock.vocal.as_ref().unwrap(), &plan);
        for index in [0usize, 5000, 11025, 30000] {
            let pos = Position::at(index, SR, plan.beat_seconds);
            assert_eq!(vocal.envelope(&pos), 1.0);
        }
    }

    #[test]
    fn test_vowel_envelope_pulses() {
        let table = table(Preset::Vocal);
        let rock = table.get("rock").unwrap();
        let plan = plan(rock, vec![0; 8]);
        let vocal = VocalVoice::new(rock.vocal.as_ref().unwrap(), &plan);

        let start = Position::at(0, SR, plan.beat_seconds);
        assert!(vocal.envelope(&start).abs() < 1e-12);

        // Beat 1 is an off-beat: the pulse drops to 0.55.
        let offbeat = Position::at((0.5 * SR) as usize + 1, SR, plan.beat_seconds);
        let syllable = rectified_sine(offbeat.beat * 0.75);
        assert!((vocal.envelope(&offbeat) - syllable * 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_vocal_note_uses_interval_and_phrase_rate() {
        let table = table(Preset::Vocal);
        let kpop = table.get("kpop").unwrap();
        let plan = plan(kpop, vec![1, 2, 3, 4]);
        let vocal = VocalVoice::new(kpop.vocal.as_ref().unwrap(), &plan);

        // beat 1.0 * 1.25 -> phrase step 1 -> degree 2 -> offset 4.
        let pos = Position::at((0.5 * SR) as usize, SR, plan.beat_seconds);
        assert_eq!(vocal.note(&pos), (48 + 7 + 4) as f64);
    }

    #[test]
    fn test_sung_line_sits_a_degree_up() {
        let table = table(Preset::Fallback);
        let rock = table.get("rock").unwrap();
        let plan = plan(rock, vec![0, 6, 3]);
        let vocal = VocalVoice::new(rock.vocal.as_ref().unwrap(), &plan);

        // beat 0 -> degree 0 + 1 -> offset 2.
        let start = Position::at(0, SR, plan.beat_seconds);
        assert_eq!(vocal.note(&start), (52 + 12 + 2) as f64);

        // beat 1.0 * 1.5 -> phrase step 1 -> degree 6 + 1 wraps to 0.
        let pos = Position::at((0.5 * SR) as usize, SR, plan.beat_seconds);
        assert_eq!(vocal.note(&pos), (52 + 12) as f64);
    }

    #[test]
    fn test_partials_follow_vibrato() {
        let table = table(Preset::Fallback);
        let lullaby = table.get("lullaby").unwrap();
        let plan = plan(lullaby, vec![2; 4]);
        let timbre = lullaby.vocal.as_ref().unwrap();
        let vocal = VocalVoice::new(timbre, &plan);

        let pos = Position::at(3001, SR, plan.beat_seconds);
        let base = midi_to_frequency(vocal.note(&pos));
        let sung = base * (1.0 + sine(5.3, pos.t) * 0.012);
        let raw = sine(sung, pos.t) + sine(sung * 2.2, pos.t) * 0.35 + sine(sung * 3.1, pos.t) * 0.2;
        let expected = raw * 0.05 * vocal.envelope(&pos);
        assert!((vocal.sample(&pos) - expected).abs() < 1e-12);
        assert!((vocal.envelope(&pos) - rectified_sine(pos.beat)).abs() < 1e-12);
    }

    #[test]
    fn test_vocal_output_is_bounded_by_gains() {
        let table = table(Preset::Vocal);
        let hiphop = table.get("hiphop").unwrap();
        let plan = plan(hiphop, vec![0, 3, 1, 4, 2, 5]);
        let vocal = VocalVoice::new(hiphop.vocal.as_ref().unwrap(), &plan);
        let bound = (0.45 + 0.28 + 0.18 + 0.12) * 0.22;
        for index in (0..44100).step_by(7) {
            let pos = Position::at(index, SR, plan.beat_seconds);
            assert!(vocal.sample(&pos).abs() <= bound + 1e-12);
        }
    }
}
