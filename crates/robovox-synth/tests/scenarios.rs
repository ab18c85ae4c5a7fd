//! End-to-end generation scenarios.
//!
//! ```bash
//! cargo test -p robovox-synth --test scenarios
//! ```

use robovox_spec::{GenerationRequest, Preset, StyleTable};
use robovox_synth::wav::decode_pcm16;
use robovox_synth::{generate, EncodedAudio, SynthError, WavHeader};

fn tracks() -> StyleTable {
    StyleTable::builtin(Preset::Tracks)
}

fn header_u32(wav: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([wav[at], wav[at + 1], wav[at + 2], wav[at + 3]])
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn lullaby_eight_seconds() {
    let request = GenerationRequest::new("lullaby", 12345, 8.0);
    let result = generate(&tracks(), &request).expect("generation should succeed");

    assert!((66..=88).contains(&result.tempo_bpm), "bpm {}", result.tempo_bpm);
    assert_eq!(result.num_samples, 176_400);

    let wav = &result.audio.wav_data;
    assert_eq!(wav.len(), 44 + 352_800);
    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(header_u32(wav, 4), 352_836);
    assert_eq!(&wav[8..16], b"WAVEfmt ");
    assert_eq!(header_u32(wav, 16), 16);
    assert_eq!(header_u32(wav, 24), 22050);
    assert_eq!(header_u32(wav, 28), 44100);
    assert_eq!(&wav[36..40], b"data");
    assert_eq!(header_u32(wav, 40), 352_800);
}

#[test]
fn rock_seed_zero_is_audible() {
    let request = GenerationRequest::new("rock", 0, 8.0);
    let result = generate(&tracks(), &request).expect("generation should succeed");

    assert!((120..=150).contains(&result.tempo_bpm));
    let samples = decode_pcm16(result.audio.pcm_bytes());
    let threshold = (0.01 * 32767.0) as i16;
    assert!(samples.iter().any(|s| s.abs() > threshold));

    let again = generate(&tracks(), &request).unwrap();
    assert_eq!(result.tempo_bpm, again.tempo_bpm);
    assert_eq!(result.audio.pcm_hash, again.audio.pcm_hash);
}

#[test]
fn zero_duration_is_rejected() {
    let request = GenerationRequest::new("rock", 1, 0.0);
    let err = generate(&tracks(), &request).unwrap_err();
    assert!(matches!(err, SynthError::InvalidParameters { .. }));
}

// ============================================================================
// Output properties
// ============================================================================

#[test]
fn header_fields_follow_formulas() {
    let request = GenerationRequest::new("jazz", 77, 1.25).with_sample_rate(44100);
    let result = generate(&tracks(), &request).unwrap();
    let header = WavHeader::parse(&result.audio.wav_data).unwrap();

    assert_eq!(header.data_size as usize, 2 * result.num_samples);
    assert_eq!(header.riff_size, 36 + header.data_size);
    assert_eq!(header.byte_rate, 44100 * 2);
    assert_eq!(header.block_align, 2);
    assert!(header.is_canonical());
}

#[test]
fn duration_accuracy() {
    let styles = tracks();
    for (duration, rate) in [(1.0, 22050), (0.3333, 22050), (2.5, 8000), (0.75, 48000)] {
        let request = GenerationRequest::new("kpop", 5, duration).with_sample_rate(rate);
        let result = generate(&styles, &request).unwrap();
        let expected = (duration * rate as f64).round() as usize;
        assert_eq!(result.num_samples, expected);
    }
}

#[test]
fn decoded_samples_never_hit_i16_min() {
    let styles = StyleTable::builtin(Preset::Vocal);
    for id in ["rock", "hiphop", "kpop", "lullaby", "jazz"] {
        let request = GenerationRequest::new(id, 4242, 3.0);
        let result = generate(&styles, &request).unwrap();
        let samples = decode_pcm16(result.audio.pcm_bytes());
        assert!(samples.iter().all(|&s| s > i16::MIN), "style {}", id);
    }
}

#[test]
fn hound_decodes_generated_song() {
    let request = GenerationRequest::new("hiphop", 9, 0.5);
    let result = generate(&tracks(), &request).unwrap();
    let expected = decode_pcm16(result.audio.pcm_bytes());

    let reader = hound::WavReader::new(std::io::Cursor::new(result.audio.wav_data)).unwrap();
    assert_eq!(reader.spec().sample_rate, 22050);
    assert_eq!(reader.duration() as usize, result.num_samples);
    let decoded: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(decoded, expected);
}

#[test]
fn tempo_override_is_used() {
    let request = GenerationRequest::new("rock", 3, 2.0).with_tempo(96);
    let result = generate(&tracks(), &request).unwrap();
    assert_eq!(result.tempo_bpm, 96);
    assert_eq!(result.step_count, (2.0f64 / (60.0 / 96.0 / 2.0)).floor() as usize);
}

#[test]
fn key_is_first_bar_root() {
    let result = generate(&tracks(), &GenerationRequest::new("rock", 1, 0.2)).unwrap();
    assert_eq!(result.key.root, 40);
    assert_eq!(result.key.name, "E2");
}

#[test]
fn very_short_request_still_encodes() {
    // Two samples, no full step, no full beat.
    let request = GenerationRequest::new("lullaby", 1, 0.0001);
    let result = generate(&tracks(), &request).unwrap();
    assert_eq!(result.num_samples, 2);
    assert_eq!(result.step_count, 0);
    assert_eq!(result.audio.wav_data.len(), 48);
    // Fade-in starts at zero.
    assert_eq!(&result.audio.pcm_bytes()[0..2], &[0, 0]);
}

#[test]
fn encoded_audio_is_self_consistent() {
    let result = generate(&tracks(), &GenerationRequest::new("jazz", 10, 0.4)).unwrap();
    let EncodedAudio {
        wav_data, pcm_hash, ..
    } = result.audio;
    assert_eq!(robovox_synth::wav::compute_pcm_hash(&wav_data), Some(pcm_hash));
}
