//! Encoded WAVE output.

use super::format::{WavFormat, HEADER_LEN};
use super::pcm::hash_pcm;
use super::writer::{samples_to_pcm16, write_wav_to_vec};

/// A finished 16-bit mono WAVE file. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAudio {
    /// Complete WAVE file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM payload only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
}

impl EncodedAudio {
    /// Encodes mono samples.
    ///
    /// An empty slice yields a valid header-only file.
    pub fn from_mono(samples: &[f64], sample_rate: u32) -> Self {
        let pcm = samples_to_pcm16(samples);
        let pcm_hash = hash_pcm(&pcm);
        let wav_data = write_wav_to_vec(&WavFormat::mono(sample_rate), &pcm);

        Self {
            wav_data,
            pcm_hash,
            sample_rate,
            num_samples: samples.len(),
        }
    }

    /// The PCM payload following the header.
    pub fn pcm_bytes(&self) -> &[u8] {
        &self.wav_data[HEADER_LEN..]
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }

    /// Consumes the result, returning the file bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.wav_data
    }
}
