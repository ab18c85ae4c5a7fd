//! Core WAVE writing and PCM conversion.

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use super::format::{WavFormat, HEADER_LEN};

/// Full scale of a 16-bit sample.
pub const PCM_SCALE: f64 = 32767.0;

/// Writes a complete WAVE file: 44-byte header followed by `pcm_data`.
///
/// # Arguments
/// * `writer` - Output writer
/// * `format` - WAVE format parameters
/// * `pcm_data` - Raw little-endian PCM bytes
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_size = u32::try_from(pcm_data.len())
        .ok()
        .filter(|size| *size <= u32::MAX - 36)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "PCM payload exceeds 4 GiB"))?;

    writer.write_all(b"RIFF")?;
    writer.write_u32::<LittleEndian>(36 + data_size)?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_u32::<LittleEndian>(16)?;
    writer.write_u16::<LittleEndian>(1)?; // PCM
    writer.write_u16::<LittleEndian>(format.channels)?;
    writer.write_u32::<LittleEndian>(format.sample_rate)?;
    writer.write_u32::<LittleEndian>(format.byte_rate())?;
    writer.write_u16::<LittleEndian>(format.block_align())?;
    writer.write_u16::<LittleEndian>(format.bits_per_sample)?;

    writer.write_all(b"data")?;
    writer.write_u32::<LittleEndian>(data_size)?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// Writes a WAVE file into a new byte vector.
pub fn write_wav_to_vec(format: &WavFormat, pcm_data: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(HEADER_LEN + pcm_data.len());
    write_wav(&mut buffer, format, pcm_data).expect("writing to Vec should not fail");
    buffer
}

/// Converts one float sample to a 16-bit value.
///
/// Clamps to [-1, 1] and rounds `sample * 32767`. NaN becomes 0: a NaN in the
/// mix is a bug upstream, and silence is the least harmful thing to emit.
#[inline]
pub fn sample_to_i16(sample: f64) -> i16 {
    if sample.is_nan() {
        return 0;
    }
    (sample.clamp(-1.0, 1.0) * PCM_SCALE).round() as i16
}

/// Converts f64 samples to little-endian 16-bit PCM bytes.
pub fn samples_to_pcm16(samples: &[f64]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        pcm.extend_from_slice(&sample_to_i16(sample).to_le_bytes());
    }
    pcm
}
