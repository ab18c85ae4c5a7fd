//! WAVE header inspection.

use std::io::{Cursor, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use super::format::{WavFormat, HEADER_LEN};
use crate::error::{SynthError, SynthResult};

/// Decoded RIFF/WAVE header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// RIFF chunk size (file length minus 8).
    pub riff_size: u32,
    /// Format tag; 1 is linear PCM.
    pub audio_format: u16,
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bytes per second.
    pub byte_rate: u32,
    /// Bytes per sample frame.
    pub block_align: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Byte offset of the PCM payload.
    pub data_offset: usize,
    /// Size of the PCM payload in bytes.
    pub data_size: u32,
}

fn eof(_: std::io::Error) -> SynthError {
    SynthError::invalid_wav("truncated header")
}

fn expect_tag(cursor: &mut Cursor<&[u8]>, tag: &[u8; 4]) -> SynthResult<()> {
    let mut found = [0u8; 4];
    cursor.read_exact(&mut found).map_err(eof)?;
    if &found != tag {
        return Err(SynthError::invalid_wav(format!(
            "expected '{}', found '{}'",
            String::from_utf8_lossy(tag),
            String::from_utf8_lossy(&found)
        )));
    }
    Ok(())
}

impl WavHeader {
    /// Parses the header of a WAVE file.
    ///
    /// Accepts any chunks between `fmt ` and `data`. The data chunk must be
    /// complete.
    pub fn parse(bytes: &[u8]) -> SynthResult<Self> {
        let mut cursor = Cursor::new(bytes);

        expect_tag(&mut cursor, b"RIFF")?;
        let riff_size = cursor.read_u32::<LittleEndian>().map_err(eof)?;
        expect_tag(&mut cursor, b"WAVE")?;

        expect_tag(&mut cursor, b"fmt ")?;
        let fmt_size = cursor.read_u32::<LittleEndian>().map_err(eof)?;
        if fmt_size < 16 {
            return Err(SynthError::invalid_wav(format!("fmt chunk too small: {}", fmt_size)));
        }
        let audio_format = cursor.read_u16::<LittleEndian>().map_err(eof)?;
        let channels = cursor.read_u16::<LittleEndian>().map_err(eof)?;
        let sample_rate = cursor.read_u32::<LittleEndian>().map_err(eof)?;
        let byte_rate = cursor.read_u32::<LittleEndian>().map_err(eof)?;
        let block_align = cursor.read_u16::<LittleEndian>().map_err(eof)?;
        let bits_per_sample = cursor.read_u16::<LittleEndian>().map_err(eof)?;
        let fmt_extra = (fmt_size - 16) as i64 + (fmt_size % 2) as i64;
        cursor.seek(SeekFrom::Current(fmt_extra)).map_err(eof)?;

        loop {
            let mut id = [0u8; 4];
            cursor.read_exact(&mut id).map_err(|_| SynthError::invalid_wav("missing data chunk"))?;
            let size = cursor.read_u32::<LittleEndian>().map_err(eof)?;
            let offset = cursor.position() as usize;

            if &id == b"data" {
                if offset + size as usize > bytes.len() {
                    return Err(SynthError::invalid_wav(format!(
                        "data chunk claims {} bytes, {} available",
                        size,
                        bytes.len() - offset
                    )));
                }
                return Ok(Self {
                    riff_size,
                    audio_format,
                    channels,
                    sample_rate,
                    byte_rate,
                    block_align,
                    bits_per_sample,
                    data_offset: offset,
                    data_size: size,
                });
            }

            let skip = size as i64 + (size % 2) as i64;
            cursor.seek(SeekFrom::Current(skip)).map_err(eof)?;
        }
    }

    /// Number of sample frames in the payload.
    pub fn num_samples(&self) -> usize {
        if self.block_align == 0 {
            0
        } else {
            self.data_size as usize / self.block_align as usize
        }
    }

    /// Payload duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            self.num_samples() as f64 / self.sample_rate as f64
        }
    }

    /// Returns true if this is a canonical 44-byte 16-bit mono PCM header
    /// whose derived fields agree with each other.
    pub fn is_canonical(&self) -> bool {
        let format = WavFormat::mono(self.sample_rate);
        self.audio_format == 1
            && self.channels == format.channels
            && self.bits_per_sample == format.bits_per_sample
            && self.block_align == format.block_align()
            && self.byte_rate == format.byte_rate()
            && self.data_offset == HEADER_LEN
            && self.riff_size == 36 + self.data_size
    }
}
