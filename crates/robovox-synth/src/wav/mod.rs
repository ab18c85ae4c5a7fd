//! Deterministic 16-bit mono WAVE encoding.
//!
//! The writer emits a fixed 44-byte header with no timestamps or optional
//! chunks, so identical samples always give identical bytes. The BLAKE3 hash
//! of the PCM payload is carried alongside for cheap comparisons.

mod encoded;
mod format;
mod header;
mod pcm;
mod writer;


pub use encoded::EncodedAudio;
pub use format::{WavFormat, HEADER_LEN};
pub use header::WavHeader;
pub use pcm::{compute_pcm_hash, decode_pcm16, extract_pcm_data, hash_pcm};
pub use writer::{sample_to_i16, samples_to_pcm16, write_wav, write_wav_to_vec, PCM_SCALE};
