//! PCM data extraction and hashing.

/// Finds the payload of the `data` chunk in a WAVE file.
///
/// Walks the chunk list, so files with extra chunks before `data` work too.
/// Returns `None` if the RIFF/WAVE magic is missing or no complete data chunk
/// exists.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < 12 || &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }

    let mut pos = 12;
    while pos + 8 <= wav_data.len() {
        let chunk_id = &wav_data[pos..pos + 4];
        let chunk_size = u32::from_le_bytes([
            wav_data[pos + 4],
            wav_data[pos + 5],
            wav_data[pos + 6],
            wav_data[pos + 7],
        ]) as usize;

        let data_start = pos + 8;
        let data_end = data_start.checked_add(chunk_size)?;
        if chunk_id == b"data" {
            return wav_data.get(data_start..data_end);
        }

        // Chunks are word aligned.
        pos = data_end + (chunk_size % 2);
    }

    None
}

/// BLAKE3 hex digest of raw PCM bytes.
pub fn hash_pcm(pcm: &[u8]) -> String {
    blake3::hash(pcm).to_hex().to_string()
}

/// BLAKE3 hash of a WAVE file's PCM payload, ignoring the header.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(hash_pcm)
}

/// Decodes little-endian 16-bit PCM bytes. A trailing odd byte is ignored.
pub fn decode_pcm16(pcm: &[u8]) -> Vec<i16> {
    pcm.chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}
