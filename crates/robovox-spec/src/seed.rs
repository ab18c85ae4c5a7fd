//! Seed derivation.
//!
//! The engine only accepts a resolved `u32` seed. Callers derive it here:
//! batch tooling from a style id and track index, the prompt fallback from a
//! hash of its request text.

/// Multipliers for batch track seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedScheme {
    /// Multiplier applied to the style id length.
    pub style_factor: u32,
    /// Multiplier applied to the track index.
    pub index_factor: u32,
}

impl SeedScheme {
    /// Scheme used for instrumental track batches.
    pub const TRACKS: SeedScheme = SeedScheme {
        style_factor: 131,
        index_factor: 7919,
    };

    /// Scheme used for vocal asset batches.
    pub const VOCAL: SeedScheme = SeedScheme {
        style_factor: 971,
        index_factor: 6151,
    };
}

/// Derives the seed of the `index`-th track of a style:
/// `(len(style_id) * style_factor + index * index_factor) mod 2^32`.
pub fn track_seed(style_id: &str, index: u32, scheme: SeedScheme) -> u32 {
    let len = style_id.chars().count() as u32;
    len.wrapping_mul(scheme.style_factor)
        .wrapping_add(index.wrapping_mul(scheme.index_factor))
}

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// 32-bit FNV-1a over the UTF-16 code units of `text`.
pub fn text_seed(text: &str) -> u32 {
    text.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ unit as u32).wrapping_mul(FNV_PRIME)
    })
}
