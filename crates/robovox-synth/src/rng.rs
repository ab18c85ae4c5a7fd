//! Deterministic 32-bit linear congruential generator.
//!
//! All randomness in the engine flows through [`Lcg32`]. Every generation call
//! creates its own instance from the request seed, so concurrent calls never
//! share state and the same seed always reproduces the same song.
//!
//! Seed policy: every `u32` is a valid seed, including 0. The increment is
//! odd, so state 0 is not a fixed point and seed 0 yields its own sequence
//! (first state 1013904223). Callers that want to avoid 0 must remap it
//! themselves.

use rand::{Error, RngCore, SeedableRng};

const MULTIPLIER: u32 = 1_664_525;
const INCREMENT: u32 = 1_013_904_223;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// `state = (1664525 * state + 1013904223) mod 2^32`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg32 {
    state: u32,
}

impl Lcg32 {
    /// Creates a generator from a 32-bit seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advances the state and returns it.
    #[inline]
    pub fn next_state(&mut self) -> u32 {
        self.state = MULTIPLIER.wrapping_mul(self.state).wrapping_add(INCREMENT);
        self.state
    }

    /// Next value in `[0, 1)`: `state / 2^32`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.next_state() as f64 / TWO_POW_32
    }

    /// Next value in `[-1, 1)`, used for white noise.
    #[inline]
    pub fn next_bipolar(&mut self) -> f64 {
        self.next_f64() * 2.0 - 1.0
    }

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    #[inline]
    pub fn next_index(&mut self, len: usize) -> usize {
        ((self.next_f64() * len as f64).floor() as usize).min(len - 1)
    }
}

impl RngCore for Lcg32 {
    fn next_u32(&mut self) -> u32 {
        self.next_state()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_state() as u64;
        let lo = self.next_state() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_state().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Lcg32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// Creates the per-call generator for a seed.
pub fn create_rng(seed: u32) -> Lcg32 {
    Lcg32::new(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_rng_determinism() {
        let mut rng1 = create_rng(42);
        let mut rng2 = create_rng(42);

        let values1: Vec<f64> = (0..100).map(|_| rng1.next_f64()).collect();
        let values2: Vec<f64> = (0..100).map(|_| rng2.next_f64()).collect();

        assert_eq!(values1, values2);
    }

    #[test]
    fn test_different_seeds_produce_different_sequences() {
        let mut rng1 = create_rng(42);
        let mut rng2 = create_rng(43);

        let values1: Vec<u32> = (0..10).map(|_| rng1.next_state()).collect();
        let values2: Vec<u32> = (0..10).map(|_| rng2.next_state()).collect();

        assert_ne!(values1, values2);
    }

    #[test]
    fn test_known_sequence() {
        let mut rng = create_rng(1);
        assert_eq!(rng.next_state(), 1_015_568_748);
        assert_eq!(rng.next_state(), 1_586_005_467);
    }

    #[test]
    fn test_zero_seed_is_not_stuck() {
        let mut rng = create_rng(0);
        assert_eq!(rng.next_state(), INCREMENT);
        let a = rng.next_state();
        let b = rng.next_state();
        assert_ne!(a, b);
        assert_ne!(a, 0);
    }

    #[test]
    fn test_unit_range() {
        let mut rng = create_rng(0xdead_beef);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_bipolar_range() {
        let mut rng = create_rng(7);
        for _ in 0..10_000 {
            let v = rng.next_bipolar();
            assert!((-1.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_next_index_in_bounds() {
        let mut rng = create_rng(99);
        for len in 1..12 {
            for _ in 0..200 {
                assert!(rng.next_index(len) < len);
            }
        }
    }

    #[test]
    fn test_rand_traits_share_stream() {
        let mut a = create_rng(5);
        let mut b = Lcg32::from_seed(5u32.to_le_bytes());
        assert_eq!(a.next_u32(), b.next_state());

        // Rng extension methods work on top of RngCore.
        let roll: u8 = a.gen_range(1..=6);
        assert!((1..=6).contains(&roll));
    }

    #[test]
    fn test_fill_bytes_partial_chunk() {
        let mut a = create_rng(11);
        let mut b = create_rng(11);
        let mut buf = [0u8; 6];
        a.fill_bytes(&mut buf);
        let first = b.next_state().to_le_bytes();
        let second = b.next_state().to_le_bytes();
        assert_eq!(&buf[..4], &first);
        assert_eq!(&buf[4..], &second[..2]);
    }
}
