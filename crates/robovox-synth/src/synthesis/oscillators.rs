//! Naive waveform functions of absolute time.
//!
//! Every oscillator here is evaluated as `f(t * freq)`, a phase in cycles, so
//! a sample's value depends only on its index and never on prior samples.

use std::f64::consts::PI;

/// 2π.
pub const TWO_PI: f64 = 2.0 * PI;

/// Fractional part for non-negative phases.
#[inline]
pub fn frac(x: f64) -> f64 {
    x - x.floor()
}

/// Sine at `freq` Hz, time `t` seconds.
#[inline]
pub fn sine(freq: f64, t: f64) -> f64 {
    (TWO_PI * freq * t).sin()
}

/// Sawtooth in `[-1, 1)`: `frac(t * freq) * 2 - 1`.
#[inline]
pub fn saw(freq: f64, t: f64) -> f64 {
    frac(t * freq) * 2.0 - 1.0
}

/// Triangle in `[-1, 1]`: `2 * |2 * frac(t * freq / 2) - 1| - 1`.
///
/// The half-rate phase makes this an octave below a saw at the same `freq`.
#[inline]
pub fn triangle(freq: f64, t: f64) -> f64 {
    2.0 * (2.0 * frac(t * freq / 2.0) - 1.0).abs() - 1.0
}

/// Half-wave rectified sine pulse over a unit phase.
#[inline]
pub fn rectified_sine(phase: f64) -> f64 {
    (PI * frac(phase)).sin().max(0.0)
}
