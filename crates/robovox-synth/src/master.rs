//! Mastering: tanh soft clip, output gain and linear fades.

use robovox_spec::MasteringParams;

use crate::buffer::SampleBuffer;

/// Soft clips a sample with `tanh(sample * drive)`.
///
/// NaN passes through; the encoder maps it to silence.
#[inline]
pub fn soft_clip(sample: f64, drive: f64) -> f64 {
    (sample * drive).tanh()
}

/// Fade-in factor for sample `index`: ramps 0 to 1 over `window` samples.
#[inline]
pub fn fade_in_gain(index: usize, window: f64) -> f64 {
    if window <= 0.0 {
        1.0
    } else {
        (index as f64 / window).min(1.0)
    }
}

/// Fade-out factor for sample `index` of `total`: ramps to 0 over the last
/// `window` samples.
#[inline]
pub fn fade_out_gain(index: usize, total: usize, window: f64) -> f64 {
    let remaining = total as f64 - index as f64;
    if window > 0.0 && (index as f64) > total as f64 - window {
        remaining / window
    } else {
        1.0
    }
}

/// Masters `buffer` in place: clip, then scale, then fade.
///
/// With `params.gain < 1` every finite output lies strictly inside (-1, 1).
pub fn master(buffer: &mut SampleBuffer, params: &MasteringParams, sample_rate: u32) {
    let sr = sample_rate as f64;
    let fade_in = sr * params.fade_in;
    let fade_out = sr * params.fade_out;
    let total = buffer.len();

    for (index, sample) in buffer.as_mut_slice().iter_mut().enumerate() {
        let clipped = soft_clip(*sample, params.drive) * params.gain;
        *sample = clipped * fade_in_gain(index, fade_in) * fade_out_gain(index, total, fade_out);
    }
}
