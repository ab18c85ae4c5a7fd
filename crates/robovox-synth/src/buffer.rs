//! Mix buffer shared by all synthesis layers.

/// A fixed-length mono float buffer.
///
/// Layers only ever accumulate into it. Writes outside the buffer are dropped,
/// so percussive tails that run past the end cannot overflow.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f64>,
}

impl SampleBuffer {
    /// Creates a silent buffer of `len` samples.
    pub fn zeros(len: usize) -> Self {
        Self {
            samples: vec![0.0; len],
        }
    }

    /// Adds `value` at `index`. Returns false if the index was out of range.
    #[inline]
    pub fn add(&mut self, index: usize, value: f64) -> bool {
        match self.samples.get_mut(index) {
            Some(sample) => {
                *sample += value;
                true
            }
            None => false,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true for a zero-length buffer.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Read-only view of the samples.
    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// Mutable view of the samples, used by in-place stages.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.samples
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0_f64, |peak, s| peak.max(s.abs()))
    }

    /// Consumes the buffer.
    pub fn into_inner(self) -> Vec<f64> {
        self.samples
    }
}

impl From<Vec<f64>> for SampleBuffer {
    fn from(samples: Vec<f64>) -> Self {
        Self { samples }
    }
}
