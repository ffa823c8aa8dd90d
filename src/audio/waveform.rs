//! Waveform container shared across the pipeline.

use crate::error::{Error, Result};

/// A mono audio signal at a fixed sample rate.
///
/// The sample rate is constant for the lifetime of the waveform; duration
/// is always derived as `len / sample_rate`.
#[derive(Debug, Clone)]
pub struct Waveform {
    /// Samples in range [-1.0, 1.0].
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl Waveform {
    /// Create a waveform from raw samples.
    #[must_use]
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the waveform has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Check the waveform can be analyzed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAudio`] if the waveform is empty or the
    /// sample rate is non-positive.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(Error::InvalidAudio {
                reason: "sample rate must be positive".to_string(),
            });
        }
        if self.samples.is_empty() {
            return Err(Error::InvalidAudio {
                reason: "waveform is empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_duration() {
        let wave = Waveform::new(vec![0.0; 48_000], 48_000);
        assert_eq!(wave.duration_secs(), 1.0);
    }

    #[test]
    fn test_validate_rejects_empty() {
        let wave = Waveform::new(Vec::new(), 48_000);
        assert!(wave.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_rate() {
        let wave = Waveform::new(vec![0.1; 100], 0);
        assert!(wave.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_normal_waveform() {
        let wave = Waveform::new(vec![0.1; 100], 48_000);
        assert!(wave.validate().is_ok());
    }
}
