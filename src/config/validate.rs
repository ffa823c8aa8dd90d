//! Configuration validation.
//!
//! Validation runs once, before any file is touched. The configuration is
//! shared and immutable for the whole batch, so a bad option fails the run
//! up front instead of partway through.

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.sampling_rate == 0 {
        return Err(Error::ConfigValidation {
            message: "sampling_rate must be positive".to_string(),
        });
    }

    if config.spectrogram_max_length == 0 {
        return Err(Error::ConfigValidation {
            message: "spectrogram_max_length must be at least 1 second".to_string(),
        });
    }

    // Hop size is nfft / 2, so nfft must be an even number of samples.
    if config.nfft < 2 || config.nfft % 2 != 0 {
        return Err(Error::ConfigValidation {
            message: format!("nfft must be an even number >= 2, got {}", config.nfft),
        });
    }

    // A shaped clip must cover at least one FFT frame.
    if config.max_length_samples() < config.nfft {
        return Err(Error::ConfigValidation {
            message: format!(
                "spectrogram_max_length * sampling_rate ({} samples) is shorter than nfft ({})",
                config.max_length_samples(),
                config.nfft
            ),
        });
    }

    if !(0.0..=100.0).contains(&config.contrast_percentile) {
        return Err(Error::ConfigValidation {
            message: format!(
                "contrast_percentile must be between 0 and 100, got {}",
                config.contrast_percentile
            ),
        });
    }

    if config.dynamic_range <= 0.0 || !config.dynamic_range.is_finite() {
        return Err(Error::ConfigValidation {
            message: format!(
                "dynamic_range must be a positive number of dB, got {}",
                config.dynamic_range
            ),
        });
    }

    if config.inches_per_sec <= 0.0 {
        return Err(Error::ConfigValidation {
            message: format!(
                "inches_per_sec must be positive, got {}",
                config.inches_per_sec
            ),
        });
    }

    if config.inches_per_khz <= 0.0 {
        return Err(Error::ConfigValidation {
            message: format!(
                "inches_per_KHz must be positive, got {}",
                config.inches_per_khz
            ),
        });
    }

    if config.color_map.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: "color_map must not be empty".to_string(),
        });
    }

    Ok(())
}
