//! Waveform-domain augmentation operations.
//!
//! All operations are pure: they read the input slice and return a new
//! buffer. Time-scaling uses overlap-add so pitch is preserved; pitch
//! shifting combines a stretch with a linear-interpolation resample so
//! duration is preserved.

use crate::error::{Error, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// OLA frame size in samples.
const STRETCH_WINDOW: usize = 1024;

/// OLA synthesis hop (75% frame overlap).
const SYNTHESIS_HOP: usize = STRETCH_WINDOW / 4;

/// Time-scale a signal by `rate` without changing pitch.
///
/// `rate > 1` shortens the signal (speed up), `rate < 1` lengthens it
/// (slow down). Input shorter than one OLA frame is returned unchanged.
pub fn time_stretch(samples: &[f32], rate: f32) -> Result<Vec<f32>> {
    if rate <= 0.0 || !rate.is_finite() {
        return Err(Error::Augmentation {
            reason: format!("rate must be positive, got {rate}"),
        });
    }
    if (rate - 1.0).abs() < f32::EPSILON || samples.len() < STRETCH_WINDOW {
        return Ok(samples.to_vec());
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let out_len = {
        #[allow(clippy::cast_precision_loss)]
        let estimated = samples.len() as f64 / f64::from(rate);
        estimated.round() as usize
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let analysis_hop = ((SYNTHESIS_HOP as f64) * f64::from(rate)).round() as usize;
    let analysis_hop = analysis_hop.max(1);

    let mut output = vec![0.0f32; out_len];
    let mut window_sum = vec![0.0f32; out_len];

    let hann: Vec<f32> = (0..STRETCH_WINDOW)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let x = std::f32::consts::PI * i as f32 / STRETCH_WINDOW as f32;
            x.sin().powi(2)
        })
        .collect();

    let mut read_pos = 0usize;
    let mut write_pos = 0usize;

    while read_pos + STRETCH_WINDOW <= samples.len() && write_pos + STRETCH_WINDOW <= out_len {
        for i in 0..STRETCH_WINDOW {
            output[write_pos + i] += samples[read_pos + i] * hann[i];
            window_sum[write_pos + i] += hann[i];
        }
        read_pos += analysis_hop;
        write_pos += SYNTHESIS_HOP;
    }

    // Normalize by window overlap sum
    for (out, &sum) in output.iter_mut().zip(&window_sum) {
        if sum > 0.001 {
            *out /= sum;
        }
    }

    Ok(output)
}

/// Shift pitch by `steps` semitones without changing duration.
///
/// Positive steps raise pitch. Stretches time by `2^(steps/12)`, then
/// resamples by the same factor so the length returns to the original
/// while every frequency moves by the requested interval.
pub fn pitch_shift(samples: &[f32], steps: f32) -> Result<Vec<f32>> {
    if !steps.is_finite() {
        return Err(Error::Augmentation {
            reason: format!("pitch steps must be finite, got {steps}"),
        });
    }
    if steps.abs() < f32::EPSILON {
        return Ok(samples.to_vec());
    }

    let factor = 2.0f32.powf(steps / 12.0);
    let stretched = time_stretch(samples, 1.0 / factor)?;
    let mut shifted = resample_linear(&stretched, factor);
    // Stretch rounding can leave the result a few samples off
    shifted.resize(samples.len(), 0.0);
    Ok(shifted)
}

/// Add zero-mean Gaussian noise with the given standard deviation.
pub fn add_noise(samples: &[f32], std_dev: f32, rng: &mut impl Rng) -> Result<Vec<f32>> {
    if std_dev < 0.0 || !std_dev.is_finite() {
        return Err(Error::Augmentation {
            reason: format!("noise standard deviation must be non-negative, got {std_dev}"),
        });
    }
    let normal = Normal::new(0.0f32, std_dev).map_err(|e| Error::Augmentation {
        reason: format!("invalid noise distribution: {e}"),
    })?;
    Ok(samples.iter().map(|&s| s + normal.sample(rng)).collect())
}

/// Resample by linear interpolation, reading `factor` source samples per
/// output sample. Frequencies are multiplied by `factor`.
fn resample_linear(samples: &[f32], factor: f32) -> Vec<f32> {
    if samples.is_empty() {
        return Vec::new();
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let out_len = {
        #[allow(clippy::cast_precision_loss)]
        let estimated = samples.len() as f64 / f64::from(factor);
        estimated.floor() as usize
    };
    let mut output = Vec::with_capacity(out_len);

    for i in 0..out_len {
        #[allow(clippy::cast_precision_loss)]
        let src_pos = i as f64 * f64::from(factor);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let idx = src_pos as usize;
        #[allow(clippy::cast_possible_truncation)]
        let frac = (src_pos - idx as f64) as f32;

        let s0 = samples[idx.min(samples.len() - 1)];
        let s1 = samples[(idx + 1).min(samples.len() - 1)];
        output.push(s0 + frac * (s1 - s0));
    }

    output
}
