//! Per-channel energy normalization.
//!
//! Applied as a second stage on top of the linear mel power matrix. Each
//! frequency band is normalized by an IIR-smoothed version of its own
//! energy envelope, then root-compressed.

use crate::constants::pcen;
use ndarray::Array2;

/// Smoothing coefficient for the energy envelope filter.
///
/// Derived from the configured time constant expressed in frames:
/// `t = time_constant * sample_rate / hop`.
#[must_use]
pub fn smoothing_coefficient(sample_rate: u32, hop: usize) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    let t = pcen::TIME_CONSTANT * sample_rate as f32 / hop as f32;
    if t <= 0.0 {
        return 1.0;
    }
    ((1.0 + 4.0 * t * t).sqrt() - 1.0) / (2.0 * t * t)
}

/// Apply PCEN to a linear mel power matrix of shape `(n_mels, n_frames)`.
///
/// `pcen = (e / (eps + m)^gain + bias)^power - bias^power` where `m` is the
/// per-band smoothed energy. Non-negative input yields finite non-negative
/// output.
#[must_use]
pub fn apply_pcen(energy: &Array2<f32>, smoothing: f32) -> Array2<f32> {
    let (n_mels, n_frames) = energy.dim();
    let mut out = Array2::<f32>::zeros((n_mels, n_frames));
    if n_frames == 0 {
        return out;
    }

    let bias_term = pcen::BIAS.powf(pcen::POWER);

    for band in 0..n_mels {
        // Initialize the smoother with the first frame's energy
        let mut smoothed = energy[[band, 0]];
        for frame in 0..n_frames {
            let e = energy[[band, frame]];
            smoothed = (1.0 - smoothing) * smoothed + smoothing * e;
            let norm = e / (pcen::EPS + smoothed).powf(pcen::GAIN);
            out[[band, frame]] = (norm + pcen::BIAS).powf(pcen::POWER) - bias_term;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothing_coefficient_range() {
        let b = smoothing_coefficient(48_000, 512);
        assert!(b > 0.0);
        assert!(b < 1.0);
    }

    #[test]
    fn test_pcen_of_zeros_is_zero() {
        let energy = Array2::<f32>::zeros((8, 16));
        let out = apply_pcen(&energy, 0.025);
        for &v in &out {
            assert!(v.abs() < 1e-6);
        }
    }

    #[test]
    fn test_pcen_output_is_finite() {
        #[allow(clippy::cast_precision_loss)]
        let energy =
            Array2::from_shape_fn((16, 32), |(b, f)| ((b + 1) * (f + 1)) as f32 * 1e-3);
        let out = apply_pcen(&energy, smoothing_coefficient(48_000, 512));
        for &v in &out {
            assert!(v.is_finite());
            assert!(v >= 0.0);
        }
    }

    #[test]
    fn test_pcen_flattens_stationary_energy() {
        // A band with constant energy normalizes toward a level independent
        // of the absolute energy
        let loud = Array2::<f32>::from_elem((1, 200), 10.0);
        let quiet = Array2::<f32>::from_elem((1, 200), 0.1);
        let b = smoothing_coefficient(48_000, 512);
        let out_loud = apply_pcen(&loud, b);
        let out_quiet = apply_pcen(&quiet, b);
        // Compare late frames, after the smoother has settled
        let late_loud = out_loud[[0, 199]];
        let late_quiet = out_quiet[[0, 199]];
        assert!((late_loud - late_quiet).abs() < 0.1);
    }

    #[test]
    fn test_empty_input() {
        let energy = Array2::<f32>::zeros((8, 0));
        let out = apply_pcen(&energy, 0.025);
        assert_eq!(out.dim(), (8, 0));
    }
}
