//! Mel filterbank construction and application.

use ndarray::{Array2, s};

/// Triangular mel filterbank plus the center frequency of each band.
pub struct MelFilterbank {
    /// Filter weights, shape `(n_mels, nfft / 2 + 1)`.
    pub filters: Array2<f32>,
    /// Band center frequencies in Hz, used as the feature frequency axis.
    pub centers: Vec<f32>,
}

/// Build an HTK-scale triangular filterbank spanning 0..sample_rate/2.
#[must_use]
pub fn build_filterbank(n_mels: usize, nfft: usize, sample_rate: u32) -> MelFilterbank {
    let n_freqs = nfft / 2 + 1;
    let mut filters = Array2::<f32>::zeros((n_mels, n_freqs));

    let f_min = 0.0f32;
    #[allow(clippy::cast_precision_loss)]
    let f_max = sample_rate as f32 / 2.0;

    let mel_min = hz_to_mel(f_min);
    let mel_max = hz_to_mel(f_max);

    // n_mels + 2 edge points for triangular filters
    #[allow(clippy::cast_precision_loss)]
    let mel_points: Vec<f32> = (0..=n_mels + 1)
        .map(|i| mel_min + (i as f32) * (mel_max - mel_min) / ((n_mels + 1) as f32))
        .collect();

    let hz_points: Vec<f32> = mel_points.iter().map(|&m| mel_to_hz(m)).collect();

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let bin_points: Vec<usize> = hz_points
        .iter()
        .map(|&hz| {
            #[allow(clippy::cast_precision_loss)]
            let bin = (nfft as f32 + 1.0) * hz / sample_rate as f32;
            bin.floor() as usize
        })
        .collect();

    for i in 0..n_mels {
        let start = bin_points[i];
        let center = bin_points[i + 1];
        let end = bin_points[i + 2];

        #[allow(clippy::cast_precision_loss)]
        for k in start..center {
            if k < n_freqs && center > start {
                filters[[i, k]] = (k - start) as f32 / (center - start) as f32;
            }
        }

        #[allow(clippy::cast_precision_loss)]
        for k in center..end {
            if k < n_freqs && end > center {
                filters[[i, k]] = (end - k) as f32 / (end - center) as f32;
            }
        }
    }

    let centers = hz_points[1..=n_mels].to_vec();

    MelFilterbank { filters, centers }
}

/// Apply the filterbank to a power spectrogram.
///
/// `power` has shape `(n_freqs, n_frames)`; the result has shape
/// `(n_mels, n_frames)`.
#[must_use]
pub fn apply_filterbank(filterbank: &MelFilterbank, power: &Array2<f32>) -> Array2<f32> {
    let n_mels = filterbank.filters.dim().0;
    let n_frames = power.dim().1;
    let mut mel = Array2::<f32>::zeros((n_mels, n_frames));

    for frame_idx in 0..n_frames {
        let frame = power.slice(s![.., frame_idx]);
        for mel_idx in 0..n_mels {
            let filter = filterbank.filters.slice(s![mel_idx, ..]);
            let value: f32 = filter.iter().zip(frame.iter()).map(|(&f, &s)| f * s).sum();
            mel[[mel_idx, frame_idx]] = value;
        }
    }

    mel
}

/// Convert frequency in Hz to mel scale (HTK formula).
#[must_use]
pub fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

/// Convert mel scale to frequency in Hz (HTK formula).
#[must_use]
pub fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10.0f32.powf(mel / 2595.0) - 1.0)
}
