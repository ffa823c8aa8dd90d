//! Feature extraction: time-frequency representations of whistle clips.
//!
//! A clip is shaped to the configured fixed length, framed into an STFT,
//! and reduced to one of three representations: dB magnitude spectrogram,
//! mel-scaled spectrogram, or PCEN-normalized mel-spectrogram. PCEN is
//! always derived from the mel stage, never computed independently.

mod image;
mod mel;
mod pcen;
mod stft;
mod window;

pub use image::FeatureImage;

use crate::audio::Waveform;
use crate::augment::{to_fixed_length, to_fixed_length_random};
use crate::config::{Config, FeatureKind};
use crate::constants::analysis;
use crate::error::{Error, Result};
use mel::MelFilterbank;
use ndarray::{Array1, Array2};
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// A 2-D time-frequency representation with axis coordinates.
///
/// Immutable after creation. `values` has shape `(freq_bins, time_bins)`;
/// `freq_axis` holds the bin frequencies in Hz and `time_axis` the frame
/// start times in seconds.
#[derive(Debug, Clone)]
pub struct FeatureTensor {
    /// Feature values, shape `(freq_bins, time_bins)`.
    pub values: Array2<f32>,
    /// Frequency of each row in Hz.
    pub freq_axis: Vec<f32>,
    /// Start time of each column in seconds.
    pub time_axis: Vec<f32>,
}

/// Computes feature tensors for a fixed configuration.
///
/// Built once per batch: the window, FFT plan, and mel filterbank are
/// precomputed, and the representation kind is resolved from the
/// configuration a single time.
pub struct FeatureExtractor {
    kind: FeatureKind,
    sample_rate: u32,
    nfft: usize,
    hop: usize,
    target_len: usize,
    dynamic_range: f32,
    contrast_percentile: f32,
    window: Array1<f32>,
    filterbank: MelFilterbank,
    fft: Arc<dyn Fft<f32>>,
    pcen_smoothing: f32,
}

impl FeatureExtractor {
    /// Build an extractor from a validated configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let hop = config.hop();
        let window = window::build_window(config.window, config.nfft);
        let filterbank = mel::build_filterbank(analysis::MEL_BANDS, config.nfft, config.sampling_rate);
        let fft = FftPlanner::new().plan_fft_forward(config.nfft);

        Self {
            kind: config.features,
            sample_rate: config.sampling_rate,
            nfft: config.nfft,
            hop,
            target_len: config.max_length_samples(),
            dynamic_range: config.dynamic_range,
            contrast_percentile: config.contrast_percentile,
            window,
            filterbank,
            fft,
            pcen_smoothing: pcen::smoothing_coefficient(config.sampling_rate, hop),
        }
    }

    /// The representation this extractor computes.
    #[must_use]
    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    /// Extract a feature tensor from a waveform.
    ///
    /// The waveform is cropped or zero-padded to the configured length
    /// first; `random_pad` randomizes the padding split and is only set
    /// on training-preview paths, never during inference.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAudio`] if the waveform is empty, has a
    /// non-positive sample rate, or does not match the configured
    /// analysis rate.
    pub fn extract(&self, waveform: &Waveform, random_pad: bool) -> Result<FeatureTensor> {
        waveform.validate()?;
        if waveform.sample_rate != self.sample_rate {
            return Err(Error::InvalidAudio {
                reason: format!(
                    "waveform rate {} Hz does not match analysis rate {} Hz",
                    waveform.sample_rate, self.sample_rate
                ),
            });
        }

        let shaped = if random_pad {
            to_fixed_length_random(&waveform.samples, self.target_len, &mut rand::thread_rng())
        } else {
            to_fixed_length(&waveform.samples, self.target_len)
        };

        let tensor = match self.kind {
            FeatureKind::Spec => self.spectrogram(&shaped),
            FeatureKind::Melspec => self.melspec(&shaped),
            FeatureKind::Pcen => self.pcen(&shaped),
        };

        Ok(tensor)
    }

    fn magnitudes(&self, samples: &[f32]) -> Array2<f32> {
        stft::stft_magnitudes(samples, &self.window, &self.fft, self.nfft, self.hop)
    }

    fn spectrogram(&self, samples: &[f32]) -> FeatureTensor {
        let mut values = to_db(&self.magnitudes(samples), self.dynamic_range);
        apply_contrast(&mut values, self.contrast_percentile);
        let n_frames = values.dim().1;
        FeatureTensor {
            values,
            freq_axis: self.linear_freq_axis(),
            time_axis: self.time_axis(n_frames),
        }
    }

    fn mel_power(&self, samples: &[f32]) -> Array2<f32> {
        let power = self.magnitudes(samples).mapv(|m| m * m);
        mel::apply_filterbank(&self.filterbank, &power)
    }

    fn melspec(&self, samples: &[f32]) -> FeatureTensor {
        let energy = self.mel_power(samples);
        let values = energy.mapv(|x| 10.0 * x.max(analysis::LOG_FLOOR).log10());
        let n_frames = values.dim().1;
        FeatureTensor {
            values,
            freq_axis: self.filterbank.centers.clone(),
            time_axis: self.time_axis(n_frames),
        }
    }

    fn pcen(&self, samples: &[f32]) -> FeatureTensor {
        let energy = self.mel_power(samples);
        let values = pcen::apply_pcen(&energy, self.pcen_smoothing);
        let n_frames = values.dim().1;
        FeatureTensor {
            values,
            freq_axis: self.filterbank.centers.clone(),
            time_axis: self.time_axis(n_frames),
        }
    }

    fn linear_freq_axis(&self) -> Vec<f32> {
        #[allow(clippy::cast_precision_loss)]
        (0..=self.nfft / 2)
            .map(|k| k as f32 * self.sample_rate as f32 / self.nfft as f32)
            .collect()
    }

    fn time_axis(&self, n_frames: usize) -> Vec<f32> {
        #[allow(clippy::cast_precision_loss)]
        (0..n_frames)
            .map(|t| (t * self.hop) as f32 / self.sample_rate as f32)
            .collect()
    }
}

/// Convert magnitudes to dB relative to the tensor maximum, clamped to
/// `[-dynamic_range, 0]`.
fn to_db(magnitudes: &Array2<f32>, dynamic_range: f32) -> Array2<f32> {
    let reference = magnitudes
        .iter()
        .fold(analysis::LOG_FLOOR, |acc, &v| acc.max(v));
    magnitudes.mapv(|v| {
        let db = 20.0 * (v.max(analysis::LOG_FLOOR) / reference).log10();
        db.clamp(-dynamic_range, 0.0)
    })
}

/// Raise every value below its row's percentile to that percentile.
///
/// Suppresses per-band background variation so tonal contours stand out.
fn apply_contrast(values: &mut Array2<f32>, percentile: f32) {
    let n_cols = values.dim().1;
    if n_cols == 0 {
        return;
    }

    for mut row in values.rows_mut() {
        let mut sorted: Vec<f32> = row.iter().copied().collect();
        sorted.sort_by(f32::total_cmp);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let idx = {
            #[allow(clippy::cast_precision_loss)]
            let pos = (sorted.len() - 1) as f32 * percentile / 100.0;
            pos.round() as usize
        };
        let floor = sorted[idx.min(sorted.len() - 1)];
        row.mapv_inplace(|v| v.max(floor));
    }
}
