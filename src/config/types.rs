//! Configuration type definitions.

use crate::constants::{analysis, plot};
use serde::{Deserialize, Serialize};

/// Complete analysis configuration.
///
/// Mirrors the JSON configuration record consumed by the whole pipeline.
/// The record is immutable for the lifetime of a batch: it is loaded once,
/// validated once, and passed by reference into every extraction call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feature representation computed per clip.
    pub features: FeatureKind,

    /// Analysis sample rate in Hz; input audio is resampled to this rate.
    pub sampling_rate: u32,

    /// Maximum clip length in seconds.
    ///
    /// Doubles as the detection chunking window and the fixed length clips
    /// are padded or trimmed to before feature extraction.
    pub spectrogram_max_length: u32,

    /// FFT size in samples.
    pub nfft: usize,

    /// Window function applied to each FFT frame.
    pub window: WindowKind,

    /// Per-row contrast enhancement percentile (0-100).
    pub contrast_percentile: f32,

    /// Spectrogram dynamic range in dB.
    pub dynamic_range: f32,

    /// Horizontal plot scale for the external rendering layer.
    pub inches_per_sec: f32,

    /// Vertical plot scale for the external rendering layer.
    #[serde(rename = "inches_per_KHz")]
    pub inches_per_khz: f32,

    /// Colormap name for the external rendering layer.
    pub color_map: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            features: FeatureKind::default(),
            sampling_rate: analysis::SAMPLING_RATE,
            spectrogram_max_length: analysis::MAX_LENGTH_SECONDS,
            nfft: analysis::NFFT,
            window: WindowKind::default(),
            contrast_percentile: analysis::CONTRAST_PERCENTILE,
            dynamic_range: analysis::DYNAMIC_RANGE,
            inches_per_sec: plot::INCHES_PER_SEC,
            inches_per_khz: plot::INCHES_PER_KHZ,
            color_map: plot::COLOR_MAP.to_string(),
        }
    }
}

impl Config {
    /// Fixed sample count clips are shaped to before extraction.
    #[must_use]
    pub fn max_length_samples(&self) -> usize {
        self.spectrogram_max_length as usize * self.sampling_rate as usize + 1
    }

    /// Chunking window length in seconds.
    #[must_use]
    pub fn window_seconds(&self) -> f32 {
        self.spectrogram_max_length as f32
    }

    /// STFT hop size in samples.
    #[must_use]
    pub fn hop(&self) -> usize {
        self.nfft / 2
    }
}

/// Feature representations the extractor can compute.
///
/// Selected once per batch from the configuration; every chunk in a batch
/// uses the same representation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    /// STFT magnitude spectrogram.
    #[default]
    Spec,
    /// Mel-scaled spectrogram.
    Melspec,
    /// Per-channel energy normalized mel-spectrogram.
    Pcen,
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spec => write!(f, "spec"),
            Self::Melspec => write!(f, "melspec"),
            Self::Pcen => write!(f, "pcen"),
        }
    }
}

impl std::str::FromStr for FeatureKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spec" => Ok(Self::Spec),
            "melspec" => Ok(Self::Melspec),
            "pcen" => Ok(Self::Pcen),
            other => Err(format!("unknown feature kind: {other}")),
        }
    }
}

/// Supported FFT window functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    /// Periodic Hamming window.
    #[default]
    Hamming,
    /// Periodic Hann window.
    Hann,
}

impl std::fmt::Display for WindowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hamming => write!(f, "hamming"),
            Self::Hann => write!(f, "hann"),
        }
    }
}

impl std::str::FromStr for WindowKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hamming" => Ok(Self::Hamming),
            "hann" | "hanning" => Ok(Self::Hann),
            other => Err(format!("unknown window function: {other}")),
        }
    }
}
