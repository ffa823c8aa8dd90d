//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config files and user-facing messages.
pub const APP_NAME: &str = "whistla";

/// Config file name looked up in the working directory by default.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default file name for the classification annotations table.
pub const ANNOTATIONS_FILE_NAME: &str = "annotations.tsv";

/// Default detection threshold applied to the detector's scalar score.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Number of ranked predictions reported per clip.
pub const TOP_K: usize = 3;

/// Supported audio file extensions for input collection.
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "flac", "mp3", "m4a", "aac"];

/// Analysis defaults mirroring the recognized configuration record.
pub mod analysis {
    /// Default analysis sample rate in Hz.
    pub const SAMPLING_RATE: u32 = 48_000;

    /// Default analysis window length in seconds.
    ///
    /// Doubles as the chunking window for detection and the maximum clip
    /// length for classification.
    pub const MAX_LENGTH_SECONDS: u32 = 3;

    /// Default FFT size in samples.
    pub const NFFT: usize = 1024;

    /// Default window function name.
    pub const WINDOW: &str = "hamming";

    /// Default contrast enhancement percentile (per frequency row).
    pub const CONTRAST_PERCENTILE: f32 = 50.0;

    /// Default spectrogram dynamic range in dB.
    pub const DYNAMIC_RANGE: f32 = 80.0;

    /// Number of mel filterbank bands.
    pub const MEL_BANDS: usize = 128;

    /// Floor applied before any logarithm to keep outputs finite.
    pub const LOG_FLOOR: f32 = 1e-10;
}

/// Per-channel energy normalization parameters.
pub mod pcen {
    /// Gain exponent applied to the smoothed energy.
    pub const GAIN: f32 = 0.98;

    /// Bias added before the root compression.
    pub const BIAS: f32 = 2.0;

    /// Root compression exponent.
    pub const POWER: f32 = 0.5;

    /// Stabilizer added to the smoothed energy.
    pub const EPS: f32 = 1e-6;

    /// Smoothing filter time constant in seconds.
    pub const TIME_CONSTANT: f32 = 0.4;
}

/// Plot sizing defaults carried in the configuration record.
///
/// These size the external rendering layer and are not consumed by the
/// analysis pipeline itself.
pub mod plot {
    /// Horizontal scale of rendered spectrograms.
    pub const INCHES_PER_SEC: f32 = 2.0;

    /// Vertical scale of rendered spectrograms.
    pub const INCHES_PER_KHZ: f32 = 0.1;

    /// Colormap name handed to the rendering layer.
    pub const COLOR_MAP: &str = "YlGnBu_r";
}

/// Raven selection table constants.
pub mod raven {
    /// View column value.
    pub const VIEW: &str = "Spectrogram 1";

    /// Channel column value.
    pub const CHANNEL: u8 = 1;

    /// Low frequency bound in Hz for detection rows.
    pub const LOW_FREQ: f32 = 0.0;

    /// Label written in the Found column for positive chunks.
    pub const FOUND_LABEL: &str = "whistle";

    /// Selection table file extension.
    pub const TABLE_EXTENSION: &str = ".selections.txt";

    /// Extension for selection tables augmented with classifications.
    pub const RECLASSIFIED_TABLE_EXTENSION: &str = ".classified.selections.txt";
}

/// Confidence value bounds and formatting.
pub mod confidence {
    /// Minimum valid confidence value.
    pub const MIN: f32 = 0.0;

    /// Maximum valid confidence value.
    pub const MAX: f32 = 1.0;

    /// Decimal places used when formatting confidences as percentages.
    pub const DECIMAL_PLACES: usize = 2;
}

/// Augmentation defaults.
pub mod augment {
    /// Default pitch shift magnitude in semitone steps.
    pub const PITCH_STEPS: f32 = 2.0;

    /// Default time-scale rate factor.
    pub const RATE: f32 = 1.25;

    /// Default noise standard deviation.
    pub const NOISE_STD: f32 = 0.005;

    /// Event-to-background ratios (dB) previewed when mixing.
    pub const EBR_SET: [f32; 5] = [-12.0, -6.0, 0.0, 6.0, 12.0];
}

/// Stage image constants.
pub mod image {
    /// File extension of rendered feature images.
    pub const EXTENSION: &str = "pgm";

    /// Default stage directory name under the output directory.
    pub const STAGE_DIR_NAME: &str = "images";

    /// Channel count of the model input tensor.
    pub const MODEL_CHANNELS: usize = 1;
}
