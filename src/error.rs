//! Error types for whistla.

/// Result type alias for whistla operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for whistla.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// No valid audio files found.
    #[error("no valid audio files found in the provided paths")]
    NoValidAudioFiles,

    /// Every file in a batch failed.
    #[error("all {failed} input file(s) failed")]
    BatchFailed {
        /// Number of files that failed.
        failed: usize,
    },

    /// Failed to open audio file.
    #[error("failed to open audio file '{path}'")]
    AudioOpen {
        /// Path to the audio file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to decode audio.
    #[error("failed to decode audio from '{path}'")]
    AudioDecode {
        /// Path to the audio file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No audio tracks found.
    #[error("no audio tracks found in '{path}'")]
    NoAudioTracks {
        /// Path to the audio file.
        path: std::path::PathBuf,
    },

    /// Waveform cannot be analyzed.
    #[error("invalid audio: {reason}")]
    InvalidAudio {
        /// Description of why the waveform was rejected.
        reason: String,
    },

    /// Failed to resample audio.
    #[error("failed to resample audio: {reason}")]
    Resample {
        /// Description of the resampling failure.
        reason: String,
    },

    /// Failed to load the ONNX model.
    #[error("failed to load model '{path}'")]
    ModelLoad {
        /// Path to the model file.
        path: std::path::PathBuf,
        /// Underlying runtime error.
        #[source]
        source: ort::Error,
    },

    /// Model inference call failed.
    #[error("model inference failed")]
    ModelRun {
        /// Underlying runtime error.
        #[source]
        source: ort::Error,
    },

    /// Model graph does not look like a single-input classifier.
    #[error("model '{path}' is not a single-input classifier: {reason}")]
    ModelShape {
        /// Path to the model file.
        path: std::path::PathBuf,
        /// Description of the mismatch.
        reason: String,
    },

    /// Model returned an output of unexpected size.
    #[error("model returned {actual} scores, expected {expected}")]
    ModelOutput {
        /// Number of scores expected (class count).
        expected: usize,
        /// Number of scores actually returned.
        actual: usize,
    },

    /// Failed to read class labels file.
    #[error("failed to read labels file '{path}'")]
    LabelsRead {
        /// Path to the labels file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Labels file contained no labels.
    #[error("labels file '{path}' contains no labels")]
    EmptyLabels {
        /// Path to the labels file.
        path: std::path::PathBuf,
    },

    /// Failed to parse selection table.
    #[error("failed to parse selection table '{path}'")]
    SelectionTableParse {
        /// Path to the selection table.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Selection table is structurally invalid.
    #[error("invalid selection table: {message}")]
    InvalidSelectionTable {
        /// Description of the format error.
        message: String,
    },

    /// Augmentation could not be applied.
    #[error("augmentation failed: {reason}")]
    Augmentation {
        /// Description of the failure.
        reason: String,
    },

    /// No background clips available for mixing.
    #[error("no background clips found in '{path}'")]
    NoBackgroundClips {
        /// Path to the background pool directory.
        path: std::path::PathBuf,
    },

    /// Failed to write WAV file.
    #[error("failed to write WAV file '{path}'")]
    WavWriteFailed {
        /// Path to the WAV file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: hound::Error,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an output file.
    #[error("failed to write output file '{path}'")]
    OutputWrite {
        /// Path to the output file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
