//! CLI argument definitions.

use crate::cli::validators::{parse_augment_kind, parse_threshold};
use crate::constants::DEFAULT_THRESHOLD;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Dolphin whistle detection and signature whistle classification.
#[derive(Debug, Parser)]
#[command(name = "whistla")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Path to the configuration file (default: ./config.json).
    #[arg(long, global = true, env = "WHISTLA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress progress output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace, -vvv: trace+ORT).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Detect whistles in recordings and write Raven selection tables.
    Detect {
        /// Input audio files or directories to scan.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Model options.
        #[command(flatten)]
        model: ModelArgs,

        /// Output options.
        #[command(flatten)]
        output: OutputArgs,

        /// Detection threshold (0.0-1.0).
        #[arg(short, long, value_parser = parse_threshold,
              default_value_t = DEFAULT_THRESHOLD, env = "WHISTLA_THRESHOLD")]
        threshold: f32,

        /// Stop on first error.
        #[arg(long)]
        fail_fast: bool,
    },

    /// Classify whistle clips and write an annotation table.
    Classify {
        /// Input clip files or directories to classify.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Model options.
        #[command(flatten)]
        model: ModelArgs,

        /// Output options.
        #[command(flatten)]
        output: OutputArgs,

        /// Annotation table path (default: <output-dir>/annotations.tsv).
        #[arg(short, long)]
        annotations: Option<PathBuf>,

        /// Stop on first error.
        #[arg(long)]
        fail_fast: bool,
    },

    /// Classify the selections of a prior detection table.
    ClassifyTable {
        /// Audio recording the selection table refers to.
        audio: PathBuf,

        /// Raven selection table with the detection intervals.
        table: PathBuf,

        /// Model options.
        #[command(flatten)]
        model: ModelArgs,

        /// Output options.
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Preview training-time augmentations of one clip.
    Augment {
        /// Clip to augment.
        input: PathBuf,

        /// Augmentation kinds (comma-separated; default: all).
        #[arg(short, long, value_delimiter = ',', value_parser = parse_augment_kind)]
        kinds: Option<Vec<crate::augment::AugmentKind>>,

        /// Parameter override applied to every requested kind.
        #[arg(short, long)]
        amount: Option<f32>,

        /// Background clip directory; enables EBR mixing.
        #[arg(short, long)]
        backgrounds: Option<PathBuf>,

        /// EBR values in dB for mixing (comma-separated; default: -12,-6,0,6,12).
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true,
              requires = "backgrounds")]
        ebr: Option<Vec<f32>>,

        /// Output directory (default: alongside the input).
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Model selection options.
#[derive(Debug, Args)]
pub struct ModelArgs {
    /// Path to the ONNX model file.
    #[arg(short, long, env = "WHISTLA_MODEL")]
    pub model: PathBuf,

    /// Path to the class labels file (one label per line).
    #[arg(short, long, env = "WHISTLA_LABELS")]
    pub labels: PathBuf,
}

/// Output location options.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output directory (default: same as input).
    #[arg(short, long, env = "WHISTLA_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory for staged feature images (default: <output-dir>/images).
    #[arg(long, env = "WHISTLA_STAGE_DIR")]
    pub stage_dir: Option<PathBuf>,
}
