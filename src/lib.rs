//! Whistla - dolphin whistle detection and classification CLI tool.
//!
//! This crate turns underwater recordings into Raven selection tables and
//! signature whistle annotations using ONNX models.

#![warn(missing_docs)]

pub mod audio;
pub mod augment;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod features;
pub mod inference;
pub mod output;
pub mod pipeline;

use clap::Parser;
use cli::{Cli, Command, ConfigAction, ModelArgs, OutputArgs};
use config::Config;
use constants::{ANNOTATIONS_FILE_NAME, augment::EBR_SET};
use features::FeatureExtractor;
use inference::OnnxModel;
use output::{ClassificationTableWriter, create_file_progress, finish_progress, inc_progress};
use pipeline::{
    classify_file, collect_input_files, detect_file, ensure_dir, output_dir_for, reclassify_table,
    stage_dir_for,
};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

pub use error::{Error, Result};

/// Main entry point for the whistla CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(config::default_config_path);
    let config = config::load_config_file(&config_path)?;
    config::validate_config(&config)?;

    match cli.command {
        Command::Detect {
            inputs,
            model,
            output,
            threshold,
            fail_fast,
        } => run_detect(
            &inputs, &model, &output, threshold, fail_fast, cli.quiet, &config,
        ),
        Command::Classify {
            inputs,
            model,
            output,
            annotations,
            fail_fast,
        } => run_classify(&inputs, &model, &output, annotations, fail_fast, &config),
        Command::ClassifyTable {
            audio,
            table,
            model,
            output,
        } => run_classify_table(&audio, &table, &model, &output, &config),
        Command::Augment {
            input,
            kinds,
            amount,
            backgrounds,
            ebr,
            output_dir,
        } => run_augment(
            &input,
            kinds.as_deref(),
            amount,
            backgrounds.as_deref(),
            ebr.as_deref(),
            output_dir.as_deref(),
            &config,
        ),
        Command::Config { action } => handle_config_command(action, &config_path, &config),
    }
}

/// Run detection over a batch of recordings.
fn run_detect(
    inputs: &[PathBuf],
    model_args: &ModelArgs,
    output: &OutputArgs,
    threshold: f32,
    fail_fast: bool,
    quiet: bool,
    config: &Config,
) -> Result<()> {
    let files = collect_input_files(inputs)?;
    if files.is_empty() {
        return Err(Error::NoValidAudioFiles);
    }
    info!("Found {} audio file(s) to process", files.len());

    let mut model = OnnxModel::load(&model_args.model, &model_args.labels)?;
    let extractor = FeatureExtractor::new(config);

    let progress_enabled = !quiet;
    let file_progress = create_file_progress(files.len(), progress_enabled && files.len() > 1);

    let mut processed = 0;
    let mut skipped = 0;
    let mut errors = 0;
    let mut total_positives = 0;

    for file in &files {
        let file_output_dir = output_dir_for(file, output.output_dir.as_deref());
        ensure_dir(&file_output_dir)?;
        let stage_dir = stage_dir_for(&file_output_dir, output.stage_dir.as_deref());
        ensure_dir(&stage_dir)?;

        match detect_file(
            file,
            &file_output_dir,
            &stage_dir,
            config,
            &extractor,
            &mut model,
            threshold,
            progress_enabled,
        ) {
            Ok(result) if result.positives > 0 => {
                processed += 1;
                total_positives += result.positives;
            }
            Ok(_) => skipped += 1,
            Err(e) => {
                error!("Failed to process {}: {}", file.display(), e);
                errors += 1;
                if fail_fast {
                    finish_progress(file_progress, "Failed");
                    return Err(e);
                }
            }
        }
        inc_progress(file_progress.as_ref());
    }
    finish_progress(file_progress, "Complete");

    info!(
        "Complete: {processed} table(s) written, {skipped} without whistles, \
         {errors} error(s), {total_positives} positive window(s)"
    );
    fail_batch_if_all_failed(errors, files.len())
}

/// Classify a batch of clips into one annotation table.
fn run_classify(
    inputs: &[PathBuf],
    model_args: &ModelArgs,
    output: &OutputArgs,
    annotations: Option<PathBuf>,
    fail_fast: bool,
    config: &Config,
) -> Result<()> {
    let files = collect_input_files(inputs)?;
    if files.is_empty() {
        return Err(Error::NoValidAudioFiles);
    }
    info!("Found {} clip(s) to classify", files.len());

    let mut model = OnnxModel::load(&model_args.model, &model_args.labels)?;
    let extractor = FeatureExtractor::new(config);

    // One table for the whole batch, so per-file output dirs do not apply
    let base_dir = output
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    ensure_dir(&base_dir)?;
    let stage_dir = stage_dir_for(&base_dir, output.stage_dir.as_deref());
    ensure_dir(&stage_dir)?;
    let table_path = annotations.unwrap_or_else(|| base_dir.join(ANNOTATIONS_FILE_NAME));

    let mut writer = ClassificationTableWriter::new(&table_path)?;
    writer.write_header()?;

    let mut processed = 0;
    let mut errors = 0;

    for file in &files {
        match classify_file(file, &stage_dir, config, &extractor, &mut model) {
            Ok(row) => {
                writer.write_row(&row)?;
                processed += 1;
            }
            Err(e) => {
                error!("Failed to classify {}: {}", file.display(), e);
                errors += 1;
                if fail_fast {
                    return Err(e);
                }
            }
        }
    }
    writer.finalize()?;

    info!(
        "Complete: {processed} clip(s) annotated in {}, {errors} error(s)",
        table_path.display()
    );
    fail_batch_if_all_failed(errors, files.len())
}

/// Classify the selections of one prior detection table.
fn run_classify_table(
    audio: &Path,
    table: &Path,
    model_args: &ModelArgs,
    output: &OutputArgs,
    config: &Config,
) -> Result<()> {
    let output_dir = output_dir_for(audio, output.output_dir.as_deref());
    ensure_dir(&output_dir)?;
    let stage_dir = stage_dir_for(&output_dir, output.stage_dir.as_deref());
    ensure_dir(&stage_dir)?;

    let mut model = OnnxModel::load(&model_args.model, &model_args.labels)?;
    let extractor = FeatureExtractor::new(config);

    let result = reclassify_table(
        audio,
        table,
        &output_dir,
        &stage_dir,
        config,
        &extractor,
        &mut model,
    )?;

    info!(
        "Complete: {} selection(s) classified into {}",
        result.rows,
        result.table_path.display()
    );
    Ok(())
}

/// Write augmented variants of one clip.
fn run_augment(
    input: &Path,
    kinds: Option<&[augment::AugmentKind]>,
    amount: Option<f32>,
    backgrounds: Option<&Path>,
    ebr: Option<&[f32]>,
    output_dir: Option<&Path>,
    config: &Config,
) -> Result<()> {
    let out_dir = output_dir_for(input, output_dir);
    ensure_dir(&out_dir)?;

    let kinds = kinds.map_or_else(|| augment::AugmentKind::ALL.to_vec(), <[_]>::to_vec);
    let ebr = ebr.map_or_else(|| EBR_SET.to_vec(), <[_]>::to_vec);

    let written = pipeline::augment_file(
        input,
        &out_dir,
        config,
        &kinds,
        amount,
        backgrounds,
        &ebr,
        &mut rand::thread_rng(),
    )?;

    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}

fn fail_batch_if_all_failed(errors: usize, total: usize) -> Result<()> {
    if errors > 0 && errors == total {
        return Err(Error::BatchFailed { failed: errors });
    }
    if errors > 0 {
        warn!("{errors} file(s) had errors");
    }
    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // ORT logging stays off below -vvv; its fallback chatter is expected.
    let filter_str = if quiet {
        "warn,ort=off".to_string()
    } else {
        match verbose {
            0 => "info,ort=off".to_string(),
            1 => "debug,ort=warn".to_string(),
            2 => "trace,ort=info".to_string(),
            _ => "trace".to_string(),
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    fmt().with_env_filter(filter).init();
}

fn handle_config_command(action: ConfigAction, config_path: &Path, config: &Config) -> Result<()> {
    match action {
        ConfigAction::Init => {
            if config_path.exists() {
                println!("Configuration file already exists: {}", config_path.display());
            } else {
                config::save_config(&Config::default(), config_path)?;
                println!("Created configuration file: {}", config_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", config_path.display());
            Ok(())
        }
    }
}
