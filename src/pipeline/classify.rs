//! Whole-clip classification pipeline.

use crate::audio::{decode_audio_file, resample_to};
use crate::config::Config;
use crate::constants::image::MODEL_CHANNELS;
use crate::error::Result;
use crate::features::{FeatureExtractor, FeatureImage};
use crate::inference::{ModelAdapter, top_predictions};
use crate::output::{ClipClassification, ClipKey, format_confidence};
use crate::pipeline::stage_image_path;
use std::path::Path;
use tracing::{debug, info};

/// Classify one clip with the signature whistle model.
///
/// The whole file is treated as a single clip: it is resampled, shaped to
/// the configured length, staged as a feature image, and scored once.
/// Returns the top-scoring classes for the annotation table.
pub fn classify_file(
    input_path: &Path,
    stage_dir: &Path,
    config: &Config,
    extractor: &FeatureExtractor,
    model: &mut dyn ModelAdapter,
) -> Result<ClipClassification> {
    info!("Classifying: {}", input_path.display());

    let decoded = decode_audio_file(input_path)?;
    if decoded.sample_rate != config.sampling_rate {
        debug!(
            "Resampling from {} Hz to {} Hz...",
            decoded.sample_rate, config.sampling_rate
        );
    }
    let waveform = resample_to(decoded, config.sampling_rate)?;

    let key = ClipKey::new(input_path, 0);
    let tensor = extractor.extract(&waveform, false)?;
    let image = FeatureImage::from_tensor(&tensor, extractor.kind(), config.dynamic_range);
    image.write_pgm(&stage_image_path(stage_dir, &key, false))?;

    let scores = model.predict(&image.to_model_input(MODEL_CHANNELS))?;
    let predictions = top_predictions(&scores, model.labels());

    if let Some(best) = predictions.first() {
        debug!(
            "Top prediction for {}: {} ({})",
            key.file_name(),
            best.label,
            format_confidence(best.confidence)
        );
    }

    Ok(ClipClassification { key, predictions })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::pipeline::tests::{ScriptedModel, test_config, write_test_wav};

    #[test]
    fn test_classify_returns_top_three() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sw_031.wav");
        write_test_wav(&input, 2.0, 8000);
        let config = test_config();
        let extractor = FeatureExtractor::new(&config);
        let mut model = ScriptedModel::new(
            &["SW1", "SW2", "SW3", "SW4", "SW5"],
            &[&[0.02, 0.91, 0.01, 0.05, 0.01]],
        );

        let result = classify_file(&input, dir.path(), &config, &extractor, &mut model).unwrap();

        assert_eq!(result.key.chunk_index, 0);
        assert_eq!(result.predictions.len(), 3);
        assert_eq!(result.predictions[0].label, "SW2");
        assert_eq!(result.predictions[0].confidence, 0.91);
        assert_eq!(result.predictions[1].label, "SW4");
        assert_eq!(result.predictions[2].label, "SW1");
    }

    #[test]
    fn test_classify_stages_bare_stem_image() {
        let dir = tempfile::tempdir().unwrap();
        let stage = dir.path().join("stage");
        std::fs::create_dir(&stage).unwrap();
        let input = dir.path().join("sw_031.wav");
        write_test_wav(&input, 1.0, 8000);
        let config = test_config();
        let extractor = FeatureExtractor::new(&config);
        let mut model = ScriptedModel::new(&["SW1", "SW2", "SW3"], &[&[0.6, 0.3, 0.1]]);

        classify_file(&input, &stage, &config, &extractor, &mut model).unwrap();

        assert!(stage.join("sw_031.pgm").is_file());
        assert!(!stage.join("sw_031_0.pgm").exists());
    }

    #[test]
    fn test_classify_propagates_model_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sw_031.wav");
        write_test_wav(&input, 1.0, 8000);
        let config = test_config();
        let extractor = FeatureExtractor::new(&config);
        let mut model = ScriptedModel::failing_on(&["SW1"], &[&[0.9]], 0);

        let result = classify_file(&input, dir.path(), &config, &extractor, &mut model);
        assert!(result.is_err());
    }
}
