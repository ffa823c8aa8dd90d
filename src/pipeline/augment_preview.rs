//! Augmentation preview: write augmented variants of one clip to disk.

use crate::audio::{Waveform, decode_audio_file, resample_to};
use crate::augment::{self, AugmentKind, BackgroundPool, mix_at_ebr, to_fixed_length};
use crate::config::Config;
use crate::error::Result;
use crate::output::write_wav_file;
use crate::pipeline::file_stem;
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Apply augmentations to one clip and write each variant as a WAV file.
///
/// Single-waveform kinds yield one file each, named
/// `<stem>_<kind><amount>.wav`. When a background directory is given, one
/// mix per EBR value is written as `<stem>_mix<ebr>.wav`; the background
/// clip is drawn from the pool at random.
///
/// # Arguments
///
/// * `input_path` - Clip to augment
/// * `output_dir` - Directory for the variant WAV files
/// * `config` - Analysis configuration
/// * `kinds` - Single-waveform augmentations to apply
/// * `amount` - Parameter override; each kind's default when `None`
/// * `background_dir` - Background pool directory for mixing
/// * `ebr_values` - Event-to-background ratios in dB, one mix each
/// * `rng` - Randomness source for noise, padding, and pool draws
#[allow(clippy::too_many_arguments)]
pub fn augment_file(
    input_path: &Path,
    output_dir: &Path,
    config: &Config,
    kinds: &[AugmentKind],
    amount: Option<f32>,
    background_dir: Option<&Path>,
    ebr_values: &[f32],
    rng: &mut impl Rng,
) -> Result<Vec<PathBuf>> {
    info!("Augmenting: {}", input_path.display());

    let decoded = decode_audio_file(input_path)?;
    let waveform = resample_to(decoded, config.sampling_rate)?;
    let stem = file_stem(input_path).into_owned();

    let mut written = Vec::new();

    for &kind in kinds {
        let value = amount.unwrap_or_else(|| kind.default_amount());
        debug!("Applying {kind} with amount {value}");
        let variant = augment::apply(kind, &waveform, value, rng)?;
        let path = output_dir.join(format!("{stem}_{kind}{value}.wav"));
        write_wav_file(&path, &variant)?;
        written.push(path);
    }

    if let Some(dir) = background_dir {
        let pool = BackgroundPool::from_dir(dir)?;
        let background_path = pool.pick(rng).to_path_buf();
        info!("Mixing with background: {}", background_path.display());
        let background = resample_to(decode_audio_file(&background_path)?, config.sampling_rate)?;

        let foreground = to_fixed_length(&waveform.samples, config.max_length_samples());
        for &ebr in ebr_values {
            let mixed = mix_at_ebr(&foreground, &background.samples, ebr)?;
            let path = output_dir.join(format!("{stem}_mix{ebr}.wav"));
            write_wav_file(&path, &Waveform::new(mixed, config.sampling_rate))?;
            written.push(path);
        }
    }

    info!("Wrote {} augmented clips", written.len());
    Ok(written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::constants::augment::EBR_SET;
    use crate::pipeline::tests::{test_config, write_test_wav};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_augment_writes_one_file_per_kind() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sw_007.wav");
        write_test_wav(&input, 1.0, 8000);
        let config = test_config();
        let mut rng = StdRng::seed_from_u64(7);

        let written = augment_file(
            &input,
            dir.path(),
            &config,
            &AugmentKind::ALL,
            None,
            None,
            &[],
            &mut rng,
        )
        .unwrap();

        assert_eq!(written.len(), AugmentKind::ALL.len());
        assert!(dir.path().join("sw_007_shiftpitchup2.wav").is_file());
        assert!(dir.path().join("sw_007_shiftpitchdown2.wav").is_file());
        assert!(dir.path().join("sw_007_speedup1.25.wav").is_file());
        assert!(dir.path().join("sw_007_addrandomnoise0.005.wav").is_file());
    }

    #[test]
    fn test_augment_amount_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sw_007.wav");
        write_test_wav(&input, 1.0, 8000);
        let config = test_config();
        let mut rng = StdRng::seed_from_u64(7);

        augment_file(
            &input,
            dir.path(),
            &config,
            &[AugmentKind::ShiftPitchUp],
            Some(5.0),
            None,
            &[],
            &mut rng,
        )
        .unwrap();

        assert!(dir.path().join("sw_007_shiftpitchup5.wav").is_file());
    }

    #[test]
    fn test_augment_writes_one_mix_per_ebr() {
        let dir = tempfile::tempdir().unwrap();
        let pool = dir.path().join("pool");
        std::fs::create_dir(&pool).unwrap();
        write_test_wav(&pool.join("sea_state_2.wav"), 4.0, 8000);
        let input = dir.path().join("sw_007.wav");
        write_test_wav(&input, 1.0, 8000);
        let config = test_config();
        let mut rng = StdRng::seed_from_u64(7);

        let written = augment_file(
            &input,
            dir.path(),
            &config,
            &[],
            None,
            Some(&pool),
            &EBR_SET,
            &mut rng,
        )
        .unwrap();

        assert_eq!(written.len(), EBR_SET.len());
        assert!(dir.path().join("sw_007_mix-12.wav").is_file());
        assert!(dir.path().join("sw_007_mix0.wav").is_file());
        assert!(dir.path().join("sw_007_mix12.wav").is_file());

        // Mixes are shaped to the fixed analysis length
        let reader = hound::WavReader::open(dir.path().join("sw_007_mix0.wav")).unwrap();
        assert_eq!(
            reader.len() as usize,
            config.max_length_samples()
        );
    }

    #[test]
    fn test_augment_empty_pool_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let pool = dir.path().join("pool");
        std::fs::create_dir(&pool).unwrap();
        let input = dir.path().join("sw_007.wav");
        write_test_wav(&input, 1.0, 8000);
        let config = test_config();
        let mut rng = StdRng::seed_from_u64(7);

        let result = augment_file(
            &input,
            dir.path(),
            &config,
            &[],
            None,
            Some(&pool),
            &[0.0],
            &mut rng,
        );
        assert!(result.is_err());
    }
}
