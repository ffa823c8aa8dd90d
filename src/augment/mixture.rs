//! Background mixing at a target event-to-background ratio.

use crate::augment::shape::to_fixed_length;
use crate::constants::AUDIO_EXTENSIONS;
use crate::error::{Error, Result};
use rand::Rng;
use std::path::{Path, PathBuf};

/// Mix a background under a foreground at the requested EBR.
///
/// The background is cropped or zero-padded to the foreground's length,
/// then scaled so that `10 * log10(p_fg / p_bg)` of the scaled signals
/// equals `ebr_db`, and the two are summed sample-wise. A silent
/// foreground or background leaves the other signal unscaled.
pub fn mix_at_ebr(foreground: &[f32], background: &[f32], ebr_db: f32) -> Result<Vec<f32>> {
    if !ebr_db.is_finite() {
        return Err(Error::Augmentation {
            reason: format!("event-to-background ratio must be finite, got {ebr_db}"),
        });
    }

    let background = to_fixed_length(background, foreground.len());

    let p_fg = mean_power(foreground);
    let p_bg = mean_power(&background);

    let scale = if p_fg > 0.0 && p_bg > 0.0 {
        (p_fg / (p_bg * 10.0f32.powf(ebr_db / 10.0))).sqrt()
    } else {
        1.0
    };

    Ok(foreground
        .iter()
        .zip(&background)
        .map(|(&fg, &bg)| fg + bg * scale)
        .collect())
}

/// Mean squared amplitude.
fn mean_power(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = samples.len() as f32;
    samples.iter().map(|&s| s * s).sum::<f32>() / n
}

/// A pool of candidate background recordings.
///
/// Selection is uniform WITH replacement: each draw is independent, so a
/// small pool simply repeats clips across mixes.
#[derive(Debug)]
pub struct BackgroundPool {
    paths: Vec<PathBuf>,
}

impl BackgroundPool {
    /// Collect audio files from a directory (non-recursive).
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let entries = std::fs::read_dir(dir).map_err(|e| Error::AudioOpen {
            path: dir.to_path_buf(),
            source: Box::new(e),
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_audio_file(path))
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(Error::NoBackgroundClips {
                path: dir.to_path_buf(),
            });
        }

        Ok(Self { paths })
    }

    /// Number of candidate clips.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the pool is empty (never true for a constructed pool).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Draw one background clip path uniformly at random.
    pub fn pick(&self, rng: &mut impl Rng) -> &Path {
        &self.paths[rng.gen_range(0..self.paths.len())]
    }
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|valid| ext.eq_ignore_ascii_case(valid))
        })
}
