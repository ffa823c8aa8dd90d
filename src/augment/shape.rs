//! Fixed-length shaping of waveforms.
//!
//! Clips are cropped or zero-padded to the configured analysis length
//! before extraction and before mixing. Inference always pads with a
//! symmetric split; the random split is reserved for previewing what the
//! training-time pipeline produces.

use rand::Rng;

/// Crop or zero-pad `samples` to exactly `target` samples.
///
/// Longer input keeps the leading samples; shorter input is centered
/// between zero runs, with the odd sample going to the right.
#[must_use]
pub fn to_fixed_length(samples: &[f32], target: usize) -> Vec<f32> {
    match samples.len().cmp(&target) {
        std::cmp::Ordering::Equal => samples.to_vec(),
        std::cmp::Ordering::Greater => samples[..target].to_vec(),
        std::cmp::Ordering::Less => {
            let pad = target - samples.len();
            padded(samples, pad / 2, target)
        }
    }
}

/// Like [`to_fixed_length`] but with a randomized left/right padding split.
#[must_use]
pub fn to_fixed_length_random(samples: &[f32], target: usize, rng: &mut impl Rng) -> Vec<f32> {
    if samples.len() >= target {
        return to_fixed_length(samples, target);
    }
    let pad = target - samples.len();
    padded(samples, rng.gen_range(0..=pad), target)
}

fn padded(samples: &[f32], left: usize, target: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; target];
    out[left..left + samples.len()].copy_from_slice(samples);
    out
}
