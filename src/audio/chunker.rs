//! Fixed-window chunking of long recordings.
//!
//! Detection operates on consecutive non-overlapping windows. Absolute
//! timestamps downstream are reconstructed purely from the chunk index,
//! so the index-to-offset mapping here is load-bearing.

use crate::audio::Waveform;

/// A fixed-window slice of a parent waveform.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Samples for this window; the final chunk may be shorter.
    pub samples: Vec<f32>,
    /// Position of this window within the parent, starting at 0.
    pub index: usize,
    /// Start offset in seconds (`index * window_seconds`).
    pub start_offset: f32,
}

/// Split a waveform into consecutive non-overlapping fixed windows.
///
/// A waveform no longer than one window yields exactly one chunk covering
/// the whole waveform at offset 0. Otherwise chunk `i` covers samples
/// `[i * window * rate, (i + 1) * window * rate)`; the final chunk keeps
/// whatever remains and is NOT padded here.
pub fn chunk_waveform(waveform: &Waveform, window_seconds: f32) -> Vec<Chunk> {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let window_samples = (window_seconds * waveform.sample_rate as f32) as usize;

    if window_samples == 0 {
        return Vec::new();
    }

    let samples = &waveform.samples;
    if samples.len() <= window_samples {
        return vec![Chunk {
            samples: samples.clone(),
            index: 0,
            start_offset: 0.0,
        }];
    }

    let mut chunks = Vec::with_capacity(samples.len().div_ceil(window_samples));
    let mut pos = 0;
    let mut index = 0;

    while pos < samples.len() {
        let end = (pos + window_samples).min(samples.len());

        #[allow(clippy::cast_precision_loss)]
        let start_offset = index as f32 * window_seconds;

        chunks.push(Chunk {
            samples: samples[pos..end].to_vec(),
            index,
            start_offset,
        });

        pos = end;
        index += 1;
    }

    chunks
}
