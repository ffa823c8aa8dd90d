//! Short-time Fourier transform.

use ndarray::{Array1, Array2};
use rustfft::{Fft, num_complex::Complex};
use std::sync::Arc;

/// Compute STFT magnitudes of a signal.
///
/// Frames of `nfft` samples at `hop` stride, windowed, transformed, and
/// reduced to the magnitude of the non-negative frequency bins. Output
/// shape is `(nfft / 2 + 1, n_frames)`; a signal shorter than one frame
/// yields zero frames.
pub fn stft_magnitudes(
    samples: &[f32],
    window: &Array1<f32>,
    fft: &Arc<dyn Fft<f32>>,
    nfft: usize,
    hop: usize,
) -> Array2<f32> {
    let n_freqs = nfft / 2 + 1;
    let n_frames = if samples.len() >= nfft {
        (samples.len() - nfft) / hop + 1
    } else {
        0
    };

    let mut magnitudes = Array2::<f32>::zeros((n_freqs, n_frames));

    // Scratch buffer reused across frames
    let mut scratch = vec![Complex::new(0.0f32, 0.0f32); fft.get_inplace_scratch_len()];

    for frame_idx in 0..n_frames {
        let start = frame_idx * hop;
        let frame = &samples[start..start + nfft];

        let mut buffer: Vec<Complex<f32>> = window
            .iter()
            .zip(frame)
            .map(|(&w, &s)| Complex::new(s * w, 0.0))
            .collect();

        fft.process_with_scratch(&mut buffer, &mut scratch);

        for (i, c) in buffer.iter().take(n_freqs).enumerate() {
            magnitudes[[i, frame_idx]] = (c.re * c.re + c.im * c.im).sqrt();
        }
    }

    magnitudes
}
