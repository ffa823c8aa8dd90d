//! FFT window functions.

use crate::config::WindowKind;
use ndarray::Array1;
use std::f32::consts::PI;

/// Build a periodic analysis window of the given size.
///
/// Periodic (DFT-even) form: the denominator is `size`, not `size - 1`,
/// so consecutive 50%-overlapped frames tile evenly.
#[must_use]
pub fn build_window(kind: WindowKind, size: usize) -> Array1<f32> {
    #[allow(clippy::cast_precision_loss)]
    let n = size as f32;
    match kind {
        WindowKind::Hamming => Array1::from_iter((0..size).map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let x = i as f32;
            0.54 - 0.46 * (2.0 * PI * x / n).cos()
        })),
        WindowKind::Hann => Array1::from_iter((0..size).map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let x = i as f32;
            0.5 * (1.0 - (2.0 * PI * x / n).cos())
        })),
    }
}
