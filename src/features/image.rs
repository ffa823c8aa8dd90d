//! Pixel rendering of feature tensors.
//!
//! A feature tensor becomes an 8-bit grayscale image written to the stage
//! directory, and the same pixel matrix, scaled to [0,1], becomes the
//! model input tensor. Keeping one quantization for both mirrors a
//! pipeline where the model consumes exactly what was rendered.

use crate::config::FeatureKind;
use crate::error::{Error, Result};
use crate::features::FeatureTensor;
use ndarray::{Array2, Array4};
use std::io::Write;
use std::path::Path;

/// 8-bit grayscale rendering of a feature tensor.
///
/// Row 0 is the highest frequency (image top), matching the usual
/// spectrogram display orientation.
#[derive(Debug, Clone)]
pub struct FeatureImage {
    /// Pixel values, shape `(height, width)`.
    pub pixels: Array2<u8>,
}

impl FeatureImage {
    /// Quantize a feature tensor to pixels.
    ///
    /// `spec` tensors are anchored to the fixed dB range so brightness is
    /// comparable across clips; mel-domain tensors are min-max scaled per
    /// image since their absolute scale is input-dependent.
    #[must_use]
    pub fn from_tensor(tensor: &FeatureTensor, kind: FeatureKind, dynamic_range: f32) -> Self {
        let (rows, cols) = tensor.values.dim();
        let mut pixels = Array2::<u8>::zeros((rows, cols));

        let (lo, hi) = match kind {
            FeatureKind::Spec => (-dynamic_range, 0.0),
            FeatureKind::Melspec | FeatureKind::Pcen => {
                let mut lo = f32::INFINITY;
                let mut hi = f32::NEG_INFINITY;
                for &v in &tensor.values {
                    lo = lo.min(v);
                    hi = hi.max(v);
                }
                (lo, hi)
            }
        };

        let span = hi - lo;
        if span > 0.0 && span.is_finite() {
            for ((r, c), &v) in tensor.values.indexed_iter() {
                let scaled = ((v - lo) / span * 255.0).clamp(0.0, 255.0);
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let pixel = scaled.round() as u8;
                // Flip vertically so high frequencies are at the top
                pixels[[rows - 1 - r, c]] = pixel;
            }
        }

        Self { pixels }
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    /// Write the image as binary PGM (P5).
    pub fn write_pgm(&self, path: &Path) -> Result<()> {
        let (height, width) = self.pixels.dim();
        let file = std::fs::File::create(path).map_err(|e| Error::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut writer = std::io::BufWriter::new(file);

        let write = |w: &mut std::io::BufWriter<std::fs::File>, bytes: &[u8]| {
            w.write_all(bytes).map_err(|e| Error::OutputWrite {
                path: path.to_path_buf(),
                source: e,
            })
        };

        write(&mut writer, format!("P5\n{width} {height}\n255\n").as_bytes())?;
        for row in self.pixels.rows() {
            let bytes: Vec<u8> = row.iter().copied().collect();
            write(&mut writer, &bytes)?;
        }
        writer.flush().map_err(|e| Error::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Build the normalized model input tensor.
    ///
    /// Shape `(1, height, width, channels)` with values `pixel / 255`; the
    /// grayscale plane is replicated across channels.
    #[must_use]
    pub fn to_model_input(&self, channels: usize) -> Array4<f32> {
        let (height, width) = self.pixels.dim();
        let mut input = Array4::<f32>::zeros((1, height, width, channels));
        for ((r, c), &p) in self.pixels.indexed_iter() {
            let v = f32::from(p) / 255.0;
            for ch in 0..channels {
                input[[0, r, c, ch]] = v;
            }
        }
        input
    }
}
