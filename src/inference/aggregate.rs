//! Score aggregation: top-k selection and detection thresholding.

use crate::constants::TOP_K;

/// One scored class from a model output.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Class label.
    pub label: String,
    /// Raw model score in `[0, 1]`.
    pub confidence: f32,
    /// Class index in the model output vector.
    pub index: usize,
}

/// Select the top [`TOP_K`] classes from a score vector.
///
/// Results are ordered by descending confidence; equal scores order by
/// lower class index. Uses a partial selection rather than sorting the
/// whole vector. Returns fewer entries only when the model has fewer
/// classes than [`TOP_K`].
#[must_use]
pub fn top_predictions(scores: &[f32], labels: &[String]) -> Vec<Prediction> {
    debug_assert_eq!(scores.len(), labels.len());

    let mut indexed: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
    let by_score_desc = |a: &(usize, f32), b: &(usize, f32)| {
        b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
    };

    if indexed.len() > TOP_K {
        indexed.select_nth_unstable_by(TOP_K - 1, by_score_desc);
        indexed.truncate(TOP_K);
    }
    indexed.sort_unstable_by(by_score_desc);

    indexed
        .into_iter()
        .map(|(index, confidence)| Prediction {
            label: labels.get(index).cloned().unwrap_or_default(),
            confidence,
            index,
        })
        .collect()
}

/// Whether a detection score counts as a positive chunk.
///
/// A score exactly equal to the threshold is positive.
#[must_use]
pub fn is_positive(score: f32, threshold: f32) -> bool {
    score >= threshold
}

/// Whistle score from a detector output vector.
///
/// Detectors emit either a single sigmoid score or a no-whistle/whistle
/// pair with whistle last; both read from the final element.
#[must_use]
pub fn whistle_score(scores: &[f32]) -> Option<f32> {
    scores.last().copied()
}
