//! CLI argument validators.
//!
//! Shared validation functions for CLI argument parsing.

use crate::augment::AugmentKind;

/// Parse and validate a detection threshold (0.0-1.0).
pub fn parse_threshold(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(0.0..=1.0).contains(&value) {
        return Err(format!(
            "threshold must be between 0.0 and 1.0, got {value}"
        ));
    }

    Ok(value)
}

/// Parse an augmentation kind name.
pub fn parse_augment_kind(s: &str) -> Result<AugmentKind, String> {
    s.parse()
}
