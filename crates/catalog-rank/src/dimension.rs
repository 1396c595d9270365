//! Numeric proximity between requested and catalog measurements.

use catalog_core::types::{Dimension, Dimensions};
use tracing::trace;

/// Relative difference at which a dimension stops contributing.
pub const MAX_PERCENT_DIFFERENCE: f64 = 0.5;

/// Linear proximity in `[0, 1]`, or `None` when `actual` cannot be scored.
///
/// Absent and zero measurements are excluded rather than scored as zero, as is
/// any pair whose relative difference is not a finite number.
pub fn proximity(target: f64, actual: Option<f64>) -> Option<f64> {
    let actual = actual.filter(|a| *a != 0.0)?;
    let denominator = target.max(actual);
    if !(denominator > 0.0) {
        return None;
    }
    let percent_diff = (target - actual).abs() / denominator;
    if !percent_diff.is_finite() {
        return None;
    }
    Some((1.0 - percent_diff / MAX_PERCENT_DIFFERENCE).max(0.0))
}

/// Aggregate proximity over every requested dimension.
///
/// `sum * found / requested²`: matching one of four requested dimensions keeps
/// a sixteenth of its proximity.
pub fn dimensional_score(targets: &Dimensions, actual: &Dimensions) -> f64 {
    let requested = targets.count();
    if requested == 0 {
        return 0.0;
    }
    let mut total = 0.0;
    let mut found = 0usize;
    for (dimension, target) in targets.iter() {
        match proximity(target, actual.get(dimension)) {
            Some(score) => {
                total += score;
                found += 1;
            }
            None => trace_unscored(dimension, target, actual.get(dimension)),
        }
    }
    if found == 0 {
        return 0.0;
    }
    total * (found as f64 / (requested * requested) as f64)
}

fn trace_unscored(dimension: Dimension, target: f64, actual: Option<f64>) {
    trace!(%dimension, target, ?actual, "dimension not scored for candidate");
}
