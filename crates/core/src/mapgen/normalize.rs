//! Rescaling of raw elevations into `[0, 1]`.

use crate::grid::Grid;

/// Output for every cell when the raw field has no relief (`min == max`).
pub const FLAT_FIELD_HEIGHT: f32 = 0.0;

/// Inverse-lerps every cell between the global minimum and maximum, clamped to `[0, 1]`.
///
/// A perfectly flat field maps entirely to [`FLAT_FIELD_HEIGHT`] instead of dividing by zero.
pub fn normalize_heightfield(raw: &Grid<f32>) -> Grid<f32> {
    let (min, max) = raw
        .cells()
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), &value| {
            (low.min(f64::from(value)), high.max(f64::from(value)))
        });
    let span = max - min;
    if span.is_nan() || span <= 0.0 {
        return raw.map(|_| FLAT_FIELD_HEIGHT);
    }
    raw.map(|&value| ((f64::from(value) - min) / span).clamp(0.0, 1.0) as f32)
}
