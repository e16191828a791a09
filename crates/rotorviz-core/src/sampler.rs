//! Displacement sampling along the shaft.
//!
//! Mode displacement curves are stored at their own resolution, which may
//! differ from the number of shaft segments. Every view and analysis reads
//! deflections through [`sample`], which interpolates between curve points
//! by normalized axial position.

use crate::model::ModeShape;

/// Displacement of `mode` at segment `index` on a shaft of `segment_count`
/// elements.
///
/// When the curve resolution matches the segment count the element is read
/// directly. Otherwise the segment index is normalized over
/// `segment_count - 1` and the two nearest curve samples are blended
/// linearly. Out-of-range lookups contribute 0.0 rather than failing, so a
/// shorter curve or a stray index never breaks a render pass.
pub fn sample(index: usize, mode: &ModeShape, segment_count: usize) -> f64 {
    let curve = &mode.displacements;
    if curve.is_empty() {
        return 0.0;
    }
    if curve.len() == segment_count {
        return curve.get(index).copied().unwrap_or(0.0);
    }

    // A single-segment shaft has no span to normalize over; pin it to the
    // start of the curve.
    let ratio = if segment_count > 1 {
        index as f64 / (segment_count - 1) as f64
    } else {
        0.0
    };
    let d_index = ratio * (curve.len() - 1) as f64;
    let lo = d_index.floor() as usize;
    let hi = d_index.ceil() as usize;
    let w = d_index - lo as f64;
    let a = curve.get(lo).copied().unwrap_or(0.0);
    let b = curve.get(hi).copied().unwrap_or(0.0);
    a + (b - a) * w
}

/// Largest absolute displacement anywhere on the curve (0.0 when empty).
/// This is the amplitude the health evaluator converts into mils.
pub fn max_abs(mode: &ModeShape) -> f64 {
    mode.displacements.iter().fold(0.0, |acc, d| acc.max(d.abs()))
}
