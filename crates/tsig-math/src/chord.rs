//! Angular pitch of a straight tile laid against a curved surface.

/// Relative slack allowed when counting how many steps cover a span, so that
/// a span that is an exact multiple of the step is not rounded up by float noise.
pub const STEP_TOLERANCE: f64 = 1e-9;

/// The angle subtended by a chord of length `size` on a circle of `radius`:
/// `2·asin(size / 2r)`.
///
/// Returns `None` when the chord cannot exist on that circle (non-positive or
/// non-finite inputs, or `size >= 2·radius`), instead of letting `asin`
/// produce NaN.
#[must_use]
pub fn chord_angle(size: f64, radius: f64) -> Option<f64> {
    if !size.is_finite() || !radius.is_finite() || size <= 0.0 || radius <= 0.0 {
        return None;
    }
    let half = size / (2.0 * radius);
    if half >= 1.0 {
        return None;
    }
    Some(2.0 * half.asin())
}

/// Number of `step`-sized increments needed to cover `span` (at least one).
#[must_use]
pub fn step_count(span: f64, step: f64) -> usize {
    let ratio = span / step;
    let count = (ratio - ratio.abs() * STEP_TOLERANCE).ceil();
    if count.is_finite() && count >= 1.0 {
        count as usize
    } else {
        1
    }
}
