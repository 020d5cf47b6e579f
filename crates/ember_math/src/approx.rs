//! Tolerant float comparison.

/// Relative tolerance used by [`approximately`].
const RELATIVE_TOLERANCE: f32 = 1e-6;

/// Absolute floor for [`approximately`], so comparisons against zero still
/// have a (tiny) window.
const ABSOLUTE_TOLERANCE: f32 = f32::MIN_POSITIVE * 8.0;

/// Returns true if `a` and `b` are equal within a relative tolerance.
///
/// The window is `1e-6 * max(|a|, |b|)`, never smaller than a few multiples
/// of the smallest normal `f32`. Against zero this is effectively an exact
/// test, which is what the rasterizer fill rule needs.
#[inline]
pub fn approximately(a: f32, b: f32) -> bool {
    let tolerance = (RELATIVE_TOLERANCE * a.abs().max(b.abs())).max(ABSOLUTE_TOLERANCE);
    (b - a).abs() < tolerance
}

/// Shorthand for `approximately(x, 0.0)`.
#[inline]
pub fn approximately_zero(x: f32) -> bool {
    approximately(x, 0.0)
}
