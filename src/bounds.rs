//! Boundary clamping and resize constraint policy.
//!
//! Committed drag positions are clamped so the object's bounding box stays
//! inside the page container; resize arithmetic floors each dimension at the
//! minimum object size and compensates the origin from the *clamped* size
//! change so the opposite edge never drifts. Rotation is normalized into
//! `[0, 360)` on commit.

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

use crate::consts::MIN_OBJECT_SIZE;
use crate::geom::Size;

/// Clamp a single position axis to `[0, container - size]`.
///
/// When the object is larger than the container on this axis the range is
/// empty; the lower bound wins and the axis pins to 0.
#[must_use]
pub fn clamp_axis(value: f64, size: f64, container: f64) -> f64 {
    value.clamp(0.0, (container - size).max(0.0))
}

/// Clamp a candidate position so the bounding box stays inside `container`.
#[must_use]
pub fn clamp_position(x: f64, y: f64, width: f64, height: f64, container: Size) -> (f64, f64) {
    (
        clamp_axis(x, width, container.width),
        clamp_axis(y, height, container.height),
    )
}

/// Outcome of resizing one axis: the clamped size and the origin shift that
/// keeps the opposite edge fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisResize {
    /// New size for the axis, floored at [`MIN_OBJECT_SIZE`].
    pub size: f64,
    /// Offset to add to the origin. Zero unless the dragged handle is on the
    /// leading (west/north) edge.
    pub shift: f64,
}

/// Resize one axis by a signed growth request.
///
/// `growth` is positive when the gesture grows the object. When
/// `moves_origin` is set (west/north handles) the origin shifts by the
/// negated *actual* size change — computed after the minimum-size floor, so
/// the fixed edge stays put even while the pointer keeps traveling past the
/// minimum.
#[must_use]
pub fn resize_axis(orig_size: f64, growth: f64, moves_origin: bool) -> AxisResize {
    let size = (orig_size + growth).max(MIN_OBJECT_SIZE);
    let shift = if moves_origin { orig_size - size } else { 0.0 };
    AxisResize { size, shift }
}

/// Normalize a rotation in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_deg(rotation: f64) -> f64 {
    rotation.rem_euclid(360.0)
}
