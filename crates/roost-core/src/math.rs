//! Small vector helpers shared by the steering and behavior crates.
//!
//! Everything here guards the numeric degeneracies a frame can hit
//! (coincident points, zero-length vectors, `asin` drift) by clamping, so no
//! NaN ever reaches an agent's state.

use glam::Vec3;

/// Smallest distance ever used as a divisor.
pub const MIN_DISTANCE: f32 = 1.0e-3;

/// Distance between `a` and `b`, clamped below at [`MIN_DISTANCE`].
#[inline]
pub fn guarded_distance(a: Vec3, b: Vec3) -> f32 {
    a.distance(b).max(MIN_DISTANCE)
}

/// Rescale `v` to `max` if it is longer, otherwise return it unchanged.
///
/// A non-positive `max` yields the zero vector.
#[inline]
pub fn limit_length(v: Vec3, max: f32) -> Vec3 {
    if max <= 0.0 {
        return Vec3::ZERO;
    }
    let len_sq = v.length_squared();
    if len_sq <= max * max {
        return v;
    }
    v * (max / len_sq.sqrt())
}

/// `asin` with its argument clamped into `[-1, 1]`.
#[inline]
pub fn clamped_asin(x: f32) -> f32 {
    x.clamp(-1.0, 1.0).asin()
}

/// Wrap `angle` into `[0, 2π)`.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= std::f32::consts::TAU { 0.0 } else { wrapped }
}
