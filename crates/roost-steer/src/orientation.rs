//! Yaw/pitch derived from a velocity vector.

use glam::Vec3;
use roost_core::math::clamped_asin;

/// Facing of a bird for the renderer, in radians.
///
/// `yaw` turns about the y axis (`atan2(−vz, vx)`), `pitch` tilts the nose up
/// (`asin(vy / |v|)`).  The wingbeat uses `pitch` as the bird's turn rate.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Orientation {
    pub yaw:   f32,
    pub pitch: f32,
}

impl Orientation {
    /// Below this squared speed the velocity carries no usable direction.
    const MIN_SPEED_SQ: f32 = 1.0e-12;

    /// Orientation of `velocity`, or `None` if it has (near) zero length.
    pub fn from_velocity(velocity: Vec3) -> Option<Self> {
        let len_sq = velocity.length_squared();
        if len_sq <= Self::MIN_SPEED_SQ || !len_sq.is_finite() {
            return None;
        }
        Some(Self {
            yaw:   (-velocity.z).atan2(velocity.x),
            pitch: clamped_asin(velocity.y / len_sq.sqrt()),
        })
    }
}
