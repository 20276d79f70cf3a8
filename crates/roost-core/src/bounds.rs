//! Axis-aligned world bounds and the inverse-distance wall push.

use glam::Vec3;

use crate::math::MIN_DISTANCE;

/// Half-extents of the box birds are kept inside.
///
/// The walls sit at `±width`, `±height` and `±depth` on the x, y and z axes,
/// so the box is `2·width` wide.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldBounds {
    pub width:  f32,
    pub height: f32,
    pub depth:  f32,
}

impl WorldBounds {
    #[inline]
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self { width, height, depth }
    }

    /// Half-extents as a vector `(width, height, depth)`.
    #[inline]
    pub fn half_extents(self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth)
    }

    /// Sum of the pushes away from all six walls.
    ///
    /// For each wall the virtual target is `p` projected onto that wall, and
    /// the push is `(p − target) / |p − target|²`, i.e. `1 / d` along the axis
    /// where `d` is the signed distance to the wall measured inward.  The
    /// push is not normalized: it only becomes large very close to a wall.
    ///
    /// `|d|` is clamped below at [`MIN_DISTANCE`], with `d = 0` treated as
    /// just inside, so a point exactly on a wall is pushed inward.
    pub fn wall_push(self, p: Vec3) -> Vec3 {
        let half = self.half_extents();
        let mut push = Vec3::ZERO;
        for axis in 0..3 {
            let lower = inward_push(p[axis] + half[axis]);
            let upper = inward_push(half[axis] - p[axis]);
            push[axis] = lower - upper;
        }
        push
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::new(500.0, 500.0, 400.0)
    }
}

/// `1 / d` for an inward signed distance `d` with the magnitude clamped.
#[inline]
fn inward_push(d: f32) -> f32 {
    // Both zeros count as inside; -0.0 == 0.0 here.
    let d = if d == 0.0 {
        MIN_DISTANCE
    } else if d.abs() < MIN_DISTANCE {
        MIN_DISTANCE.copysign(d)
    } else {
        d
    };
    1.0 / d
}
