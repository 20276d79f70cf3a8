//! Per-frame animation outputs: wing pose, idle bob, and color tint.
//!
//! Values are in the bird model's own units (the mesh is ~10 units long
//! before the renderer scales it down).

use glam::Vec3;
use roost_core::math::wrap_angle;

use crate::BehaviorState;

/// Peak wingtip height while flapping.
pub const WING_AMPLITUDE: f32 = 5.0;
/// Lateral wingtip offset while flapping (`±`).
pub const WING_SPREAD: f32 = 6.0;
/// Wingtip height with wings folded.
pub const FOLDED_WING_HEIGHT: f32 = 5.0;
/// Phase advance per frame on top of the turn rate.
pub const WINGBEAT_BASE_RATE: f32 = 0.1;

pub const BOB_AMPLITUDE: f32 = 4.0;
pub const BOB_FREQUENCY: f32 = 0.5;
/// Frequency of the slow envelope that makes the bob look sporadic.
pub const BOB_ENVELOPE_FREQUENCY: f32 = 1.0;

/// Geometry offsets the renderer applies to the bird mesh.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WingPose {
    /// Height of both wingtips.
    pub wingtip_height: f32,
    /// Lateral wingtip offset; `0` when folded.
    pub wingtip_spread: f32,
    /// Vertical head offset; non-zero only while resting.
    pub head_bob: f32,
}

impl WingPose {
    /// Wings out, tips at `sin(phase) · WING_AMPLITUDE`.
    #[inline]
    pub fn spread(phase: f32) -> Self {
        Self {
            wingtip_height: phase.sin() * WING_AMPLITUDE,
            wingtip_spread: WING_SPREAD,
            head_bob:       0.0,
        }
    }

    /// Wings folded back, head bobbing by `head_bob`.
    #[inline]
    pub fn folded(head_bob: f32) -> Self {
        Self {
            wingtip_height: FOLDED_WING_HEIGHT,
            wingtip_spread: 0.0,
            head_bob,
        }
    }
}

/// Idle head bob at time `t` seconds.
///
/// `BOB_AMPLITUDE · sin(BOB_FREQUENCY · t · factor) · cos(t)`.  The per-bird
/// `factor` and the second cosine keep the motion from looking periodic or
/// synchronized across the flock.
#[inline]
pub fn idle_bob(t: f32, factor: f32) -> f32 {
    BOB_AMPLITUDE * (BOB_FREQUENCY * t * factor).sin() * (BOB_ENVELOPE_FREQUENCY * t).cos()
}

/// Cosmetic gray level from a render-space position: `(z − x + 2) / 4`.
///
/// Not clamped; the renderer saturates.
#[inline]
pub fn color_factor(render_position: Vec3) -> f32 {
    (render_position.z - render_position.x + 2.0) / 4.0
}

impl BehaviorState {
    /// Refresh the animation outputs for this frame.
    ///
    /// Resting birds keep their wing phase and fold their wings; everyone
    /// else advances the phase by `max(0, turn_rate) + WINGBEAT_BASE_RATE`,
    /// so climbing birds flap faster.  The color tint follows position
    /// regardless of state.
    pub fn animate(&mut self, turn_rate: f32, time_secs: f32, render_position: Vec3) {
        self.pose = if self.is_resting() {
            WingPose::folded(idle_bob(time_secs, self.bob_factor))
        } else {
            self.wing_phase = wrap_angle(self.wing_phase + turn_rate.max(0.0) + WINGBEAT_BASE_RATE);
            WingPose::spread(self.wing_phase)
        };
        self.color_factor = color_factor(render_position);
    }

    #[inline]
    pub fn wing_phase(&self) -> f32 {
        self.wing_phase
    }

    #[inline]
    pub fn bob_factor(&self) -> f32 {
        self.bob_factor
    }

    #[inline]
    pub fn color_factor(&self) -> f32 {
        self.color_factor
    }

    #[inline]
    pub fn pose(&self) -> WingPose {
        self.pose
    }
}
