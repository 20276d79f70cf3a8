//! Per-bird frame output handed to renderers and observers.

use glam::Vec3;
use roost_behavior::{BehaviorState, WingPose};
use roost_core::{BirdId, FlockConfig, RoostId};
use roost_steer::{Orientation, SteeringAgent};

/// Everything a renderer needs to draw one bird for one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BirdSnapshot {
    pub id:              BirdId,
    /// Steering-space position.
    pub position:        Vec3,
    /// `position / render_scale`; where the mesh is placed.
    pub render_position: Vec3,
    pub velocity:        Vec3,
    pub heading:         Orientation,
    pub resting:         bool,
    pub disturbed:       bool,
    /// Roost holding the rest latch, even while the bird is disturbed.
    pub roost:           Option<RoostId>,
    pub pose:            WingPose,
    pub color_factor:    f32,
}

impl BirdSnapshot {
    pub(crate) fn capture(
        id:       BirdId,
        agent:    &SteeringAgent,
        behavior: &BehaviorState,
        config:   &FlockConfig,
    ) -> Self {
        Self {
            id,
            position:        agent.position,
            render_position: config.to_render(agent.position),
            velocity:        agent.velocity,
            heading:         agent.heading,
            resting:         behavior.is_resting(),
            disturbed:       behavior.is_disturbed(),
            roost:           behavior.roost(),
            pose:            behavior.pose(),
            color_factor:    behavior.color_factor(),
        }
    }
}
