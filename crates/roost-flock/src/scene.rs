//! Static scene geometry the flock reacts to: roosts and the obstacle.

use glam::Vec3;
use roost_core::{FlockConfig, RoostId};

/// A tree the birds are drawn to and settle in.
///
/// Authored in render space; attraction uses the world-space image
/// (`position · render_scale`), the rest test uses `position` directly.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roost {
    pub position: Vec3,
}

impl Roost {
    #[inline]
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    #[inline]
    pub fn world_position(&self, config: &FlockConfig) -> Vec3 {
        config.to_world(self.position)
    }
}

/// A fixed point the birds steer around.  World space.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub position: Vec3,
    /// Repulsion is active strictly inside this distance.
    pub radius:   f32,
    pub strength: f32,
}

/// Roosts and the optional obstacle of one scene.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneLayout {
    pub roosts:   Vec<Roost>,
    pub obstacle: Option<Obstacle>,
}

impl SceneLayout {
    /// Render-space positions of the two trees in the installation scene.
    pub const INSTALLATION_ROOSTS: [Vec3; 2] = [
        Vec3::new(-1.3, 0.6, -0.7),
        Vec3::new(0.5, 0.9, 1.4),
    ];

    /// World-space position of the centerpiece.
    ///
    /// Deliberately unscaled: the centerpiece sits just above the world
    /// origin, inside the birds' coordinate frame.
    pub const INSTALLATION_OBSTACLE: Vec3 = Vec3::new(0.0, 0.4, 0.0);

    pub fn new(roosts: Vec<Roost>, obstacle: Option<Obstacle>) -> Self {
        Self { roosts, obstacle }
    }

    /// Two trees and the centerpiece, with the obstacle tuned from `config`.
    pub fn installation(config: &FlockConfig) -> Self {
        Self {
            roosts:   Self::INSTALLATION_ROOSTS.iter().copied().map(Roost::new).collect(),
            obstacle: Some(Obstacle {
                position: Self::INSTALLATION_OBSTACLE,
                radius:   config.obstacle_repulsion_radius,
                strength: config.obstacle_repulsion_strength,
            }),
        }
    }

    /// `(RoostId, &Roost)` pairs in id order.
    pub fn roosts_with_ids(&self) -> impl Iterator<Item = (RoostId, &Roost)> {
        self.roosts
            .iter()
            .enumerate()
            .map(|(i, r)| (RoostId(i as u16), r))
    }
}
