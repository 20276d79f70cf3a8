//! Flock configuration: every tunable the simulation reads.
//!
//! Defaults reproduce the installation scene: 40 birds in a 1000 × 1000 × 800
//! box, two roosts, and a centerpiece obstacle.  Applications usually start
//! from `FlockConfig::default()` and override a handful of fields, or load a
//! JSON file with the `serde` feature.

use crate::{RoostError, RoostResult, WorldBounds};

/// Largest accepted wall half-extent, in world units.
pub const MAX_WORLD_EXTENT: f32 = 1.0e6;

/// Top-level simulation configuration.
///
/// Distances are in world (steering) units unless a field says otherwise;
/// world space is render space multiplied by `render_scale`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlockConfig {
    /// Master RNG seed.  The same seed and configuration replay identically.
    pub seed: u64,

    /// Number of birds spawned by the default layout.
    pub bird_count: usize,

    /// World units per render unit.
    pub render_scale: f32,

    /// Box the birds are pushed back into.
    pub world_bounds: WorldBounds,

    /// Accumulate the six wall pushes every frame.
    pub avoid_walls: bool,

    /// Multiplier applied to every wall push.
    pub wall_avoidance_weight: f32,

    /// Velocity magnitude cap applied at integration.
    pub max_speed: f32,

    /// Magnitude cap for the alignment and cohesion steers.
    pub max_steer_force: f32,

    /// Neighbors further than this are ignored by flocking.
    pub neighborhood_radius: f32,

    /// Per-frame probability that a bird runs its flocking pass at all.
    pub flocking_rate: f32,

    /// Per-neighbor, per-evaluation probability that a neighbor is counted.
    pub neighbor_sample_rate: f32,

    /// Roost attraction is active inside this distance.
    pub roost_attraction_radius: f32,

    /// Roost attraction constant `k` in `k / distance`.
    pub roost_attraction_strength: f32,

    /// Capture radius of a roost for the rest test, in render units.
    pub rest_threshold: f32,

    /// Obstacle repulsion is active inside this distance.
    pub obstacle_repulsion_radius: f32,

    pub obstacle_repulsion_strength: f32,

    /// Pointer repulsion is active inside this distance.
    pub pointer_repulsion_radius: f32,

    pub pointer_repulsion_strength: f32,

    /// Seconds a disturbance keeps a bird alert.
    pub disturb_duration_secs: f32,

    /// Half-width of the uniform spawn jitter around a roost, in world units.
    pub spawn_jitter: f32,

    /// Call `FlockObserver::on_snapshot` every N frames.  0 disables snapshots.
    pub snapshot_interval_frames: u64,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            seed:                        42,
            bird_count:                  40,
            render_scale:                300.0,
            world_bounds:                WorldBounds::default(),
            avoid_walls:                 true,
            wall_avoidance_weight:       5.0,
            max_speed:                   5.0,
            max_steer_force:             0.1,
            neighborhood_radius:         200.0,
            flocking_rate:               0.5,
            neighbor_sample_rate:        0.6,
            roost_attraction_radius:     700.0,
            roost_attraction_strength:   0.1,
            rest_threshold:              0.3,
            obstacle_repulsion_radius:   340.0,
            obstacle_repulsion_strength: 3.0,
            pointer_repulsion_radius:    300.0,
            pointer_repulsion_strength:  3.0,
            disturb_duration_secs:       1.0,
            spawn_jitter:                30.0,
            snapshot_interval_frames:    1,
        }
    }
}

impl FlockConfig {
    /// Reject values the simulation cannot run with.
    ///
    /// Checked by the flock builder and by `FlockManager::set_config`; `step`
    /// assumes a valid config.
    pub fn validate(&self) -> RoostResult<()> {
        positive("render_scale", self.render_scale)?;
        positive("world_bounds.width", self.world_bounds.width)?;
        positive("world_bounds.height", self.world_bounds.height)?;
        positive("world_bounds.depth", self.world_bounds.depth)?;
        positive("max_speed", self.max_speed)?;
        positive("disturb_duration_secs", self.disturb_duration_secs)?;

        non_negative("wall_avoidance_weight", self.wall_avoidance_weight)?;
        non_negative("max_steer_force", self.max_steer_force)?;
        non_negative("neighborhood_radius", self.neighborhood_radius)?;
        non_negative("roost_attraction_radius", self.roost_attraction_radius)?;
        non_negative("roost_attraction_strength", self.roost_attraction_strength)?;
        non_negative("rest_threshold", self.rest_threshold)?;
        non_negative("obstacle_repulsion_radius", self.obstacle_repulsion_radius)?;
        non_negative("obstacle_repulsion_strength", self.obstacle_repulsion_strength)?;
        non_negative("pointer_repulsion_radius", self.pointer_repulsion_radius)?;
        non_negative("pointer_repulsion_strength", self.pointer_repulsion_strength)?;
        non_negative("spawn_jitter", self.spawn_jitter)?;

        let extents = self.world_bounds.half_extents();
        at_most("world_bounds.width", extents.x, MAX_WORLD_EXTENT)?;
        at_most("world_bounds.height", extents.y, MAX_WORLD_EXTENT)?;
        at_most("world_bounds.depth", extents.z, MAX_WORLD_EXTENT)?;
        // Jitter wider than the box would only spawn birds outside it.
        at_most("spawn_jitter", self.spawn_jitter, extents.max_element())?;

        unit_rate("flocking_rate", self.flocking_rate)?;
        unit_rate("neighbor_sample_rate", self.neighbor_sample_rate)?;
        Ok(())
    }

    /// Convert a world-space point to render space.
    #[inline]
    pub fn to_render(&self, world: glam::Vec3) -> glam::Vec3 {
        world / self.render_scale
    }

    /// Convert a render-space point to world space.
    #[inline]
    pub fn to_world(&self, render: glam::Vec3) -> glam::Vec3 {
        render * self.render_scale
    }
}

fn positive(name: &str, value: f32) -> RoostResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RoostError::Config(format!("{name} must be finite and > 0, got {value}")))
    }
}

fn non_negative(name: &str, value: f32) -> RoostResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RoostError::Config(format!("{name} must be finite and >= 0, got {value}")))
    }
}

fn unit_rate(name: &str, value: f32) -> RoostResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(RoostError::Config(format!("{name} must be within [0, 1], got {value}")))
    }
}

fn at_most(name: &str, value: f32, max: f32) -> RoostResult<()> {
    if value <= max {
        Ok(())
    } else {
        Err(RoostError::Config(format!("{name} must be <= {max}, got {value}")))
    }
}
