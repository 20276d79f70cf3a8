//! Per-bird physical state: position, velocity, and the frame's accumulated
//! acceleration.

use glam::Vec3;
use roost_core::math::limit_length;
use roost_core::{FlockConfig, WorldBounds};

use crate::Orientation;

/// The steering body of one bird.
///
/// Forces are accumulated into `acceleration` during a frame and consumed by
/// [`integrate`](Self::integrate).  While `resting` is set, integration is
/// skipped entirely and the frame's forces are dropped with
/// [`clear_acceleration`](Self::clear_acceleration).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SteeringAgent {
    pub position: Vec3,
    pub velocity: Vec3,

    /// Write-accumulate-only within a frame; zero at frame end.
    pub acceleration: Vec3,

    pub max_speed: f32,
    pub max_steer_force: f32,
    pub neighborhood_radius: f32,

    /// Box the wall pushes keep the bird inside.
    pub bounds: WorldBounds,
    pub avoid_walls: bool,
    pub wall_avoidance_weight: f32,

    /// Set at the start of every frame from the bird's behavior state.
    pub resting: bool,

    /// Last orientation derived from a non-zero velocity.
    pub heading: Orientation,
}

impl SteeringAgent {
    /// Create an agent at `position` moving with `velocity`, taking every
    /// steering limit from `config`.
    pub fn new(position: Vec3, velocity: Vec3, config: &FlockConfig) -> Self {
        let mut agent = Self {
            position,
            velocity,
            acceleration:          Vec3::ZERO,
            max_speed:             0.0,
            max_steer_force:       0.0,
            neighborhood_radius:   0.0,
            bounds:                WorldBounds::default(),
            avoid_walls:           false,
            wall_avoidance_weight: 0.0,
            resting:               false,
            heading:               Orientation::default(),
        };
        agent.apply_limits(config);
        agent.update_orientation();
        agent
    }

    /// Copy the steering limits and wall settings out of `config`.
    ///
    /// Position, velocity and heading are left alone, so a running flock can
    /// take a new configuration between frames.
    pub fn apply_limits(&mut self, config: &FlockConfig) {
        self.max_speed             = config.max_speed;
        self.max_steer_force       = config.max_steer_force;
        self.neighborhood_radius   = config.neighborhood_radius;
        self.bounds                = config.world_bounds;
        self.avoid_walls           = config.avoid_walls;
        self.wall_avoidance_weight = config.wall_avoidance_weight;
    }

    /// Add `force` to this frame's acceleration.
    #[inline]
    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force;
    }

    /// Advance one frame: `velocity += acceleration`, cap the speed at
    /// `max_speed`, `position += velocity`, then zero the acceleration.
    ///
    /// Does nothing while `resting`.
    pub fn integrate(&mut self) {
        if self.resting {
            return;
        }
        self.velocity = limit_length(self.velocity + self.acceleration, self.max_speed);
        self.position += self.velocity;
        self.acceleration = Vec3::ZERO;
    }

    /// Drop the forces gathered this frame without moving.
    #[inline]
    pub fn clear_acceleration(&mut self) {
        self.acceleration = Vec3::ZERO;
    }

    /// Orientation of the current velocity, or `None` if it is (near) zero.
    #[inline]
    pub fn orientation(&self) -> Option<Orientation> {
        Orientation::from_velocity(self.velocity)
    }

    /// Refresh `heading` from the current velocity.
    ///
    /// A zero-length velocity keeps the previous heading.  Returns the
    /// heading now in effect.
    pub fn update_orientation(&mut self) -> Orientation {
        if let Some(o) = self.orientation() {
            self.heading = o;
        }
        self.heading
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}
