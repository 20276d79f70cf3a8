//! Environmental forces: wall containment, point attraction, point repulsion.
//!
//! Each force comes in two forms.  The `*_force` methods are pure and return
//! the contribution, which is what the flock's gather phase uses so it can
//! run against a frozen view of the flock.  The verb forms (`attract`,
//! `repulse`, …) add the contribution to `acceleration` directly.

use glam::Vec3;
use roost_core::math::guarded_distance;

use crate::SteeringAgent;

impl SteeringAgent {
    // ── Walls ─────────────────────────────────────────────────────────────

    /// Weighted push away from the six walls of `bounds`.
    ///
    /// Returns zero when `avoid_walls` is off.
    pub fn wall_avoidance_force(&self) -> Vec3 {
        if !self.avoid_walls {
            return Vec3::ZERO;
        }
        self.bounds.wall_push(self.position) * self.wall_avoidance_weight
    }

    pub fn accumulate_wall_avoidance(&mut self) {
        let force = self.wall_avoidance_force();
        self.apply_force(force);
    }

    // ── Attraction ────────────────────────────────────────────────────────

    /// Pull toward `target` of magnitude `strength`, active only while the
    /// agent is closer than `threshold`.
    ///
    /// The force is `(position − target) × (−strength / distance)`, a unit
    /// vector toward the target scaled by `strength`.
    pub fn attraction_force(&self, target: Vec3, threshold: f32, strength: f32) -> Vec3 {
        let distance = guarded_distance(self.position, target);
        if distance >= threshold {
            return Vec3::ZERO;
        }
        (self.position - target) * (-strength / distance)
    }

    pub fn attract(&mut self, target: Vec3, threshold: f32, strength: f32) {
        let force = self.attraction_force(target, threshold, strength);
        self.apply_force(force);
    }

    // ── Repulsion ─────────────────────────────────────────────────────────

    /// Push away from `target`, or `None` if the agent is at or beyond
    /// `threshold`.
    ///
    /// The force is `(position − target) × (strength / distance)`.  An agent
    /// sitting exactly on the target is inside the threshold but gets a zero
    /// push.
    pub fn repulsion_force(&self, target: Vec3, threshold: f32, strength: f32) -> Option<Vec3> {
        let distance = guarded_distance(self.position, target);
        if distance >= threshold {
            return None;
        }
        Some((self.position - target) * (strength / distance))
    }

    /// Add the repulsion from `target` and report whether it fired.
    pub fn repulse(&mut self, target: Vec3, threshold: f32, strength: f32) -> bool {
        match self.repulsion_force(target, threshold, strength) {
            Some(force) => {
                self.apply_force(force);
                true
            }
            None => false,
        }
    }
}
