//! Boids social forces: alignment, cohesion, separation.
//!
//! Neighbors are any agents with `0 < distance ≤ neighborhood_radius`; the
//! agent itself is excluded by the zero distance, so callers pass the whole
//! flock.  Every evaluation re-rolls, per neighbor, whether that neighbor is
//! counted at all (`sample_rate`), so the three forces in one frame generally
//! see different subsets.  The roll happens before the distance test.

use glam::Vec3;
use roost_core::BirdRng;
use roost_core::math::limit_length;

use crate::SteeringAgent;

impl SteeringAgent {
    #[inline]
    fn is_neighbor(&self, other: &SteeringAgent) -> Option<f32> {
        let distance = other.position.distance(self.position);
        (distance > 0.0 && distance <= self.neighborhood_radius).then_some(distance)
    }

    /// Mean velocity of the sampled neighbors, capped at `max_steer_force`.
    /// Zero if no neighbor was counted.
    pub fn alignment(&self, flock: &[SteeringAgent], rng: &mut BirdRng, sample_rate: f32) -> Vec3 {
        let mut vel_sum = Vec3::ZERO;
        let mut count = 0u32;

        for other in flock {
            if !rng.accept(sample_rate) {
                continue;
            }
            if self.is_neighbor(other).is_some() {
                vel_sum += other.velocity;
                count += 1;
            }
        }

        if count == 0 {
            return Vec3::ZERO;
        }
        limit_length(vel_sum / count as f32, self.max_steer_force)
    }

    /// Steer from `position` toward the mean position of the sampled
    /// neighbors, capped at `max_steer_force`.
    ///
    /// With no neighbor counted the centroid is the origin, so a lone bird
    /// drifts back toward the middle of the world.
    pub fn cohesion(&self, flock: &[SteeringAgent], rng: &mut BirdRng, sample_rate: f32) -> Vec3 {
        let mut pos_sum = Vec3::ZERO;
        let mut count = 0u32;

        for other in flock {
            if !rng.accept(sample_rate) {
                continue;
            }
            if self.is_neighbor(other).is_some() {
                pos_sum += other.position;
                count += 1;
            }
        }

        if count > 0 {
            pos_sum /= count as f32;
        }
        limit_length(pos_sum - self.position, self.max_steer_force)
    }

    /// Sum over sampled neighbors of the unit vector away from each,
    /// divided by its distance.  Not capped.
    pub fn separation(&self, flock: &[SteeringAgent], rng: &mut BirdRng, sample_rate: f32) -> Vec3 {
        let mut push = Vec3::ZERO;

        for other in flock {
            if !rng.accept(sample_rate) {
                continue;
            }
            if let Some(distance) = self.is_neighbor(other) {
                // distance > 0, so the offset is non-zero.
                push += (self.position - other.position) / (distance * distance);
            }
        }

        push
    }

    /// Alignment + cohesion + separation, or zero while resting.
    pub fn flocking_force(&self, flock: &[SteeringAgent], rng: &mut BirdRng, sample_rate: f32) -> Vec3 {
        if self.resting {
            return Vec3::ZERO;
        }
        self.alignment(flock, rng, sample_rate)
            + self.cohesion(flock, rng, sample_rate)
            + self.separation(flock, rng, sample_rate)
    }

    pub fn accumulate_flocking(&mut self, flock: &[SteeringAgent], rng: &mut BirdRng, sample_rate: f32) {
        let force = self.flocking_force(flock, rng, sample_rate);
        self.apply_force(force);
    }
}
