//! Deterministic per-bird and flock-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each bird gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (bird_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive bird IDs uniformly across the seed space.
//! This means:
//!
//! - Birds never share RNG state, so the gather phase can run on any number
//!   of threads without changing which random numbers a bird sees.
//! - Neighbor sampling, the flocking throttle, spawn jitter and the idle-bob
//!   factor all draw from the owning bird's stream; a fixed seed replays a
//!   run exactly.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::BirdId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── BirdRng ───────────────────────────────────────────────────────────────────

/// Per-bird deterministic RNG.
///
/// Created once per bird by the flock builder and stored in a parallel
/// `Vec<BirdRng>` next to the steering agents.  Each gather worker holds
/// exclusive access to the slice element it was handed.
#[derive(Clone, Debug)]
pub struct BirdRng(SmallRng);

impl BirdRng {
    /// Seed deterministically from the run's global seed and a bird ID.
    pub fn new(global_seed: u64, bird: BirdId) -> Self {
        let seed = global_seed ^ (bird.0 as u64).wrapping_mul(MIXING_CONSTANT);
        BirdRng(SmallRng::seed_from_u64(seed))
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// `true` with probability `rate` (clamped to [0, 1]).
    ///
    /// A rate of exactly `1.0` always accepts and `0.0` always rejects, which
    /// is what tests rely on to make sampling deterministic.
    #[inline]
    pub fn accept(&mut self, rate: f32) -> bool {
        self.0.gen_bool((rate as f64).clamp(0.0, 1.0))
    }

    /// A vector with each component uniform in `[-half_extent, half_extent]`.
    #[inline]
    pub fn symmetric_vec3(&mut self, half_extent: f32) -> Vec3 {
        let h = half_extent.abs();
        Vec3::new(
            self.0.gen_range(-h..=h),
            self.0.gen_range(-h..=h),
            self.0.gen_range(-h..=h),
        )
    }

    /// An angle uniform in `[0, 2π)`.
    #[inline]
    pub fn angle(&mut self) -> f32 {
        self.0.gen_range(0.0..std::f32::consts::TAU)
    }
}

// ── FlockRng ──────────────────────────────────────────────────────────────────

/// Flock-level RNG for operations that do not belong to a single bird
/// (e.g. the demo's synthetic pointer path).
///
/// Used only from the single-threaded apply phase or the host loop.
#[derive(Clone, Debug)]
pub struct FlockRng(SmallRng);

impl FlockRng {
    pub fn new(seed: u64) -> Self {
        FlockRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `FlockRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> FlockRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        FlockRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
