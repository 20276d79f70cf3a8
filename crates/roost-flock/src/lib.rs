//! `roost-flock` — frame loop orchestrator for the roost flocking simulation.
//!
//! # Two-phase frame loop
//!
//! ```text
//! step(dt):
//!   ① Gather  — for every bird, against the frame-start flock
//!               (parallel with the `parallel` feature):
//!                 resting flag ← behavior.is_resting()
//!                 walls + flocking (50% of frames) + roost attraction
//!                 + obstacle repulsion + pointer repulsion
//!   ② Apply   — for every bird in ascending BirdId order:
//!                 pointer hit → disturb
//!                 integrate (or drop the forces while resting)
//!                 heading, rest latch vs. each roost, timer, animation
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the gather phase on Rayon's thread pool.          |
//! | `serde`    | Serde derives on snapshots, scene layout and config.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use roost_core::FlockConfig;
//! use roost_flock::{FlockBuilder, NoopObserver};
//!
//! let mut flock = FlockBuilder::new(FlockConfig::default()).build()?;
//! flock.publish_pointer(Some(pointer_in_world_space));
//! let report = flock.step(1.0 / 60.0);
//! flock.run_frames(600, 1.0 / 60.0, &mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod flock;
pub mod observer;
pub mod scene;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use builder::{FlockBuilder, SpawnState};
pub use error::{FlockError, FlockResult};
pub use flock::{FlockManager, FrameReport};
pub use observer::{FlockObserver, NoopObserver};
pub use scene::{Obstacle, Roost, SceneLayout};
pub use snapshot::BirdSnapshot;
