//! `roost-core` — foundational types for the `roost` flocking simulation.
//!
//! This crate is a dependency of every other `roost-*` crate.  It has no
//! `roost-*` dependencies and few external ones (`glam`, `rand`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `BirdId`, `RoostId`                                       |
//! | [`math`]    | guarded distance, length limiting, clamped `asin`         |
//! | [`bounds`]  | `WorldBounds` and the six-wall push                       |
//! | [`time`]    | `Frame`, `FrameClock`, delta-time sanitizing              |
//! | [`rng`]     | `BirdRng` (per-bird), `FlockRng` (flock-level)            |
//! | [`config`]  | `FlockConfig` — every tunable, with scene defaults        |
//! | [`error`]   | `RoostError`, `RoostResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod bounds;
pub mod config;
pub mod error;
pub mod ids;
pub mod math;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use bounds::WorldBounds;
pub use config::FlockConfig;
pub use error::{RoostError, RoostResult};
pub use glam::Vec3;
pub use ids::{BirdId, RoostId};
pub use rng::{BirdRng, FlockRng};
pub use time::{Frame, FrameClock, sanitize_dt};
