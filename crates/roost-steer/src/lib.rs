//! `roost-steer` — the physical side of a bird.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`agent`]       | `SteeringAgent` — position, velocity, acceleration, limits |
//! | [`forces`]      | wall avoidance, attraction, repulsion                      |
//! | [`flocking`]    | alignment, cohesion, separation with neighbor sampling     |
//! | [`orientation`] | `Orientation` — yaw/pitch from velocity                    |
//!
//! # Force model
//!
//! A frame accumulates forces into `acceleration` and then integrates once:
//!
//! ```text
//! velocity += acceleration        (capped at max_speed)
//! position += velocity
//! acceleration = 0
//! ```
//!
//! Force methods never mutate other agents.  Each has a pure `*_force`
//! form so the flock can gather every bird's forces against a frozen view
//! before any bird moves.

pub mod agent;
pub mod flocking;
pub mod forces;
pub mod orientation;


pub use agent::SteeringAgent;
pub use orientation::Orientation;
