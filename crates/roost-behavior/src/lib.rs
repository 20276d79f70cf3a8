//! `roost-behavior` — what a bird is doing, as opposed to where it is.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`state`]     | `RestState`, `Disturbance`, `BehaviorEvent`, `transition`,   |
//! |               | `BehaviorState`                                              |
//! | [`animation`] | `WingPose`, idle bob, color tint, `BehaviorState::animate`   |
//!
//! # Design notes
//!
//! Behavior is a product of two small state machines rather than a set of
//! loose flags: `{Flying, Resting} × {Calm, Disturbed(timer)}`.  All changes
//! go through one pure [`transition`] function so the table can be read (and
//! tested) in one place.  The flock calls, per frame and in this order:
//! `check_rest` for each roost (only while calm), `tick(dt)`, `animate`.

pub mod animation;
pub mod state;


pub use animation::{WingPose, color_factor, idle_bob};
pub use state::{BehaviorEvent, BehaviorState, Disturbance, RestState, transition};
