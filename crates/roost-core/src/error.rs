//! Crate-wide error type.
//!
//! Only construction can fail: stepping the flock clamps degenerate numeric
//! input instead of returning errors.  Sub-crates wrap `RoostError` as one
//! variant of their own enums via `#[from]`.

use thiserror::Error;

use crate::BirdId;

/// The top-level error type for `roost-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum RoostError {
    #[error("bird {0} not found")]
    BirdNotFound(BirdId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `roost-*` crates.
pub type RoostResult<T> = Result<T, RoostError>;
