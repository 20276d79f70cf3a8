use roost_core::RoostError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlockError {
    #[error(transparent)]
    Core(#[from] RoostError),

    #[error("{what} length {got} does not match bird count {expected}")]
    BirdCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("scene layout has no roosts")]
    NoRoosts,

    #[error("scene layout has {0} roosts; at most {max} are addressable", max = u16::MAX)]
    TooManyRoosts(usize),

    #[error("bird count {0} exceeds the addressable id range")]
    TooManyBirds(usize),
}

pub type FlockResult<T> = Result<T, FlockError>;
