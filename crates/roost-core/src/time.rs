//! Frame time model.
//!
//! # Design
//!
//! The simulation never reads a wall clock.  The host loop hands each frame a
//! delta time in seconds; `FrameClock` counts frames and accumulates the
//! elapsed seconds that the idle animation needs.
//!
//! Elapsed time is accumulated in `f64` so a scene left open for days does not
//! lose sub-frame precision; it is narrowed to `f32` only at the point of use.

use std::fmt;

// ── Frame ─────────────────────────────────────────────────────────────────────

/// An absolute frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame(pub u64);

impl Frame {
    pub const ZERO: Frame = Frame(0);
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

// ── DeltaTime ─────────────────────────────────────────────────────────────────

/// Sanitize a host-supplied delta time.
///
/// Returns `dt` unchanged when it is finite and non-negative, otherwise `0.0`.
/// A zero delta is legal (decays nothing); the caller decides whether to log.
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

// ── FrameClock ────────────────────────────────────────────────────────────────

/// Counts frames and accumulates host-supplied elapsed time.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameClock {
    /// The current frame, advanced by [`FrameClock::advance`].
    pub current_frame: Frame,
    /// Total elapsed seconds over all advanced frames.
    pub elapsed_secs: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame of `dt` seconds.  `dt` is sanitized first.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.current_frame = Frame(self.current_frame.0 + 1);
        self.elapsed_secs += sanitize_dt(dt) as f64;
    }
}

impl fmt::Display for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3}s)", self.current_frame, self.elapsed_secs)
    }
}
