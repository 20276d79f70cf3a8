//! The two-axis behavior state of a bird and its transition table.
//!
//! ```text
//! rest axis:         Flying ──NearRoost (calm)──▶ Resting
//!                      ▲                            │
//!                      └────────── Disturb ─────────┘
//!
//! disturbance axis:  Calm ──Disturb──▶ Disturbed(t) ──Elapsed until t = 0──▶ Calm
//! ```
//!
//! The rest axis is a latch.  Once a bird is `Resting`, further proximity
//! checks are skipped and moving away from the roost does not release it;
//! only a disturbance does.  A consequence worth knowing: a bird that merely
//! flies through a roost's capture radius while calm latches on the spot and
//! stops mid-air if it is not exactly at the roost.

use glam::Vec3;
use roost_core::RoostId;
use roost_core::sanitize_dt;

/// Rest axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RestState {
    #[default]
    Flying,
    /// Latched onto the roost whose check fired first.
    Resting { roost: RoostId },
}

/// Disturbance axis.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Disturbance {
    #[default]
    Calm,
    /// Alert for `remaining` more seconds; always `> TIMER_RESOLUTION`.
    ///
    /// Kept in `f64` so a second of 1/60 s or 1/144 s ticks sums to a second.
    Disturbed { remaining: f64 },
}

/// A timer this close to zero has expired.
///
/// Absorbs the rounding of `f32` frame deltas (`60 × 1/60` is not exactly
/// `1.0` in `f32`); far below any frame duration.
pub const TIMER_RESOLUTION: f64 = 1.0e-6;

/// Inputs to the transition table.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BehaviorEvent {
    /// The bird was startled; stay alert for `duration` seconds.
    Disturb { duration: f32 },
    /// `dt` seconds passed.
    Elapsed(f32),
    /// The bird is inside the capture radius of `roost`.
    NearRoost(RoostId),
}

/// Pure transition function over the product state.
///
/// | From                  | Event        | To                                    |
/// |-----------------------|--------------|---------------------------------------|
/// | any                   | `Disturb`    | `(Flying, Disturbed(duration))`       |
/// | `(r, Disturbed(t))`   | `Elapsed(dt)`| `(r, Disturbed(t − dt))`, Calm at ≈ 0 |
/// | `(r, Calm)`           | `Elapsed`    | unchanged                             |
/// | `(Flying, Calm)`      | `NearRoost`  | `(Resting, Calm)`                     |
/// | `(Resting, _)`        | `NearRoost`  | unchanged                             |
/// | `(Flying, Disturbed)` | `NearRoost`  | unchanged                             |
pub fn transition(
    rest:        RestState,
    disturbance: Disturbance,
    event:       BehaviorEvent,
) -> (RestState, Disturbance) {
    match (rest, disturbance, event) {
        (_, _, BehaviorEvent::Disturb { duration }) => {
            let d = if duration as f64 > TIMER_RESOLUTION {
                Disturbance::Disturbed { remaining: duration as f64 }
            } else {
                Disturbance::Calm
            };
            (RestState::Flying, d)
        }

        (r, Disturbance::Disturbed { remaining }, BehaviorEvent::Elapsed(dt)) => {
            let left = remaining - sanitize_dt(dt) as f64;
            if left > TIMER_RESOLUTION {
                (r, Disturbance::Disturbed { remaining: left })
            } else {
                (r, Disturbance::Calm)
            }
        }
        (r, Disturbance::Calm, BehaviorEvent::Elapsed(_)) => (r, Disturbance::Calm),

        (RestState::Flying, Disturbance::Calm, BehaviorEvent::NearRoost(roost)) => {
            (RestState::Resting { roost }, Disturbance::Calm)
        }
        (r, d, BehaviorEvent::NearRoost(_)) => (r, d),
    }
}

// ── BehaviorState ─────────────────────────────────────────────────────────────

/// Discrete state of one bird plus its animation outputs.
///
/// Paired 1:1 with a `SteeringAgent`.  The discrete part only changes through
/// [`BehaviorState::apply`]; the animation part is refreshed by
/// [`animate`](BehaviorState::animate).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorState {
    pub(crate) rest:        RestState,
    pub(crate) disturbance: Disturbance,

    /// Wingbeat phase in `[0, 2π)`.
    pub(crate) wing_phase:   f32,
    /// Per-bird multiplier that detunes the idle bob; drawn once at spawn.
    pub(crate) bob_factor:   f32,
    pub(crate) color_factor: f32,
    pub(crate) pose:         crate::WingPose,
}

impl BehaviorState {
    /// A flying, calm bird with the given wing phase and bob factor.
    pub fn new(wing_phase: f32, bob_factor: f32) -> Self {
        Self {
            rest:         RestState::Flying,
            disturbance:  Disturbance::Calm,
            wing_phase:   roost_core::math::wrap_angle(wing_phase),
            bob_factor,
            color_factor: 0.0,
            pose:         crate::WingPose::spread(wing_phase),
        }
    }

    /// Draw the wing phase and bob factor from the bird's RNG.
    pub fn spawn(rng: &mut roost_core::BirdRng) -> Self {
        let wing_phase = rng.angle();
        let bob_factor: f32 = rng.random();
        Self::new(wing_phase, bob_factor)
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Feed one event through [`transition`].
    pub fn apply(&mut self, event: BehaviorEvent) {
        let (rest, disturbance) = transition(self.rest, self.disturbance, event);
        self.rest = rest;
        self.disturbance = disturbance;
    }

    /// Startle the bird: alert for `duration` seconds and release any latch.
    pub fn disturb(&mut self, duration: f32) {
        self.apply(BehaviorEvent::Disturb { duration });
    }

    /// Decay the disturbance timer by `dt` seconds (never below zero).
    pub fn tick(&mut self, dt: f32) {
        self.apply(BehaviorEvent::Elapsed(dt));
    }

    /// Latch onto `roost` if not yet latched, calm, and strictly closer than
    /// `threshold`.  Returns `true` if this call set the latch.
    ///
    /// Positions are compared in whatever space the caller passes; the flock
    /// uses render space.
    pub fn check_rest(&mut self, position: Vec3, roost: RoostId, roost_position: Vec3, threshold: f32) -> bool {
        if self.resting_latch() || self.is_disturbed() {
            return false;
        }
        if position.distance(roost_position) < threshold {
            self.apply(BehaviorEvent::NearRoost(roost));
            log::trace!("bird latched at {roost}");
            return true;
        }
        false
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn rest_state(&self) -> RestState {
        self.rest
    }

    #[inline]
    pub fn disturbance(&self) -> Disturbance {
        self.disturbance
    }

    /// Seconds of alertness left; `0.0` when calm.
    #[inline]
    pub fn disturbed_timer(&self) -> f32 {
        match self.disturbance {
            Disturbance::Calm => 0.0,
            Disturbance::Disturbed { remaining } => remaining as f32,
        }
    }

    #[inline]
    pub fn is_disturbed(&self) -> bool {
        matches!(self.disturbance, Disturbance::Disturbed { .. })
    }

    #[inline]
    pub fn resting_latch(&self) -> bool {
        matches!(self.rest, RestState::Resting { .. })
    }

    /// The roost the bird is latched to, if any.
    #[inline]
    pub fn roost(&self) -> Option<RoostId> {
        match self.rest {
            RestState::Resting { roost } => Some(roost),
            RestState::Flying => None,
        }
    }

    /// Latched and calm; the flag handed to the steering agent each frame.
    #[inline]
    pub fn is_resting(&self) -> bool {
        self.resting_latch() && !self.is_disturbed()
    }
}
