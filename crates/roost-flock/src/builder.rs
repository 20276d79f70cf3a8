//! Fluent builder for constructing a [`FlockManager`].

use glam::Vec3;
use roost_behavior::BehaviorState;
use roost_core::{BirdId, BirdRng, FlockConfig, FrameClock, RoostId};
use roost_steer::SteeringAgent;

use crate::{FlockError, FlockManager, FlockResult, Roost, SceneLayout};

/// Explicit initial kinematics for one bird, in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpawnState {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl SpawnState {
    #[inline]
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self { position, velocity }
    }

    /// A bird perched motionless at `position`.
    #[inline]
    pub fn at_rest(position: Vec3) -> Self {
        Self { position, velocity: Vec3::ZERO }
    }
}

/// Fluent builder for [`FlockManager`].
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                                       |
/// |-----------------------|-----------------------------------------------|
/// | `.layout(l)`          | `SceneLayout::installation(&config)`          |
/// | `.spawn_states(v)`    | birds scattered around the roosts (see below) |
///
/// Without explicit spawn states, bird *i* starts at roost `(i + 1) mod R`
/// (so with two roosts the even birds go to the second tree), jittered by
/// `uniform(−spawn_jitter, spawn_jitter)` per axis, with a velocity uniform
/// in `[−1, 1]` per axis.  Every draw, including the wing phase and bob
/// factor, comes from that bird's own seeded RNG.
///
/// # Example
///
/// ```rust,ignore
/// let mut flock = FlockBuilder::new(FlockConfig::default()).build()?;
/// flock.run_frames(600, 1.0 / 60.0, &mut NoopObserver);
/// ```
pub struct FlockBuilder {
    config: FlockConfig,
    layout: Option<SceneLayout>,
    spawn:  Option<Vec<SpawnState>>,
}

impl FlockBuilder {
    pub fn new(config: FlockConfig) -> Self {
        Self {
            config,
            layout: None,
            spawn:  None,
        }
    }

    /// Replace the installation scene.  Must contain at least one roost.
    pub fn layout(mut self, layout: SceneLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Place every bird explicitly.  Must be length `config.bird_count`.
    pub fn spawn_states(mut self, states: Vec<SpawnState>) -> Self {
        self.spawn = Some(states);
        self
    }

    /// Validate inputs, seed the per-bird RNGs, spawn the flock, and return
    /// a ready-to-step [`FlockManager`].
    pub fn build(self) -> FlockResult<FlockManager> {
        self.config.validate()?;
        let config = self.config;
        let bird_count = config.bird_count;

        // ── Validate and resolve optional inputs ──────────────────────────
        let layout = self
            .layout
            .unwrap_or_else(|| SceneLayout::installation(&config));
        if layout.roosts.is_empty() {
            return Err(FlockError::NoRoosts);
        }
        if layout.roosts.len() > RoostId::INVALID.index() {
            return Err(FlockError::TooManyRoosts(layout.roosts.len()));
        }
        if bird_count >= BirdId::INVALID.index() {
            return Err(FlockError::TooManyBirds(bird_count));
        }
        if let Some(states) = &self.spawn {
            if states.len() != bird_count {
                return Err(FlockError::BirdCountMismatch {
                    expected: bird_count,
                    got:      states.len(),
                    what:     "spawn states",
                });
            }
        }

        // ── Spawn ─────────────────────────────────────────────────────────
        let mut rngs: Vec<BirdRng> = (0..bird_count)
            .map(|i| BirdRng::new(config.seed, BirdId(i as u32)))
            .collect();

        let mut agents = Vec::with_capacity(bird_count);
        let mut behaviors = Vec::with_capacity(bird_count);
        for (i, rng) in rngs.iter_mut().enumerate() {
            let state = match &self.spawn {
                Some(states) => states[i],
                None => {
                    let roost = &layout.roosts[(i + 1) % layout.roosts.len()];
                    scatter_around(roost, &config, rng)
                }
            };
            agents.push(SteeringAgent::new(state.position, state.velocity, &config));
            behaviors.push(BehaviorState::spawn(rng));
        }

        log::info!(
            "flock built: {} birds, {} roosts, seed {}",
            bird_count,
            layout.roosts.len(),
            config.seed,
        );

        let roost_targets = layout.roosts.iter().map(|r| r.world_position(&config)).collect();

        Ok(FlockManager {
            clock: FrameClock::new(),
            config,
            agents,
            behaviors,
            rngs,
            layout,
            roost_targets,
            pointer: None,
        })
    }
}

fn scatter_around(roost: &Roost, config: &FlockConfig, rng: &mut BirdRng) -> SpawnState {
    let position = roost.world_position(config) + rng.symmetric_vec3(config.spawn_jitter);
    let velocity = rng.symmetric_vec3(1.0);
    SpawnState { position, velocity }
}
