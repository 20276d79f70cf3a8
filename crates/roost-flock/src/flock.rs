//! The `FlockManager` struct and its frame loop.

use glam::Vec3;
use roost_behavior::BehaviorState;
use roost_core::{BirdId, BirdRng, FlockConfig, Frame, FrameClock, RoostError, sanitize_dt};
use roost_steer::SteeringAgent;

use crate::{BirdSnapshot, FlockError, FlockObserver, FlockResult, Obstacle, SceneLayout};

// ── Frame summary ─────────────────────────────────────────────────────────────

/// What happened during one [`FlockManager::step`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub frame: Frame,
    /// Delta time actually applied, after sanitizing.
    pub dt:    f32,

    /// Birds resting (latched and calm) at frame end.
    pub resting:   usize,
    /// Birds with a running disturbance timer at frame end.
    pub disturbed: usize,

    /// Birds the published pointer target pushed away, and thereby disturbed.
    pub pointer_disturbed: Vec<BirdId>,
    /// Birds whose rest latch was set this frame.
    pub latched:           Vec<BirdId>,
}

// ── Gather-phase inputs and outputs ───────────────────────────────────────────

/// Read-only environment shared by every bird's gather.
struct GatherEnv<'a> {
    config:   &'a FlockConfig,
    roosts:   &'a [Vec3],
    obstacle: Option<Obstacle>,
    pointer:  Option<Vec3>,
}

/// One bird's gather result.  Produced against the frame-start state of the
/// whole flock, consumed by the apply phase.
struct Gathered {
    force:       Vec3,
    pointer_hit: bool,
}

impl GatherEnv<'_> {
    fn forces_for(&self, agent: &SteeringAgent, flock: &[SteeringAgent], rng: &mut BirdRng) -> Gathered {
        let cfg = self.config;

        let mut force = agent.wall_avoidance_force();

        // The throttle is rolled for every bird each frame.  Resting birds
        // then return early from flocking and skip the per-neighbor draws.
        if rng.accept(cfg.flocking_rate) {
            force += agent.flocking_force(flock, rng, cfg.neighbor_sample_rate);
        }

        for &roost in self.roosts {
            force += agent.attraction_force(roost, cfg.roost_attraction_radius, cfg.roost_attraction_strength);
        }

        if let Some(ob) = self.obstacle {
            if let Some(push) = agent.repulsion_force(ob.position, ob.radius, ob.strength) {
                force += push;
            }
        }

        let pointer_push = self.pointer.and_then(|p| {
            agent.repulsion_force(p, cfg.pointer_repulsion_radius, cfg.pointer_repulsion_strength)
        });
        if let Some(push) = pointer_push {
            force += push;
        }

        Gathered { force, pointer_hit: pointer_push.is_some() }
    }
}

// ── FlockManager ──────────────────────────────────────────────────────────────

/// The flock: one steering agent, one behavior state and one RNG per bird,
/// plus the scene they react to.
///
/// Each [`step`](Self::step) runs two phases:
///
/// 1. **Gather** (optionally parallel with the `parallel` feature): every
///    bird's rest flag is refreshed, then its wall, flocking, roost, obstacle
///    and pointer forces are summed against a frozen view of the flock.
/// 2. **Apply** (sequential, ascending `BirdId`): pointer hits disturb, the
///    gathered force is integrated (or dropped while resting), the heading,
///    rest latch, disturbance timer and animation are advanced.
///
/// Create via [`FlockBuilder`][crate::FlockBuilder].
pub struct FlockManager {
    /// Read through [`config`](Self::config), replace through
    /// [`set_config`](Self::set_config).
    pub(crate) config: FlockConfig,

    /// Frame counter and elapsed seconds; drives the idle animation.
    pub clock: FrameClock,

    pub(crate) agents:    Vec<SteeringAgent>,
    pub(crate) behaviors: Vec<BehaviorState>,

    /// Per-bird deterministic RNGs, separated for the split-borrow pattern.
    pub(crate) rngs: Vec<BirdRng>,

    pub(crate) layout: SceneLayout,

    /// World-space image of each roost, parallel to `layout.roosts`.
    pub(crate) roost_targets: Vec<Vec3>,

    /// Pointer target waiting for the next frame, in world space.
    pub(crate) pointer: Option<Vec3>,
}

impl FlockManager {
    // ── Public API ────────────────────────────────────────────────────────

    /// Advance the flock by one frame of `dt` seconds.
    ///
    /// A non-finite or negative `dt` is treated as `0` (logged at `warn`):
    /// the birds still move, since steering is per frame, but no disturbance
    /// time elapses.
    pub fn step(&mut self, dt: f32) -> FrameReport {
        let clean_dt = sanitize_dt(dt);
        if clean_dt != dt {
            log::warn!("{}: ignoring invalid frame delta {dt}", self.clock.current_frame);
        }

        let frame = self.clock.current_frame;
        let time = (self.clock.elapsed_secs + clean_dt as f64) as f32;
        let mut report = FrameReport {
            frame,
            dt: clean_dt,
            ..FrameReport::default()
        };

        // ── Phase 1: gather (produce) ─────────────────────────────────────
        for (agent, behavior) in self.agents.iter_mut().zip(&self.behaviors) {
            agent.resting = behavior.is_resting();
        }
        let gathered = self.gather();

        // ── Phase 2: apply (consume) ──────────────────────────────────────
        //
        // Birds are applied in ascending id order, so results are identical
        // whether the gather phase ran in parallel or not.
        let config = &self.config;
        let layout = &self.layout;
        let birds = self.agents.iter_mut().zip(self.behaviors.iter_mut()).zip(gathered);
        for (i, ((agent, behavior), g)) in birds.enumerate() {
            let id = BirdId(i as u32);

            agent.apply_force(g.force);
            if g.pointer_hit {
                behavior.disturb(config.disturb_duration_secs);
                // A scattered bird takes off with the push that startled it.
                agent.resting = behavior.is_resting();
                report.pointer_disturbed.push(id);
            }

            if agent.resting {
                agent.clear_acceleration();
            } else {
                agent.integrate();
            }
            let heading = agent.update_orientation();

            let render_position = config.to_render(agent.position);
            if !behavior.is_disturbed() {
                for (roost_id, roost) in layout.roosts_with_ids() {
                    if behavior.check_rest(render_position, roost_id, roost.position, config.rest_threshold) {
                        report.latched.push(id);
                    }
                }
            }

            behavior.tick(clean_dt);
            behavior.animate(heading.pitch, time, render_position);

            if behavior.is_resting() {
                report.resting += 1;
            }
            if behavior.is_disturbed() {
                report.disturbed += 1;
            }
        }

        log::debug!(
            "{frame}: {} resting, {} disturbed, {} scattered, {} latched",
            report.resting,
            report.disturbed,
            report.pointer_disturbed.len(),
            report.latched.len(),
        );

        self.pointer = None;
        self.clock.advance(clean_dt);
        report
    }

    /// Step `n` frames of `dt` seconds each, calling observer hooks at every
    /// frame boundary.  Use [`NoopObserver`][crate::NoopObserver] if you
    /// don't need callbacks.
    pub fn run_frames<O: FlockObserver>(&mut self, n: u64, dt: f32, observer: &mut O) {
        for _ in 0..n {
            let now = self.clock.current_frame;
            observer.on_frame_start(now);
            let report = self.step(dt);
            observer.on_frame_end(now, &report);
            let interval = self.config.snapshot_interval_frames;
            if interval > 0 && now.0.is_multiple_of(interval) {
                observer.on_snapshot(now, &self.snapshots());
            }
        }
        observer.on_run_end(self.clock.current_frame);
    }

    /// Publish a pointer target in world space for the next frame.
    ///
    /// Pointer events are not per frame: the target is consumed by the next
    /// [`step`](Self::step) and then cleared.  `None` withdraws a target
    /// published since the last step.
    pub fn publish_pointer(&mut self, target: Option<Vec3>) {
        self.pointer = target;
    }

    /// Swap in a new configuration between frames.
    ///
    /// The config is validated first and `bird_count` must not change; on
    /// error the running config is kept.  Steering limits and wall settings
    /// are pushed into every agent and the roost targets are rescaled.
    /// `seed` and `spawn_jitter` only matter at build time, and the
    /// obstacle belongs to the [`SceneLayout`], so none of them change a
    /// running flock.
    pub fn set_config(&mut self, config: FlockConfig) -> FlockResult<()> {
        config.validate()?;
        if config.bird_count != self.agents.len() {
            return Err(FlockError::BirdCountMismatch {
                expected: self.agents.len(),
                got:      config.bird_count,
                what:     "config.bird_count",
            });
        }

        for agent in &mut self.agents {
            agent.apply_limits(&config);
        }
        self.roost_targets = self.layout.roosts.iter().map(|r| r.world_position(&config)).collect();
        if config.seed != self.config.seed {
            log::warn!("{}: seed change ignored by a running flock", self.clock.current_frame);
        }
        log::info!("{}: config replaced", self.clock.current_frame);
        self.config = config;
        Ok(())
    }

    /// Startle one bird.
    pub fn disturb(&mut self, id: BirdId) -> FlockResult<()> {
        let duration = self.config.disturb_duration_secs;
        let behavior = self
            .behaviors
            .get_mut(id.index())
            .ok_or(RoostError::BirdNotFound(id))?;
        behavior.disturb(duration);
        Ok(())
    }

    /// Startle every bird strictly within `radius` of the world-space `point`.
    /// Returns the ids disturbed, ascending.
    pub fn disturb_near(&mut self, point: Vec3, radius: f32) -> Vec<BirdId> {
        let duration = self.config.disturb_duration_secs;
        let mut hit = Vec::new();
        for (i, (agent, behavior)) in self.agents.iter().zip(self.behaviors.iter_mut()).enumerate() {
            if agent.position.distance(point) < radius {
                behavior.disturb(duration);
                hit.push(BirdId(i as u32));
            }
        }
        hit
    }

    pub fn snapshot(&self, id: BirdId) -> FlockResult<BirdSnapshot> {
        let i = id.index();
        match (self.agents.get(i), self.behaviors.get(i)) {
            (Some(agent), Some(behavior)) => Ok(BirdSnapshot::capture(id, agent, behavior, &self.config)),
            _ => Err(RoostError::BirdNotFound(id).into()),
        }
    }

    /// One snapshot per bird, in id order.
    pub fn snapshots(&self) -> Vec<BirdSnapshot> {
        self.agents
            .iter()
            .zip(&self.behaviors)
            .enumerate()
            .map(|(i, (agent, behavior))| BirdSnapshot::capture(BirdId(i as u32), agent, behavior, &self.config))
            .collect()
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[inline]
    pub fn agents(&self) -> &[SteeringAgent] {
        &self.agents
    }

    #[inline]
    pub fn behaviors(&self) -> &[BehaviorState] {
        &self.behaviors
    }

    pub fn agent(&self, id: BirdId) -> Option<&SteeringAgent> {
        self.agents.get(id.index())
    }

    pub fn behavior(&self, id: BirdId) -> Option<&BehaviorState> {
        self.behaviors.get(id.index())
    }

    #[inline]
    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    /// The pointer target the next step will use, if any.
    #[inline]
    pub fn pending_pointer(&self) -> Option<Vec3> {
        self.pointer
    }

    // ── Gather phase ──────────────────────────────────────────────────────

    /// Sum every bird's forces against the frame-start flock.
    ///
    /// With the `parallel` Cargo feature the birds are spread over Rayon's
    /// thread pool; each worker gets exclusive use of its bird's RNG.
    fn gather(&mut self) -> Vec<Gathered> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let flock = self.agents.as_slice();
        let rngs  = &mut self.rngs;
        let env = GatherEnv {
            config:   &self.config,
            roosts:   &self.roost_targets,
            obstacle: self.layout.obstacle,
            pointer:  self.pointer,
        };

        #[cfg(not(feature = "parallel"))]
        {
            flock
                .iter()
                .zip(rngs.iter_mut())
                .map(|(agent, rng)| env.forces_for(agent, flock, rng))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            flock
                .par_iter()
                .zip(rngs.par_iter_mut())
                .map(|(agent, rng)| env.forces_for(agent, flock, rng))
                .collect()
        }
    }
}
