//! Integration tests for roost-flock.

use glam::Vec3;
use roost_core::{BirdId, BirdRng, FlockConfig, Frame, RoostError};

use crate::{
    BirdSnapshot, FlockBuilder, FlockError, FlockManager, FlockObserver, FrameReport, NoopObserver,
    Obstacle, Roost, SceneLayout, SpawnState,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const DT: f32 = 1.0 / 60.0;

fn installation() -> FlockManager {
    FlockBuilder::new(FlockConfig::default()).build().unwrap()
}

fn config_with(bird_count: usize) -> FlockConfig {
    FlockConfig { bird_count, ..FlockConfig::default() }
}

/// One roost at render (0, 1, 0), world (0, 300, 0), and no obstacle.
fn perch_layout() -> SceneLayout {
    SceneLayout::new(vec![Roost::new(Vec3::new(0.0, 1.0, 0.0))], None)
}

/// A single bird spawned motionless on the only roost.
fn lone_percher() -> FlockManager {
    FlockBuilder::new(config_with(1))
        .layout(perch_layout())
        .spawn_states(vec![SpawnState::at_rest(Vec3::new(0.0, 300.0, 0.0))])
        .build()
        .unwrap()
}

fn world_roost(flock: &FlockManager, i: usize) -> Vec3 {
    flock.layout().roosts[i].world_position(flock.config())
}

// ── FlockBuilder validation ───────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_installation_by_default() {
        let flock = installation();
        assert_eq!(flock.len(), 40);
        assert_eq!(flock.layout().roosts.len(), 2);
        assert!(flock.layout().obstacle.is_some());
        assert_eq!(flock.clock.current_frame, Frame::ZERO);
    }

    #[test]
    fn default_spawn_alternates_roosts_within_jitter() {
        let flock = installation();
        for (i, agent) in flock.agents().iter().enumerate() {
            // Even birds go to the second tree, odd birds to the first.
            let roost = world_roost(&flock, (i + 1) % 2);
            let offset = (agent.position - roost).abs();
            assert!(offset.max_element() <= 30.0 + 1e-3, "bird {i} offset {offset}");
            assert!(agent.velocity.abs().max_element() <= 1.0);
        }
    }

    #[test]
    fn spawn_count_mismatch_errors() {
        let result = FlockBuilder::new(config_with(3))
            .spawn_states(vec![SpawnState::at_rest(Vec3::ZERO); 2])
            .build();
        assert!(matches!(
            result,
            Err(FlockError::BirdCountMismatch { expected: 3, got: 2, .. })
        ));
    }

    #[test]
    fn empty_layout_errors() {
        let result = FlockBuilder::new(FlockConfig::default())
            .layout(SceneLayout::new(vec![], None))
            .build();
        assert!(matches!(result, Err(FlockError::NoRoosts)));
    }

    #[test]
    fn invalid_config_errors() {
        let config = FlockConfig { max_speed: 0.0, ..FlockConfig::default() };
        let result = FlockBuilder::new(config).build();
        assert!(matches!(result, Err(FlockError::Core(RoostError::Config(_)))));
    }

    #[test]
    fn oversized_spawn_jitter_errors_instead_of_panicking() {
        for spawn_jitter in [f32::MAX, 1.0e7] {
            let config = FlockConfig { spawn_jitter, ..FlockConfig::default() };
            let result = FlockBuilder::new(config).build();
            assert!(matches!(result, Err(FlockError::Core(RoostError::Config(_)))));
        }
    }

    #[test]
    fn empty_flock_steps() {
        let mut flock = FlockBuilder::new(config_with(0)).build().unwrap();
        assert!(flock.is_empty());
        let report = flock.step(DT);
        assert_eq!(report.resting, 0);
        assert!(flock.snapshots().is_empty());
    }
}

// ── Frame loop ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;

    #[test]
    fn birds_spawned_in_trees_settle_on_first_frame() {
        let mut flock = installation();
        let report = flock.step(DT);
        assert_eq!(report.frame, Frame::ZERO);
        assert_eq!(report.resting, 40);
        assert_eq!(report.latched.len(), 40);
        assert_eq!(flock.clock.current_frame, Frame(1));
    }

    #[test]
    fn resting_bird_does_not_move() {
        let mut flock = lone_percher();
        let first = flock.step(DT);
        assert_eq!(first.latched, vec![BirdId(0)]);

        let perched = flock.agents()[0].position;
        for _ in 0..120 {
            let report = flock.step(DT);
            assert_eq!(report.resting, 1);
            assert!(report.latched.is_empty());
            assert_eq!(flock.agents()[0].position, perched);
        }
    }

    #[test]
    fn bird_crossing_roost_latches_mid_flight() {
        let mut flock = FlockBuilder::new(config_with(1))
            .layout(perch_layout())
            .spawn_states(vec![SpawnState::new(Vec3::new(-2.0, 300.0, 0.0), Vec3::new(5.0, 0.0, 0.0))])
            .build()
            .unwrap();
        flock.step(DT);
        let b = flock.behavior(BirdId(0)).unwrap();
        assert!(b.is_resting());
        // It stops where it was, still carrying its flight velocity.
        let stopped = flock.agents()[0].clone();
        assert!(stopped.speed() > 4.0);
        flock.step(DT);
        assert_eq!(flock.agents()[0].position, stopped.position);
    }

    #[test]
    fn speed_capped_and_acceleration_cleared_every_frame() {
        let mut flock = installation();
        let center = world_roost(&flock, 1);
        flock.disturb_near(center, 200.0);
        for f in 0..300 {
            if f % 20 == 0 {
                flock.publish_pointer(Some(center + Vec3::new(f as f32 - 150.0, 0.0, 0.0)));
            }
            flock.step(DT);
            for agent in flock.agents() {
                assert!(agent.speed() <= agent.max_speed + 1e-4, "speed {}", agent.speed());
                assert_eq!(agent.acceleration, Vec3::ZERO);
                assert!(agent.position.is_finite());
            }
        }
    }

    #[test]
    fn resting_birds_hold_position_between_frames() {
        let mut flock = installation();
        flock.disturb_near(world_roost(&flock, 0), 200.0);
        let mut before = flock.snapshots();
        for _ in 0..240 {
            flock.step(DT);
            let after = flock.snapshots();
            for (b, a) in before.iter().zip(&after) {
                if b.resting && a.resting {
                    assert_eq!(b.position, a.position, "{} moved while resting", a.id);
                }
            }
            before = after;
        }
    }

    #[test]
    fn report_counts_match_behavior() {
        let mut flock = installation();
        flock.disturb_near(world_roost(&flock, 1), 200.0);
        for _ in 0..90 {
            let report = flock.step(DT);
            let resting = flock.behaviors().iter().filter(|b| b.is_resting()).count();
            let disturbed = flock.behaviors().iter().filter(|b| b.is_disturbed()).count();
            assert_eq!(report.resting, resting);
            assert_eq!(report.disturbed, disturbed);
            assert!(flock.behaviors().iter().all(|b| b.disturbed_timer() >= 0.0));
        }
    }

    #[test]
    fn obstacle_pushes_bird_away() {
        let layout = SceneLayout::new(
            vec![Roost::new(Vec3::new(1.5, 1.5, 1.2))],
            Some(Obstacle { position: Vec3::new(0.0, 0.4, 0.0), radius: 340.0, strength: 3.0 }),
        );
        let mut flock = FlockBuilder::new(config_with(1))
            .layout(layout)
            .spawn_states(vec![SpawnState::at_rest(Vec3::new(100.0, 0.4, 0.0))])
            .build()
            .unwrap();
        flock.step(DT);
        assert!(flock.agents()[0].velocity.x > 2.0, "got {}", flock.agents()[0].velocity);
    }

    #[test]
    fn gather_reads_frame_start_positions() {
        let config = FlockConfig {
            flocking_rate: 1.0,
            neighbor_sample_rate: 1.0,
            avoid_walls: false,
            roost_attraction_radius: 0.0,
            ..config_with(2)
        };
        let seed = config.seed;
        let mut flock = FlockBuilder::new(config)
            .layout(SceneLayout::new(vec![Roost::new(Vec3::new(1.5, 1.5, 1.2))], None))
            .spawn_states(vec![
                SpawnState::new(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0)),
                SpawnState::at_rest(Vec3::new(3.0, 0.0, 0.0)),
            ])
            .build()
            .unwrap();

        let frozen = flock.agents().to_vec();
        let expected = frozen[1].flocking_force(&frozen, &mut BirdRng::new(seed, BirdId(1)), 1.0);
        flock.step(DT);

        // Bird 0 has already moved past bird 1 by the time bird 1 is applied;
        // had bird 1 seen that, separation would push it toward -x.
        assert!(flock.agents()[0].position.x > 3.0);
        let v = flock.agents()[1].velocity;
        assert!((v - expected).length() < 1e-6, "got {v}, expected {expected}");
        assert!(v.x > 0.0);
    }

    #[test]
    fn invalid_dt_decays_nothing() {
        let mut flock = lone_percher();
        flock.disturb(BirdId(0)).unwrap();
        for dt in [f32::NAN, f32::NEG_INFINITY, -0.5] {
            let report = flock.step(dt);
            assert_eq!(report.dt, 0.0);
        }
        assert_eq!(flock.clock.elapsed_secs, 0.0);
        assert_eq!(flock.clock.current_frame, Frame(3));
        assert_eq!(flock.behavior(BirdId(0)).unwrap().disturbed_timer(), 1.0);
    }

    #[test]
    fn wing_phase_stays_wrapped_in_flight() {
        let mut flock = installation();
        flock.disturb_near(Vec3::ZERO, 10_000.0);
        for _ in 0..200 {
            flock.step(DT);
            for b in flock.behaviors() {
                assert!((0.0..std::f32::consts::TAU).contains(&b.wing_phase()));
            }
        }
    }
}

// ── Reconfiguration ───────────────────────────────────────────────────────────

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn new_limits_reach_every_bird() {
        let mut flock = installation();
        flock.disturb_near(Vec3::ZERO, 10_000.0);
        let config = FlockConfig {
            max_speed: 1.0,
            avoid_walls: false,
            ..flock.config().clone()
        };
        flock.set_config(config).unwrap();
        assert_eq!(flock.config().max_speed, 1.0);

        for _ in 0..30 {
            flock.step(DT);
            for agent in flock.agents() {
                assert!(!agent.avoid_walls);
                assert_eq!(agent.max_speed, 1.0);
                assert!(agent.speed() <= 1.0 + 1e-4, "speed {}", agent.speed());
            }
        }
    }

    #[test]
    fn invalid_config_is_rejected_and_old_one_kept() {
        let mut flock = installation();
        let bad = FlockConfig { max_speed: 0.0, ..FlockConfig::default() };
        assert!(matches!(flock.set_config(bad), Err(FlockError::Core(RoostError::Config(_)))));
        assert_eq!(flock.config(), &FlockConfig::default());
        assert!(flock.agents().iter().all(|a| a.max_speed == 5.0));
    }

    #[test]
    fn bird_count_cannot_change() {
        let mut flock = installation();
        let result = flock.set_config(config_with(41));
        assert!(matches!(
            result,
            Err(FlockError::BirdCountMismatch { expected: 40, got: 41, .. })
        ));
        assert_eq!(flock.config().bird_count, 40);
    }

    #[test]
    fn render_scale_change_moves_roost_targets() {
        let mut flock = installation();
        let config = FlockConfig { render_scale: 150.0, ..FlockConfig::default() };
        flock.set_config(config).unwrap();
        for (i, roost) in flock.layout().roosts.iter().enumerate() {
            assert_eq!(flock.roost_targets[i], roost.position * 150.0);
            assert_eq!(world_roost(&flock, i), flock.roost_targets[i]);
        }
    }
}

// ── Pointer and disturbance ───────────────────────────────────────────────────

#[cfg(test)]
mod disturb_tests {
    use super::*;

    #[test]
    fn pointer_scatters_resting_bird() {
        let mut flock = lone_percher();
        flock.step(DT);
        let perched = flock.agents()[0].position;

        flock.publish_pointer(Some(perched + Vec3::new(10.0, 0.0, 0.0)));
        let report = flock.step(DT);
        assert_eq!(report.pointer_disturbed, vec![BirdId(0)]);

        let b = flock.behavior(BirdId(0)).unwrap();
        assert!(b.is_disturbed());
        assert!(!b.is_resting());
        // Pushed away from the pointer in the same frame.
        assert!(flock.agents()[0].position.x < perched.x);
    }

    #[test]
    fn pointer_is_consumed_by_one_frame() {
        let mut flock = lone_percher();
        flock.publish_pointer(Some(Vec3::new(0.0, 300.0, 5.0)));
        assert!(flock.pending_pointer().is_some());
        assert_eq!(flock.step(DT).pointer_disturbed.len(), 1);
        assert!(flock.pending_pointer().is_none());
        assert!(flock.step(DT).pointer_disturbed.is_empty());
    }

    #[test]
    fn pointer_out_of_range_leaves_bird_resting() {
        let mut flock = lone_percher();
        flock.step(DT);
        flock.publish_pointer(Some(Vec3::new(0.0, 300.0, 400.0)));
        let report = flock.step(DT);
        assert!(report.pointer_disturbed.is_empty());
        assert!(flock.behavior(BirdId(0)).unwrap().is_resting());
    }

    #[test]
    fn disturbed_bird_stays_up_for_a_second() {
        let mut flock = lone_percher();
        flock.step(DT);
        flock.disturb(BirdId(0)).unwrap();

        for _ in 0..59 {
            let report = flock.step(DT);
            assert_eq!(report.resting, 0);
            assert!(report.latched.is_empty());
            assert!(flock.behavior(BirdId(0)).unwrap().is_disturbed());
        }
        // The sixtieth frame completes the second.
        let report = flock.step(DT);
        assert_eq!(report.disturbed, 0);
        assert!(!flock.behavior(BirdId(0)).unwrap().is_disturbed());
        // Calm again, so the next frame re-latches on the roost it sits in.
        let report = flock.step(DT);
        assert_eq!(report.latched, vec![BirdId(0)]);
    }

    #[test]
    fn disturbance_lasts_one_second_at_high_refresh() {
        for hz in [120u32, 144] {
            let mut flock = lone_percher();
            flock.step(DT);
            flock.disturb(BirdId(0)).unwrap();
            let dt = 1.0 / hz as f32;
            for _ in 0..hz - 1 {
                flock.step(dt);
            }
            assert!(flock.behavior(BirdId(0)).unwrap().is_disturbed(), "{hz} Hz");
            flock.step(dt);
            assert!(!flock.behavior(BirdId(0)).unwrap().is_disturbed(), "{hz} Hz");
        }
    }

    #[test]
    fn disturb_near_hits_one_tree() {
        let mut flock = installation();
        flock.step(DT);
        let hit = flock.disturb_near(world_roost(&flock, 1), 200.0);
        let expected: Vec<BirdId> = (0..40).step_by(2).map(BirdId).collect();
        assert_eq!(hit, expected);
        for (i, b) in flock.behaviors().iter().enumerate() {
            assert_eq!(b.is_resting(), i % 2 == 1, "bird {i}");
        }
    }

    #[test]
    fn disturb_unknown_bird_errors() {
        let mut flock = lone_percher();
        let result = flock.disturb(BirdId(7));
        assert!(matches!(result, Err(FlockError::Core(RoostError::BirdNotFound(BirdId(7))))));
    }
}

// ── Snapshots and determinism ─────────────────────────────────────────────────

#[cfg(test)]
mod snapshot_tests {
    use super::*;

    fn scripted_run(seed: u64) -> Vec<BirdSnapshot> {
        let config = FlockConfig { seed, ..FlockConfig::default() };
        let mut flock = FlockBuilder::new(config).build().unwrap();
        flock.disturb_near(Vec3::ZERO, 10_000.0);
        for f in 0..120 {
            if f % 15 == 0 {
                flock.publish_pointer(Some(Vec3::new(f as f32 * 3.0 - 180.0, 200.0, 0.0)));
            }
            flock.step(DT);
        }
        flock.snapshots()
    }

    #[test]
    fn same_seed_replays_exactly() {
        assert_eq!(scripted_run(9), scripted_run(9));
    }

    #[test]
    fn different_seed_diverges() {
        let a = scripted_run(1);
        let b = scripted_run(2);
        assert!(a.iter().zip(&b).any(|(x, y)| x.position != y.position));
    }

    #[test]
    fn snapshot_reports_render_space_and_state() {
        let mut flock = lone_percher();
        flock.step(DT);
        let snap = flock.snapshot(BirdId(0)).unwrap();
        assert_eq!(snap.render_position, snap.position / 300.0);
        assert!(snap.resting);
        assert!(!snap.disturbed);
        assert_eq!(snap.roost, Some(roost_core::RoostId(0)));
        assert_eq!(snap.pose.wingtip_spread, 0.0);
        let expected_color = (snap.render_position.z - snap.render_position.x + 2.0) / 4.0;
        assert_eq!(snap.color_factor, expected_color);
        assert!(flock.snapshot(BirdId(1)).is_err());
    }

    #[test]
    fn snapshots_in_id_order() {
        let flock = installation();
        let ids: Vec<BirdId> = flock.snapshots().iter().map(|s| s.id).collect();
        let expected: Vec<BirdId> = (0..40).map(BirdId).collect();
        assert_eq!(ids, expected);
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        starts:    u64,
        ends:      u64,
        snapshots: Vec<(Frame, usize)>,
        run_end:   Option<Frame>,
    }

    impl FlockObserver for Counter {
        fn on_frame_start(&mut self, _frame: Frame) {
            self.starts += 1;
        }
        fn on_frame_end(&mut self, frame: Frame, report: &FrameReport) {
            assert_eq!(frame, report.frame);
            self.ends += 1;
        }
        fn on_snapshot(&mut self, frame: Frame, birds: &[BirdSnapshot]) {
            self.snapshots.push((frame, birds.len()));
        }
        fn on_run_end(&mut self, next_frame: Frame) {
            self.run_end = Some(next_frame);
        }
    }

    #[test]
    fn hooks_fire_per_frame_and_interval() {
        let config = FlockConfig { snapshot_interval_frames: 5, ..FlockConfig::default() };
        let mut flock = FlockBuilder::new(config).build().unwrap();
        let mut obs = Counter::default();
        flock.run_frames(10, DT, &mut obs);
        assert_eq!(obs.starts, 10);
        assert_eq!(obs.ends, 10);
        assert_eq!(obs.snapshots, vec![(Frame(0), 40), (Frame(5), 40)]);
        assert_eq!(obs.run_end, Some(Frame(10)));
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        let config = FlockConfig { snapshot_interval_frames: 0, ..FlockConfig::default() };
        let mut flock = FlockBuilder::new(config).build().unwrap();
        let mut obs = Counter::default();
        flock.run_frames(4, DT, &mut obs);
        assert!(obs.snapshots.is_empty());
        assert_eq!(obs.ends, 4);
    }

    #[test]
    fn noop_observer_runs() {
        let mut flock = installation();
        flock.run_frames(3, DT, &mut NoopObserver);
        assert_eq!(flock.clock.current_frame, Frame(3));
    }
}
