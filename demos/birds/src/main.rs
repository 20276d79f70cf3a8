//! `birds` — headless run of the installation scene.
//!
//! Spawns the default 40-bird flock in its two trees and drives it for a
//! minute of simulated time at 60 fps.  A synthetic visitor wanders the
//! pointer around the scene now and then, scattering whichever birds it
//! passes.  A per-second summary is logged to stderr; the final frame is
//! printed to stdout as JSON for a renderer or notebook to pick up.
//!
//! Run with:
//!   RUST_LOG=info cargo run -p birds --release [-- path/to/config.json]
//!
//! The optional config file may set any subset of `FlockConfig` fields.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use glam::Vec3;
use roost_core::{FlockConfig, FlockRng, Frame};
use roost_flock::{BirdSnapshot, FlockBuilder, FlockManager, FlockObserver, FrameReport};

// ── Constants ─────────────────────────────────────────────────────────────────

const FPS:               u64 = 60;
const DURATION_SECS:     u64 = 60;
/// Chance per frame that the visitor moves the pointer.
const POINTER_MOVE_RATE: f64 = 0.05;
/// Half-extent of the box the pointer wanders in, world units.
const POINTER_REACH:     f32 = 450.0;

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct SceneSummary {
    scattered:      usize,
    landings:       usize,
    peak_disturbed: usize,
    last_report:    FrameReport,
}

impl FlockObserver for SceneSummary {
    fn on_frame_end(&mut self, frame: Frame, report: &FrameReport) {
        self.scattered += report.pointer_disturbed.len();
        self.landings += report.latched.len();
        self.peak_disturbed = self.peak_disturbed.max(report.disturbed);
        if frame.0 % FPS == 0 {
            log::info!(
                "t={:>3}s  resting {:>2}  disturbed {:>2}",
                frame.0 / FPS,
                report.resting,
                report.disturbed,
            );
        }
        self.last_report = report.clone();
    }

    fn on_snapshot(&mut self, frame: Frame, birds: &[BirdSnapshot]) {
        let flying: Vec<&BirdSnapshot> = birds.iter().filter(|b| !b.resting).collect();
        if flying.is_empty() {
            return;
        }
        let mean_speed = flying.iter().map(|b| b.velocity.length()).sum::<f32>() / flying.len() as f32;
        let mean_height = flying.iter().map(|b| b.render_position.y).sum::<f32>() / flying.len() as f32;
        log::debug!(
            "{frame}: {} airborne, mean speed {mean_speed:.2}, mean height {mean_height:.2}",
            flying.len(),
        );
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

fn load_config(path: &Path) -> Result<FlockConfig> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config: FlockConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

// ── Visitor ───────────────────────────────────────────────────────────────────

/// Occasionally move the pointer to a random spot in the scene.
fn visitor_pointer(rng: &mut FlockRng) -> Option<Vec3> {
    if !rng.gen_bool(POINTER_MOVE_RATE) {
        return None;
    }
    Some(Vec3::new(
        rng.gen_range(-POINTER_REACH..=POINTER_REACH),
        rng.gen_range(0.0..=POINTER_REACH),
        rng.gen_range(-POINTER_REACH..=POINTER_REACH),
    ))
}

fn run(flock: &mut FlockManager, observer: &mut SceneSummary) {
    let dt = 1.0 / FPS as f32;
    let mut visitor = FlockRng::new(flock.config().seed).child(1);
    for _ in 0..FPS * DURATION_SECS {
        if let Some(target) = visitor_pointer(&mut visitor) {
            flock.publish_pointer(Some(target));
        }
        flock.run_frames(1, dt, observer);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => FlockConfig {
            snapshot_interval_frames: FPS,
            ..FlockConfig::default()
        },
    };
    log::info!(
        "birds: {} birds, {}s at {} fps, seed {}",
        config.bird_count,
        DURATION_SECS,
        FPS,
        config.seed,
    );

    let mut flock = FlockBuilder::new(config).build()?;
    let mut summary = SceneSummary::default();

    let t0 = Instant::now();
    run(&mut flock, &mut summary);
    let elapsed = t0.elapsed();

    log::info!(
        "{}: done in {:.1} ms: {} scatters, {} landings, peak {} disturbed, {} resting at the end",
        flock.clock,
        elapsed.as_secs_f64() * 1_000.0,
        summary.scattered,
        summary.landings,
        summary.peak_disturbed,
        summary.last_report.resting,
    );

    println!("{}", serde_json::to_string_pretty(&flock.snapshots())?);
    Ok(())
}
