//! Flock observer trait for progress reporting and frame export.

use roost_core::Frame;

use crate::{BirdSnapshot, FrameReport};

/// Callbacks invoked by [`FlockManager::run_frames`][crate::FlockManager::run_frames]
/// at key points in the frame loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — scatter logger
///
/// ```rust,ignore
/// struct ScatterLog;
///
/// impl FlockObserver for ScatterLog {
///     fn on_frame_end(&mut self, frame: Frame, report: &FrameReport) {
///         if !report.pointer_disturbed.is_empty() {
///             println!("{frame}: {} birds scattered", report.pointer_disturbed.len());
///         }
///     }
/// }
/// ```
pub trait FlockObserver {
    /// Called at the very start of each frame, before any processing.
    fn on_frame_start(&mut self, _frame: Frame) {}

    /// Called after the apply phase with the frame's summary.
    fn on_frame_end(&mut self, _frame: Frame, _report: &FrameReport) {}

    /// Called every `config.snapshot_interval_frames` frames with one
    /// snapshot per bird, in id order.
    fn on_snapshot(&mut self, _frame: Frame, _birds: &[BirdSnapshot]) {}

    /// Called once after the last frame of a `run_frames` call.
    fn on_run_end(&mut self, _next_frame: Frame) {}
}

/// A [`FlockObserver`] that does nothing.
pub struct NoopObserver;

impl FlockObserver for NoopObserver {}
