//! Stepping controller.
//!
//! Owns everything a player instance needs for frame stepping: the current
//! [`FrameStepEstimate`], the [`SnapConfig`] and the calibration state of
//! the loaded media. Nothing here is global, so independent players each get
//! their own controller.

use tracing::{debug, warn};

use super::calibrate::{self, CalibrationConfig, CalibrationReport};
use super::estimate::FrameStepEstimate;
use super::session::PlaybackSession;
use super::snap::{Direction, SnapConfig, SnapMode};
use super::time::clamp_time;

/// Calibration lifecycle of the loaded media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationState {
    /// No media loaded yet
    Unloaded,
    /// Media loaded, using the fallback step
    Uncalibrated,
    /// A calibration run is in flight
    Calibrating,
    /// Using a measured step
    Calibrated,
}

impl CalibrationState {
    pub fn is_loaded(self) -> bool {
        self != Self::Unloaded
    }
}

/// Proof that a calibration run was started for a particular load.
///
/// Results handed back with a ticket from an earlier load are discarded.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "pass the ticket to finish_calibration"]
pub struct CalibrationTicket {
    generation: u64,
}

/// Computes frame step targets for one player.
#[derive(Debug, Clone)]
pub struct SteppingController {
    estimate: FrameStepEstimate,
    snap: SnapConfig,
    calibration: CalibrationConfig,
    state: CalibrationState,
    /// Incremented on every media load
    generation: u64,
}

impl Default for SteppingController {
    fn default() -> Self {
        Self::new(SnapConfig::default(), CalibrationConfig::default())
    }
}

impl SteppingController {
    pub fn new(snap: SnapConfig, calibration: CalibrationConfig) -> Self {
        Self {
            estimate: FrameStepEstimate::fallback(),
            snap,
            calibration,
            state: CalibrationState::Unloaded,
            generation: 0,
        }
    }

    // === Diagnostics ===

    pub fn estimate(&self) -> FrameStepEstimate {
        self.estimate
    }

    pub fn state(&self) -> CalibrationState {
        self.state
    }

    /// Use a known frame step instead of a measured one.
    ///
    /// Reset again by the next [`media_loaded`](Self::media_loaded).
    pub fn set_estimate(&mut self, estimate: FrameStepEstimate) {
        self.estimate = estimate;
    }

    // === Snap configuration ===

    pub fn snap_config(&self) -> SnapConfig {
        self.snap
    }

    pub fn set_snap_config(&mut self, snap: SnapConfig) {
        self.snap = snap;
    }

    pub fn toggle_snap(&mut self) {
        self.snap.enabled = !self.snap.enabled;
    }

    pub fn set_snap_mode(&mut self, mode: SnapMode) {
        self.snap.mode = mode;
    }

    pub fn calibration_config(&self) -> &CalibrationConfig {
        &self.calibration
    }

    // === Media lifecycle ===

    /// A new source was loaded.
    ///
    /// Resets to the fallback step and invalidates any calibration still in
    /// flight for the previous source.
    pub fn media_loaded(&mut self) {
        self.generation += 1;
        self.estimate = FrameStepEstimate::fallback();
        self.state = CalibrationState::Uncalibrated;
        debug!(generation = self.generation, "media loaded, frame step reset");
    }

    /// The source was removed.
    pub fn media_unloaded(&mut self) {
        self.generation += 1;
        self.estimate = FrameStepEstimate::fallback();
        self.state = CalibrationState::Unloaded;
    }

    // === Calibration ===

    /// Start a calibration run for the current source.
    ///
    /// Returns `None` when nothing should run: no media, no frame callback
    /// support, a run already in flight, or already calibrated.
    pub fn begin_calibration(&mut self, supported: bool) -> Option<CalibrationTicket> {
        if !supported || self.state != CalibrationState::Uncalibrated {
            return None;
        }
        self.state = CalibrationState::Calibrating;
        Some(CalibrationTicket {
            generation: self.generation,
        })
    }

    /// Apply a finished run. Returns false if the ticket was stale.
    pub fn finish_calibration(
        &mut self,
        ticket: CalibrationTicket,
        report: &CalibrationReport,
    ) -> bool {
        if ticket.generation != self.generation {
            warn!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding calibration result for a previous source"
            );
            return false;
        }
        self.estimate = report.estimate;
        self.state = if report.estimate.is_calibrated() {
            CalibrationState::Calibrated
        } else {
            CalibrationState::Uncalibrated
        };
        true
    }

    /// Calibrate against `session` if this source still needs it.
    ///
    /// Returns the report of the run, or `None` if no run was started.
    pub async fn calibrate<S: PlaybackSession>(
        &mut self,
        session: &mut S,
    ) -> Option<CalibrationReport> {
        let ticket = self.begin_calibration(session.supports_frame_callbacks())?;
        let report = calibrate::calibrate(session, &self.calibration).await;
        self.finish_calibration(ticket, &report);
        Some(report)
    }

    // === Stepping ===

    /// Target position one frame from `position`, or `None` without a usable
    /// duration.
    pub fn compute_step(
        &self,
        position: f64,
        duration: Option<f64>,
        direction: Direction,
    ) -> Option<f64> {
        let duration = duration.filter(|d| d.is_finite() && *d > 0.0)?;
        let step = self.estimate.effective_step();
        let candidate = clamp_time(position + direction.signum() * step, duration);
        Some(self.snap.apply(candidate, step, duration, direction))
    }

    /// Target for a one-frame step forward.
    pub fn step_forward<S: PlaybackSession>(&self, session: &S) -> Option<f64> {
        self.compute_step(session.position(), session.duration(), Direction::Forward)
    }

    /// Target for a one-frame step backward.
    pub fn step_backward<S: PlaybackSession>(&self, session: &S) -> Option<f64> {
        self.compute_step(session.position(), session.duration(), Direction::Backward)
    }

    /// Step and write the new position into `session`.
    pub fn apply_step<S: PlaybackSession>(
        &self,
        session: &mut S,
        direction: Direction,
    ) -> Option<f64> {
        let target = self.compute_step(session.position(), session.duration(), direction)?;
        session.set_position(target);
        Some(target)
    }
}
