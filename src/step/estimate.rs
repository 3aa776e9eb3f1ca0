//! Frame step estimate.
//!
//! The believed duration of one video frame, either measured from live
//! playback or the 30 fps fallback.

use serde::Serialize;

/// Step used until calibration succeeds (30 fps).
pub const FALLBACK_STEP_SECS: f64 = 1.0 / 30.0;

/// Shortest calibrated step (120 fps).
pub const MIN_STEP_SECS: f64 = 1.0 / 120.0;

/// Longest calibrated step (10 fps).
pub const MAX_STEP_SECS: f64 = 1.0 / 10.0;

/// Estimated duration of a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameStepEstimate {
    seconds: f64,
    calibrated: bool,
}

impl Default for FrameStepEstimate {
    fn default() -> Self {
        Self::fallback()
    }
}

impl FrameStepEstimate {
    /// The uncalibrated 1/30 s estimate.
    pub const fn fallback() -> Self {
        Self {
            seconds: FALLBACK_STEP_SECS,
            calibrated: false,
        }
    }

    /// A measured estimate, clamped to `[MIN_STEP_SECS, MAX_STEP_SECS]`.
    ///
    /// Returns the fallback for a non-finite measurement.
    pub fn measured(seconds: f64) -> Self {
        if !seconds.is_finite() {
            return Self::fallback();
        }
        Self {
            seconds: seconds.clamp(MIN_STEP_SECS, MAX_STEP_SECS),
            calibrated: true,
        }
    }

    /// Build an estimate from frame deltas using their median.
    ///
    /// Sorts `samples` in place. The median is the element at `len / 2`
    /// (the upper middle for even counts). Empty input yields the fallback.
    pub fn from_samples(samples: &mut [f64]) -> Self {
        if samples.is_empty() {
            return Self::fallback();
        }
        samples.sort_by(|a, b| a.total_cmp(b));
        Self::measured(samples[samples.len() / 2])
    }

    /// Stored step in seconds.
    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Whether the step was measured from playback.
    pub fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    /// The step to use for seeking. Always finite and strictly positive.
    pub fn effective_step(&self) -> f64 {
        if self.seconds.is_finite() && self.seconds > 0.0 {
            self.seconds
        } else {
            FALLBACK_STEP_SECS
        }
    }

    /// Frames per second implied by the step.
    pub fn frames_per_second(&self) -> f64 {
        1.0 / self.effective_step()
    }
}
