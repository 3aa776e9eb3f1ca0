//! Frame step calibration.
//!
//! Players that cannot seek by frame index still report the media time of
//! every presented frame. Watching a short burst of live playback and taking
//! the median gap between consecutive frames gives a good estimate of the
//! real frame duration.
//!
//! Calibration is best-effort: every failure (no frame notifications, a
//! rejected `play()`, nothing arriving before the timeout) degrades to the
//! fallback estimate and is only recorded in the returned report.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::estimate::FrameStepEstimate;
use super::session::PlaybackSession;

/// Tunables for one calibration run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Stop after this many frame notifications
    pub max_frames: u32,
    /// Wall-clock budget for sample collection (milliseconds)
    pub timeout_ms: u64,
    /// Deltas at or above this many seconds are discarded (seeks, stalls)
    pub max_delta_secs: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            max_frames: 12,
            timeout_ms: 500,
            max_delta_secs: 0.2,
        }
    }
}

impl CalibrationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Why a calibration run ended on the fallback estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// The session cannot deliver frame notifications
    Unsupported,
    /// `play()` was rejected and no frames arrived
    PlaybackStartFailure,
    /// The timeout fired before any usable delta was seen
    Timeout,
    /// The frame source ended without a usable delta
    NoSamples,
}

impl FallbackReason {
    pub fn description(self) -> &'static str {
        match self {
            Self::Unsupported => "frame callbacks unsupported",
            Self::PlaybackStartFailure => "playback could not be started",
            Self::Timeout => "timed out before a usable frame interval",
            Self::NoSamples => "no usable frame interval",
        }
    }
}

/// Outcome of a calibration run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationReport {
    pub estimate: FrameStepEstimate,
    /// Frame notifications received
    pub frames_observed: u32,
    /// Deltas kept in the sample buffer
    pub samples_kept: usize,
    /// Deltas discarded by the filter
    pub samples_rejected: usize,
    /// Whether collection was cut short by the timeout
    pub timed_out: bool,
    pub fallback: Option<FallbackReason>,
}

impl CalibrationReport {
    fn unsupported() -> Self {
        Self {
            estimate: FrameStepEstimate::fallback(),
            frames_observed: 0,
            samples_kept: 0,
            samples_rejected: 0,
            timed_out: false,
            fallback: Some(FallbackReason::Unsupported),
        }
    }
}

/// Ordered deltas between consecutive frame media times.
#[derive(Debug, Default)]
pub struct SampleBuffer {
    max_delta: f64,
    samples: Vec<f64>,
    rejected: usize,
}

impl SampleBuffer {
    pub fn new(max_delta: f64) -> Self {
        Self {
            max_delta,
            samples: Vec::new(),
            rejected: 0,
        }
    }

    /// Record a delta. Returns whether it passed the filter.
    pub fn push(&mut self, delta: f64) -> bool {
        if delta > 0.0 && delta < self.max_delta {
            self.samples.push(delta);
            true
        } else {
            self.rejected += 1;
            false
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Consume the buffer into an estimate (median, clamped).
    pub fn into_estimate(mut self) -> FrameStepEstimate {
        FrameStepEstimate::from_samples(&mut self.samples)
    }
}

/// Session state captured before calibration and restored afterwards.
#[derive(Debug, Clone, Copy)]
struct SavedPlayback {
    paused: bool,
    position: f64,
    muted: bool,
    rate: f64,
}

impl SavedPlayback {
    fn capture<S: PlaybackSession>(session: &S) -> Self {
        Self {
            paused: session.is_paused(),
            position: session.position(),
            muted: session.is_muted(),
            rate: session.playback_rate(),
        }
    }

    fn restore<S: PlaybackSession>(self, session: &mut S) {
        if self.paused {
            session.pause();
        }
        session.set_position(self.position);
        session.set_muted(self.muted);
        session.set_playback_rate(self.rate);
    }
}

#[derive(Debug, Default)]
struct Progress {
    frames: u32,
    play_rejected: bool,
}

async fn collect_samples<S: PlaybackSession>(
    session: &mut S,
    config: &CalibrationConfig,
    buffer: &mut SampleBuffer,
    progress: &mut Progress,
) {
    if session.is_paused() {
        if let Err(e) = session.play().await {
            debug!("calibration: {}", e);
            progress.play_rejected = true;
        }
    }

    let mut last_media_time: Option<f64> = None;
    while progress.frames < config.max_frames {
        let Some(frame) = session.next_frame().await else {
            debug!("calibration: frame source ended");
            break;
        };
        if let Some(last) = last_media_time {
            let delta = frame.media_time - last;
            if !buffer.push(delta) {
                debug!(delta, "calibration: discarded delta");
            }
        }
        last_media_time = Some(frame.media_time);
        progress.frames += 1;
    }
}

/// Measure the frame step of the media loaded in `session`.
///
/// Mutes and forces 1x rate, starts playback if paused, then collects frame
/// notifications until `max_frames` arrive or the timeout fires. The
/// session's pause state, position, mute flag and rate are restored exactly
/// before returning.
///
/// Without frame notification support this is a no-op returning the
/// fallback estimate.
pub async fn calibrate<S: PlaybackSession>(
    session: &mut S,
    config: &CalibrationConfig,
) -> CalibrationReport {
    if !session.supports_frame_callbacks() {
        debug!("calibration: frame callbacks unsupported, keeping fallback step");
        return CalibrationReport::unsupported();
    }

    let saved = SavedPlayback::capture(session);
    session.set_muted(true);
    session.set_playback_rate(1.0);

    let mut buffer = SampleBuffer::new(config.max_delta_secs);
    let mut progress = Progress::default();
    let timed_out = tokio::time::timeout(
        config.timeout(),
        collect_samples(session, config, &mut buffer, &mut progress),
    )
    .await
    .is_err();

    saved.restore(session);

    let samples_kept = buffer.len();
    let samples_rejected = buffer.rejected();
    let fallback = if !buffer.is_empty() {
        None
    } else if progress.play_rejected && progress.frames == 0 {
        Some(FallbackReason::PlaybackStartFailure)
    } else if timed_out {
        Some(FallbackReason::Timeout)
    } else {
        Some(FallbackReason::NoSamples)
    };
    let estimate = buffer.into_estimate();

    match fallback {
        None => info!(
            step = estimate.seconds(),
            fps = estimate.frames_per_second(),
            samples = samples_kept,
            "calibrated frame step"
        ),
        Some(reason) => info!(?reason, "calibration fell back to default frame step"),
    }

    CalibrationReport {
        estimate,
        frames_observed: progress.frames,
        samples_kept,
        samples_rejected,
        timed_out,
        fallback,
    }
}
