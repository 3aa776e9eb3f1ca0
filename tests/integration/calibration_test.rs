//! Integration tests for frame step calibration

use std::time::Duration;

use super::helpers::{assert_close, estimate_from};
use framestep::sim::{ScriptedSession, SimulatedSession};
use framestep::step::{
    calibrate, CalibrationState, FallbackReason, FrameStepEstimate, PlaybackSession,
};
use framestep::step::{MAX_STEP_SECS, MIN_STEP_SECS};
use framestep::{CalibrationConfig, SnapConfig, SteppingController};

fn loaded_controller() -> SteppingController {
    let mut controller = SteppingController::default();
    controller.media_loaded();
    controller
}

#[tokio::test(start_paused = true)]
async fn outlier_delta_is_dropped_before_the_median() {
    let mut session = ScriptedSession::from_deltas(&[0.0330, 0.0331, 0.0329, 0.0335, 0.35]);
    let mut controller = loaded_controller();

    let report = controller.calibrate(&mut session).await.unwrap();

    assert_eq!(report.samples_kept, 4);
    assert_eq!(report.samples_rejected, 1);
    assert!(report.fallback.is_none());
    // Sorted [0.0329, 0.0330, 0.0331, 0.0335], element at len / 2
    assert_close(controller.estimate().seconds(), 0.0331, 1e-9);
    assert!(controller.estimate().is_calibrated());
    assert_eq!(controller.state(), CalibrationState::Calibrated);
}

#[tokio::test(start_paused = true)]
async fn stall_below_filter_limit_does_not_move_the_median() {
    // 0.15s is under the 0.2s filter, so it is kept, but the median ignores it
    let mut session = ScriptedSession::from_deltas(&[0.0330, 0.0331, 0.0329, 0.0335, 0.15]);

    let report = calibrate(&mut session, &CalibrationConfig::default()).await;

    assert_eq!(report.samples_kept, 5);
    assert_close(report.estimate.seconds(), 0.0331, 1e-9);
}

#[tokio::test(start_paused = true)]
async fn missing_frame_callbacks_keep_the_fallback() {
    let mut session = SimulatedSession::new(24.0, 10.0).without_frame_callbacks();
    let mut controller = loaded_controller();

    assert!(controller.calibrate(&mut session).await.is_none());
    assert_eq!(controller.estimate(), FrameStepEstimate::fallback());
    assert!(!controller.estimate().is_calibrated());
    assert_close(controller.estimate().effective_step(), 0.033333, 1e-6);
    assert_eq!(controller.state(), CalibrationState::Uncalibrated);

    let report = calibrate(&mut session, &CalibrationConfig::default()).await;
    assert_eq!(report.fallback, Some(FallbackReason::Unsupported));
    assert!(session.is_paused());
}

#[tokio::test(start_paused = true)]
async fn measures_simulated_frame_rate() {
    let mut session = SimulatedSession::new(30.0, 10.0);
    session.set_position(2.0);
    let mut controller = loaded_controller();

    let report = controller.calibrate(&mut session).await.unwrap();

    assert_eq!(report.frames_observed, 12);
    assert_eq!(report.samples_kept, 11);
    assert!(!report.timed_out);
    assert_close(controller.estimate().seconds(), 1.0 / 30.0, 1e-9);
    assert!(controller.estimate().is_calibrated());

    // Invisible to the viewer
    assert!(session.is_paused());
    assert_eq!(session.position(), 2.0);
    assert!(!session.is_muted());
    assert_eq!(session.playback_rate(), 1.0);
}

#[tokio::test(start_paused = true)]
async fn dropped_frames_do_not_skew_the_estimate() {
    let mut session = SimulatedSession::new(25.0, 10.0).with_dropped_frames(4);
    let mut controller = loaded_controller();

    let report = controller.calibrate(&mut session).await.unwrap();

    assert!(report.samples_kept > 0);
    assert_close(controller.estimate().seconds(), 0.04, 1e-9);
}

#[tokio::test(start_paused = true)]
async fn restores_playback_that_was_running() {
    let mut session = SimulatedSession::new(30.0, 10.0);
    session.set_playback_rate(2.0);
    session.set_muted(false);
    session.play().await.unwrap();

    let report = calibrate(&mut session, &CalibrationConfig::default()).await;

    assert!(report.estimate.is_calibrated());
    assert!(!session.is_paused());
    assert_eq!(session.playback_rate(), 2.0);
    assert!(!session.is_muted());
}

#[tokio::test(start_paused = true)]
async fn frames_are_sampled_muted_at_normal_speed() {
    let mut session = ScriptedSession::from_deltas(&[0.04; 5]);
    session.set_playback_rate(0.5);
    let mut controller = loaded_controller();

    let report = controller.calibrate(&mut session).await.unwrap();

    assert_eq!(report.frames_observed, 6);
    // Six frames plus the request left pending when the timeout fired
    let requests = session.frame_requests();
    assert_eq!(requests.len(), 7);
    assert!(requests.iter().all(|&request| request == (true, 1.0)));

    assert!(!session.is_muted());
    assert_eq!(session.playback_rate(), 0.5);
}

#[tokio::test(start_paused = true)]
async fn rejected_playback_falls_back() {
    let mut session = SimulatedSession::new(30.0, 10.0).with_autoplay_blocked();
    let mut controller = loaded_controller();

    let report = controller.calibrate(&mut session).await.unwrap();

    assert_eq!(report.fallback, Some(FallbackReason::PlaybackStartFailure));
    assert!(report.timed_out);
    assert_eq!(controller.estimate(), FrameStepEstimate::fallback());
    assert_eq!(controller.state(), CalibrationState::Uncalibrated);
}

#[tokio::test(start_paused = true)]
async fn calibration_is_bounded_by_the_timeout() {
    // Two frames, then the script stalls
    let mut session = ScriptedSession::from_deltas(&[0.02]);
    let config = CalibrationConfig {
        timeout_ms: 250,
        ..CalibrationConfig::default()
    };
    let started = tokio::time::Instant::now();

    let report = calibrate(&mut session, &config).await;

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(250), "{:?}", elapsed);
    assert!(elapsed < Duration::from_millis(300), "{:?}", elapsed);
    assert!(report.timed_out);
    assert_eq!(report.frames_observed, 2);
    assert_close(report.estimate.seconds(), 0.02, 1e-9);
}

#[tokio::test(start_paused = true)]
async fn estimates_are_clamped() {
    let mut slow = ScriptedSession::from_deltas(&[0.15, 0.15, 0.15]);
    let report = calibrate(&mut slow, &CalibrationConfig::default()).await;
    assert_eq!(report.estimate.seconds(), MAX_STEP_SECS);

    let mut fast = ScriptedSession::from_deltas(&[0.001, 0.001, 0.001]);
    let report = calibrate(&mut fast, &CalibrationConfig::default()).await;
    assert_eq!(report.estimate.seconds(), MIN_STEP_SECS);
}

#[test]
fn any_median_lands_in_range() {
    for m in [1e-6, 0.004, MIN_STEP_SECS, 0.099, MAX_STEP_SECS, 3.0] {
        let estimate = estimate_from(m);
        assert!(estimate.is_calibrated());
        assert!(
            (MIN_STEP_SECS..=MAX_STEP_SECS).contains(&estimate.seconds()),
            "median {} gave {}",
            m,
            estimate.seconds()
        );
    }
}

#[tokio::test(start_paused = true)]
async fn reload_permits_recalibration() {
    let mut session = SimulatedSession::new(30.0, 10.0);
    let mut controller = loaded_controller();

    assert!(controller.calibrate(&mut session).await.is_some());
    // Already calibrated for this source
    assert!(controller.calibrate(&mut session).await.is_none());

    session = SimulatedSession::new(24.0, 10.0);
    controller.media_loaded();
    assert_eq!(controller.estimate(), FrameStepEstimate::fallback());

    assert!(controller.calibrate(&mut session).await.is_some());
    assert_close(controller.estimate().seconds(), 1.0 / 24.0, 1e-9);
}

#[tokio::test(start_paused = true)]
async fn result_for_a_replaced_source_is_discarded() {
    let mut session = SimulatedSession::new(30.0, 10.0);
    let mut controller =
        SteppingController::new(SnapConfig::default(), CalibrationConfig::default());
    controller.media_loaded();

    let ticket = controller.begin_calibration(true).unwrap();
    let report = calibrate(&mut session, controller.calibration_config()).await;
    controller.media_loaded();

    assert!(!controller.finish_calibration(ticket, &report));
    assert_eq!(controller.estimate(), FrameStepEstimate::fallback());
    assert_eq!(controller.state(), CalibrationState::Uncalibrated);
}
