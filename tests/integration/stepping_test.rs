//! Integration tests for frame stepping and grid snapping

use super::helpers::{assert_close, StillPlayer};
use framestep::step::{
    snap_directional, snap_nearest, Direction, FrameStepEstimate, SnapConfig, SnapMode,
    SteppingController, FALLBACK_STEP_SECS,
};
use framestep::CalibrationConfig;

fn controller(snap: SnapConfig) -> SteppingController {
    let mut controller = SteppingController::new(snap, CalibrationConfig::default());
    controller.media_loaded();
    controller
}

#[test]
fn forward_step_without_snap_adds_one_fallback_frame() {
    let controller = controller(SnapConfig::disabled());
    let player = StillPlayer::at(5.0, 10.0);

    assert_eq!(controller.step_forward(&player), Some(5.033333));
}

#[test]
fn backward_step_from_start_stays_at_zero() {
    let player = StillPlayer::at(0.0, 10.0);
    for mode in [SnapMode::Nearest, SnapMode::Directional] {
        let controller = controller(SnapConfig::with_mode(mode));
        assert_eq!(controller.step_backward(&player), Some(0.0), "{}", mode);
    }
}

#[test]
fn forward_step_near_end_lands_on_duration() {
    let player = StillPlayer::at(9.99, 10.0);
    for snap in [
        SnapConfig::disabled(),
        SnapConfig::with_mode(SnapMode::Nearest),
        SnapConfig::with_mode(SnapMode::Directional),
    ] {
        assert_eq!(controller(snap).step_forward(&player), Some(10.0));
    }
}

#[test]
fn unknown_duration_yields_no_target() {
    let controller = controller(SnapConfig::default());
    let mut player = StillPlayer::at(1.0, 10.0);
    player.duration = None;

    assert_eq!(controller.step_forward(&player), None);
    assert_eq!(controller.step_backward(&player), None);
}

#[test]
fn apply_step_moves_the_player() {
    let mut controller = controller(SnapConfig::with_mode(SnapMode::Nearest));
    controller.set_estimate(FrameStepEstimate::measured(0.04));
    let mut player = StillPlayer::at(1.0, 10.0);

    let target = controller.apply_step(&mut player, Direction::Forward);
    assert_eq!(target, Some(1.04));
    assert_eq!(player.position, 1.04);
    let target = controller.apply_step(&mut player, Direction::Backward);
    assert_eq!(target, Some(1.0));
    assert_eq!(player.position, 1.0);
}

#[test]
fn forward_then_backward_stays_within_one_step() {
    let duration = 10.0;
    for step in [FALLBACK_STEP_SECS, 1.0 / 24.0, 1.0 / 60.0, 0.1] {
        let mut controller = controller(SnapConfig::with_mode(SnapMode::Nearest));
        controller.set_estimate(FrameStepEstimate::measured(step));

        let mut p = 0.0;
        while p <= duration - 2.0 * step {
            let mut player = StillPlayer::at(p, duration);
            let forward = controller.step_forward(&player).unwrap();
            player.position = forward;
            let back = controller.step_backward(&player).unwrap();

            assert!(
                (back - p).abs() <= step + 1e-6,
                "p={} step={} forward={} back={}",
                p,
                step,
                forward,
                back
            );
            p += 0.0137;
        }
    }
}

#[test]
fn directional_steps_are_monotonic() {
    let duration = 3.0;
    let mut controller = controller(SnapConfig::with_mode(SnapMode::Directional));
    controller.set_estimate(FrameStepEstimate::measured(1.0 / 24.0));

    for i in 0..=310 {
        let p = (i as f64 * 0.0097).min(duration);
        let player = StillPlayer::at(p, duration);

        let forward = controller.step_forward(&player).unwrap();
        let backward = controller.step_backward(&player).unwrap();

        if p < duration {
            assert!(forward > p, "forward {} not after {}", forward, p);
        } else {
            assert_eq!(forward, duration);
        }
        if p > 0.0 {
            assert!(backward < p, "backward {} not before {}", backward, p);
        } else {
            assert_eq!(backward, 0.0);
        }
    }
}

#[test]
fn repeated_stepping_does_not_drift() {
    let mut controller = controller(SnapConfig::with_mode(SnapMode::Nearest));
    controller.set_estimate(FrameStepEstimate::measured(1.0 / 24.0));
    let mut player = StillPlayer::at(0.0, 600.0);

    for _ in 0..240 {
        controller.apply_step(&mut player, Direction::Forward);
    }
    assert_close(player.position, 10.0, 1e-6);

    for _ in 0..240 {
        controller.apply_step(&mut player, Direction::Backward);
    }
    assert_eq!(player.position, 0.0);
}

#[test]
fn snapping_is_idempotent() {
    let duration = 7.5;
    for step in [1.0 / 24.0, 1.0 / 30.0, 0.04] {
        let mut t = -0.5;
        while t < duration + 0.5 {
            let once = snap_nearest(t, step, duration);
            let twice = snap_nearest(once, step, duration);
            assert_eq!(twice, once, "t={} step={}", t, step);

            for direction in [Direction::Forward, Direction::Backward] {
                let once = snap_directional(t, step, duration, direction);
                assert!((0.0..=duration).contains(&once));
            }
            t += 0.0213;
        }
    }
}

#[test]
fn independent_controllers_do_not_share_settings() {
    let mut first = controller(SnapConfig::default());
    let second = controller(SnapConfig::default());

    first.toggle_snap();
    first.set_estimate(FrameStepEstimate::measured(0.05));

    assert!(!first.snap_config().enabled);
    assert!(second.snap_config().enabled);
    assert_eq!(second.estimate(), FrameStepEstimate::fallback());
}
