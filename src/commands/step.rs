//! Step subcommand handler

use anyhow::{ensure, Result};

use framestep::cli::StepArgs;
use framestep::step::FALLBACK_STEP_SECS;
use framestep::{CalibrationConfig, Config, Direction, FrameStepEstimate, SteppingController};

/// Compute one frame step and print the target position.
pub fn handle(args: &StepArgs) -> Result<()> {
    let target = compute(args, &Config::load()?)?;
    println!("{:.6}", target);
    Ok(())
}

/// The target position for `args`, using `config` for unset snap settings.
pub fn compute(args: &StepArgs, config: &Config) -> Result<f64> {
    ensure!(
        args.duration.is_finite() && args.duration > 0.0,
        "duration must be a positive number of seconds, got {}",
        args.duration
    );
    ensure!(
        args.position.is_finite(),
        "position must be a finite number of seconds"
    );

    let snap = args.snap.map(Into::into).unwrap_or(config.snap);
    let mut controller = SteppingController::new(snap, CalibrationConfig::default());
    if let Some(step) = args.step {
        ensure!(
            step.is_finite() && step > 0.0,
            "frame step must be a positive number of seconds, got {}",
            step
        );
        controller.set_estimate(FrameStepEstimate::measured(step));
    }

    let direction = if args.backward {
        Direction::Backward
    } else {
        Direction::Forward
    };
    tracing::debug!(
        position = args.position,
        duration = args.duration,
        step = args.step.unwrap_or(FALLBACK_STEP_SECS),
        ?direction,
        "computing step"
    );

    controller
        .compute_step(args.position, Some(args.duration), direction)
        .ok_or_else(|| anyhow::anyhow!("media duration is unknown"))
}
