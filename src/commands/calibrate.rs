//! Calibrate subcommand handler

use anyhow::{ensure, Context, Result};
use crossterm::style::Stylize;

use framestep::cli::CalibrateArgs;
use framestep::sim::SimulatedSession;
use framestep::step::calibrate;
use framestep::{CalibrationConfig, CalibrationReport, Config};

/// Run a calibration against a simulated video and print the result.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &CalibrateArgs) -> Result<()> {
    let config = Config::load()?;
    let report = run(args, &config.calibration)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_report(&report));
    }
    Ok(())
}

/// Build the simulated session described by `args` and calibrate against it.
pub fn run(args: &CalibrateArgs, config: &CalibrationConfig) -> Result<CalibrationReport> {
    ensure!(
        args.fps.is_finite() && args.fps > 0.0,
        "frame rate must be positive, got {}",
        args.fps
    );
    ensure!(
        args.duration.is_finite() && args.duration > 0.0,
        "duration must be a positive number of seconds, got {}",
        args.duration
    );

    let mut session = SimulatedSession::new(args.fps, args.duration);
    if let Some(every) = args.drop_every {
        session = session.with_dropped_frames(every);
    }
    if args.no_frame_callbacks {
        session = session.without_frame_callbacks();
    }
    if args.block_autoplay {
        session = session.with_autoplay_blocked();
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start async runtime")?;
    Ok(runtime.block_on(calibrate(&mut session, config)))
}

/// Human-readable summary of a report.
pub fn format_report(report: &CalibrationReport) -> String {
    let estimate = report.estimate;
    let mut out = format!(
        "frame step: {:.6}s ({:.2} fps)\n",
        estimate.seconds(),
        estimate.frames_per_second()
    );
    let calibrated = if estimate.is_calibrated() {
        "yes".green().to_string()
    } else {
        "no".yellow().to_string()
    };
    out.push_str(&format!("calibrated: {}\n", calibrated));
    out.push_str(&format!(
        "samples: {} kept, {} rejected ({} frames{})\n",
        report.samples_kept,
        report.samples_rejected,
        report.frames_observed,
        if report.timed_out { ", timed out" } else { "" }
    ));
    if let Some(reason) = report.fallback {
        out.push_str(&format!("fallback: {}\n", reason.description()));
    }
    out
}
