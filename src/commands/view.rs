//! View subcommand handler

use anyhow::{ensure, Context, Result};

use framestep::cli::ViewArgs;
use framestep::logging;
use framestep::player::{run_viewer, ViewerOptions};
use framestep::Config;

/// Open the interactive viewer.
///
/// Logging goes to a file because the viewer owns the terminal.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &ViewArgs, verbose: bool) -> Result<()> {
    let log_path = logging::default_log_path();
    logging::init_file(&log_path, verbose)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let options = options(args, Config::load()?)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start async runtime")?;
    let summary = runtime.block_on(run_viewer(options))?;

    println!(
        "Stopped at {:.6}s (frame step {:.6}s, {})",
        summary.position,
        summary.step_secs,
        if summary.calibrated {
            "measured"
        } else {
            "fallback"
        }
    );
    Ok(())
}

/// Viewer options from the config file with command-line overrides.
pub fn options(args: &ViewArgs, config: Config) -> Result<ViewerOptions> {
    let mut options = ViewerOptions::from_config(config);
    if let Some(fps) = args.fps {
        options.frame_rate = fps;
    }
    if let Some(duration) = args.duration {
        options.duration_secs = duration;
    }
    ensure!(
        options.frame_rate.is_finite() && options.frame_rate > 0.0,
        "frame rate must be positive, got {}",
        options.frame_rate
    );
    ensure!(
        options.duration_secs.is_finite() && options.duration_secs > 0.0,
        "duration must be a positive number of seconds, got {}",
        options.duration_secs
    );
    Ok(options)
}
