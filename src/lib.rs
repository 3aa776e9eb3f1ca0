//! framestep - calibrated frame stepping for video players
//!
//! Players that can only seek by time cannot step exactly one frame unless
//! they know how long a frame lasts. This crate measures that duration from
//! live playback, snaps seek targets onto the resulting frame grid, and
//! ships a terminal viewer plus CLI to exercise both.

pub mod cli;
pub mod config;
pub mod logging;
pub mod player;
pub mod sim;
pub mod step;

use std::sync::OnceLock;

pub use config::Config;
pub use step::{
    CalibrationConfig, CalibrationReport, Direction, FrameStepEstimate, PlaybackSession,
    SnapConfig, SnapMode, SteppingController,
};

/// Version string shown by `--version`.
///
/// Dev builds append the git commit, release builds only the build date.
pub fn version_string() -> &'static str {
    static VERSION: OnceLock<String> = OnceLock::new();
    VERSION.get_or_init(|| {
        let version = env!("CARGO_PKG_VERSION");
        let date = option_env!("FRAMESTEP_BUILD_DATE").unwrap_or("unknown");
        match option_env!("VERGEN_GIT_SHA") {
            Some(sha) => format!("{} ({} {})", version, short_sha(sha), date),
            None => format!("{} ({})", version, date),
        }
    })
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
