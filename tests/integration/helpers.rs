//! Shared helpers for integration tests

use assert_cmd::Command;
use tempfile::TempDir;

use framestep::step::{FrameStepEstimate, PlaybackSession};

/// Fresh home directory so tests never touch the real config file.
pub fn temp_home() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// The framestep binary with its config directory inside `home`.
pub fn framestep_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("framestep").expect("binary should be built");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("FRAMESTEP_LOG");
    cmd
}

/// Assert two times are equal within `tolerance`.
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} to be within {} of {}",
        actual,
        tolerance,
        expected
    );
}

/// Minimal host player with a position and a duration.
#[derive(Debug, Clone)]
pub struct StillPlayer {
    pub position: f64,
    pub duration: Option<f64>,
    pub paused: bool,
}

impl StillPlayer {
    pub fn at(position: f64, duration: f64) -> Self {
        Self {
            position,
            duration: Some(duration),
            paused: true,
        }
    }
}

impl PlaybackSession for StillPlayer {
    fn position(&self) -> f64 {
        self.position
    }

    fn set_position(&mut self, seconds: f64) {
        self.position = seconds;
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    async fn play(&mut self) -> Result<(), framestep::step::SessionError> {
        self.paused = false;
        Ok(())
    }

    fn is_muted(&self) -> bool {
        false
    }

    fn set_muted(&mut self, _muted: bool) {}

    fn playback_rate(&self) -> f64 {
        1.0
    }

    fn set_playback_rate(&mut self, _rate: f64) {}

    fn supports_frame_callbacks(&self) -> bool {
        false
    }

    async fn next_frame(&mut self) -> Option<framestep::step::FrameMetadata> {
        None
    }
}

/// The estimate a calibration with a single sample `m` would produce.
pub fn estimate_from(m: f64) -> FrameStepEstimate {
    FrameStepEstimate::from_samples(&mut [m])
}
