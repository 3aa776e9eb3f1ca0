//! Frame grid snapping.
//!
//! Given a step size (the estimated duration of one frame) the frame grid is
//! the set of multiples of that step. Seek targets can be moved onto the grid
//! either symmetrically ([`snap_nearest`]) or in the direction of travel
//! ([`snap_directional`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::estimate::FALLBACK_STEP_SECS;
use super::time::{clamp_time, finalize};

/// Direction of a step request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    /// -1.0 for backward, +1.0 for forward.
    pub fn signum(self) -> f64 {
        match self {
            Self::Backward => -1.0,
            Self::Forward => 1.0,
        }
    }
}

/// How seek targets are moved onto the frame grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapMode {
    /// Round to the closest grid line. Best for generic scrubbing.
    #[default]
    Nearest,
    /// Floor when going backward, ceil when going forward, so a step never
    /// rounds back onto the point it started from.
    Directional,
}

impl SnapMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Nearest => Self::Directional,
            Self::Directional => Self::Nearest,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Directional => "directional",
        }
    }
}

impl fmt::Display for SnapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SnapMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "directional" => Ok(Self::Directional),
            other => Err(format!(
                "unknown snap mode '{}' (expected 'nearest' or 'directional')",
                other
            )),
        }
    }
}

/// Snapping configuration for one player instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Whether step results are snapped at all
    pub enabled: bool,
    /// Snap algorithm used when enabled
    pub mode: SnapMode,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: SnapMode::Nearest,
        }
    }
}

impl SnapConfig {
    /// Snapping turned off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Snapping on with the given mode.
    pub fn with_mode(mode: SnapMode) -> Self {
        Self {
            enabled: true,
            mode,
        }
    }

    /// Snap `t` according to this configuration.
    ///
    /// When disabled, `t` is only clamped and rounded.
    pub fn apply(&self, t: f64, step: f64, duration: f64, direction: Direction) -> f64 {
        if !self.enabled {
            return finalize(t, duration);
        }
        match self.mode {
            SnapMode::Nearest => snap_nearest(t, step, duration),
            SnapMode::Directional => snap_directional(t, step, duration, direction),
        }
    }
}

fn usable_step(step: f64) -> f64 {
    if step.is_finite() && step > 0.0 {
        step
    } else {
        FALLBACK_STEP_SECS
    }
}

/// Snap `t` to the nearest multiple of `step` within `[0, duration]`.
pub fn snap_nearest(t: f64, step: f64, duration: f64) -> f64 {
    let step = usable_step(step);
    let clamped = clamp_time(t, duration);
    finalize((clamped / step).round() * step, duration)
}

/// Snap `t` to the grid, flooring for [`Direction::Backward`] and ceiling for
/// [`Direction::Forward`].
pub fn snap_directional(t: f64, step: f64, duration: f64, direction: Direction) -> f64 {
    let step = usable_step(step);
    let ratio = clamp_time(t, duration) / step;
    let snapped = match direction {
        Direction::Backward => ratio.floor() * step,
        Direction::Forward => ratio.ceil() * step,
    };
    finalize(snapped, duration)
}
