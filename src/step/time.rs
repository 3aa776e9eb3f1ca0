//! Time helpers for turning raw seek targets into valid positions.
//!
//! Every position handed back to a playback session goes through
//! [`finalize`], which keeps it inside `[0, duration]` and rounded to
//! [`DECIMAL_PLACES`] so repeated stepping does not accumulate float drift.

/// Number of decimal places seek targets are rounded to.
pub const DECIMAL_PLACES: i32 = 6;

const ROUNDING_SCALE: f64 = 1_000_000.0;

/// Clamp `t` into `[0, duration]`.
///
/// NaN collapses to 0. A non-positive or NaN duration yields 0.
pub fn clamp_time(t: f64, duration: f64) -> f64 {
    let upper = if duration.is_nan() {
        0.0
    } else {
        duration.max(0.0)
    };
    if t.is_nan() {
        return 0.0;
    }
    t.clamp(0.0, upper)
}

/// Round to [`DECIMAL_PLACES`] decimal places.
pub fn round_time(t: f64) -> f64 {
    (t * ROUNDING_SCALE).round() / ROUNDING_SCALE
}

/// Clamp, round, then clamp again.
///
/// The second clamp only matters when rounding pushes the value past
/// `duration`; in that case `duration` itself is returned as is. A duration
/// with more than six decimals is then the one result that is not rounded.
pub fn finalize(t: f64, duration: f64) -> f64 {
    clamp_time(round_time(clamp_time(t, duration)), duration)
}

/// Map a timeline ratio (0.0 = start, 1.0 = end) to a position.
///
/// Used for click-to-seek; the result is not snapped to the frame grid.
pub fn position_from_ratio(ratio: f64, duration: f64) -> f64 {
    let ratio = if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    };
    finalize(ratio * duration, duration)
}
