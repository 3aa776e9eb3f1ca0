//! Status bar rendering for the terminal viewer.
//!
//! Displays playback state, the frame step in use, snap settings, and
//! keyboard shortcuts.

use std::io::{self, Write};

use anyhow::Result;

use crate::step::{CalibrationState, FrameStepEstimate, SnapConfig};

/// Everything the status bar shows.
#[derive(Debug, Clone, Copy)]
pub struct StatusInfo {
    pub paused: bool,
    pub estimate: FrameStepEstimate,
    pub calibration: CalibrationState,
    pub snap: SnapConfig,
}

/// Short label for the calibration state.
pub fn calibration_label(state: CalibrationState) -> &'static str {
    match state {
        CalibrationState::Unloaded => "no media",
        CalibrationState::Uncalibrated => "fallback",
        CalibrationState::Calibrating => "calibrating",
        CalibrationState::Calibrated => "measured",
    }
}

/// Step size in milliseconds with the implied frame rate, e.g. `41.667ms (24.00fps)`.
pub fn format_step(estimate: &FrameStepEstimate) -> String {
    format!(
        "{:.3}ms ({:.2}fps)",
        estimate.effective_step() * 1000.0,
        estimate.frames_per_second()
    )
}

/// Render a separator line.
///
/// # Arguments
/// * `stdout` - The stdout handle to write to
/// * `width` - Terminal width
/// * `row` - Row to render at (0-indexed)
pub fn render_separator_line(stdout: &mut io::Stdout, width: u16, row: u16) -> Result<()> {
    // Build line as string to minimize syscalls
    let mut output = String::with_capacity(width as usize + 20);
    output.push_str(&format!("\x1b[{};1H\x1b[90m", row + 1)); // Move + dark gray
    output.push_str(&"─".repeat(width as usize));
    output.push_str("\x1b[0m"); // Reset
    write!(stdout, "{}", output)?;
    Ok(())
}

/// Build the status bar text and its visible width.
pub fn build_status_bar(info: &StatusInfo) -> (String, usize) {
    // ANSI color codes
    const WHITE: &str = "\x1b[97m";
    const GREEN: &str = "\x1b[32m";
    const YELLOW: &str = "\x1b[33m";
    const DARK_GREY: &str = "\x1b[90m";
    const CYAN: &str = "\x1b[36m";

    let mut output = String::with_capacity(256);
    let mut visible_len: usize = 0; // Track visible width manually

    output.push_str(WHITE);
    output.push(' ');
    visible_len += 1;

    // State icon (▶ and ⏸ are double-width unicode)
    let state = if info.paused { "▶  " } else { "⏸  " };
    output.push_str(state);
    visible_len += 4; // icon (2) + 2 spaces

    output.push_str(DARK_GREY);
    output.push_str("step:");
    visible_len += 5;
    output.push_str(WHITE);
    let step_str = format!("{} ", format_step(&info.estimate));
    visible_len += step_str.len();
    output.push_str(&step_str);

    let label = calibration_label(info.calibration);
    let label_color = if info.estimate.is_calibrated() {
        GREEN
    } else {
        YELLOW
    };
    output.push_str(label_color);
    output.push_str(&format!("[{}] ", label));
    visible_len += label.len() + 3;

    output.push_str(DARK_GREY);
    output.push_str("snap:");
    visible_len += 5;
    output.push_str(WHITE);
    let snap_str = if info.snap.enabled {
        format!("{} ", info.snap.mode)
    } else {
        "off ".to_string()
    };
    visible_len += snap_str.len();
    output.push_str(&snap_str);

    let play_action = if info.paused { ":play " } else { ":pause " };
    output.push_str(DARK_GREY);
    output.push_str("│ ");
    visible_len += 2;
    for (key, action) in [
        ("space", play_action),
        ("</>", ":frame "),
        ("s", ":snap "),
        ("d", ":mode "),
        ("?", ":hlp "),
        ("q", ":quit"),
    ] {
        output.push_str(CYAN);
        output.push_str(key);
        output.push_str(DARK_GREY);
        output.push_str(action);
        visible_len += key.len() + action.len();
    }

    (output, visible_len)
}

/// Render the status/controls bar.
///
/// # Arguments
/// * `stdout` - The stdout handle to write to
/// * `width` - Terminal width
/// * `row` - Row to render at (0-indexed)
/// * `info` - What to display
pub fn render_status_bar(
    stdout: &mut io::Stdout,
    width: u16,
    row: u16,
    info: &StatusInfo,
) -> Result<()> {
    const RESET: &str = "\x1b[0m";

    let (text, visible_len) = build_status_bar(info);

    let mut output = String::with_capacity(text.len() + width as usize + 16);
    output.push_str(&format!("\x1b[{};1H", row + 1));
    output.push_str(&text);

    // Pad to full width to overwrite any leftover content
    let padding = (width as usize).saturating_sub(visible_len);
    output.push_str(&" ".repeat(padding));

    output.push_str(RESET);
    write!(stdout, "{}", output)?;

    Ok(())
}
