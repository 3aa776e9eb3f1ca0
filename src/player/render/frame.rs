//! Frame panel rendering for the terminal viewer.
//!
//! The simulated video has no pixels, so the content area shows what a
//! frame-accurate viewer cares about: the position, the frame it maps to on
//! the estimated grid, and the last step target.

use std::io::{self, Write};

use anyhow::Result;

use super::progress::format_precise;
use crate::step::FrameStepEstimate;

/// Frame index of `position` on the grid defined by `estimate`.
pub fn frame_index(position: f64, estimate: &FrameStepEstimate) -> u64 {
    if !position.is_finite() || position <= 0.0 {
        return 0;
    }
    (position / estimate.effective_step()).round() as u64
}

/// Lines shown in the content area, top to bottom.
pub fn build_frame_lines(
    position: f64,
    duration: f64,
    estimate: &FrameStepEstimate,
    last_step: Option<f64>,
    message: Option<&str>,
) -> Vec<String> {
    let mut lines = vec![
        format!(
            "frame {} / {}",
            frame_index(position, estimate),
            frame_index(duration, estimate)
        ),
        format!("{}  ({:.6}s)", format_precise(position), position),
    ];
    if let Some(target) = last_step {
        lines.push(format!("last step -> {:.6}s", target));
    }
    if let Some(message) = message {
        lines.push(String::new());
        lines.push(message.to_string());
    }
    lines
}

/// Clear the content area and draw the frame panel centered in it.
///
/// # Arguments
/// * `stdout` - The stdout handle to write to
/// * `width` - Terminal width
/// * `view_rows` - Rows above the status chrome
/// * `lines` - Lines from [`build_frame_lines`]
pub fn render_frame_panel(
    stdout: &mut io::Stdout,
    width: u16,
    view_rows: u16,
    lines: &[String],
) -> Result<()> {
    let mut output = String::with_capacity((width as usize + 16) * view_rows as usize);
    let top = (view_rows as usize).saturating_sub(lines.len()) / 2;

    for row in 0..view_rows as usize {
        output.push_str(&format!("\x1b[{};1H\x1b[2K", row + 1)); // Move + clear line
        let Some(line) = row.checked_sub(top).and_then(|i| lines.get(i)) else {
            continue;
        };
        let len = line.chars().count().min(width as usize);
        let col = (width as usize).saturating_sub(len) / 2;
        output.push_str(&" ".repeat(col));
        output.extend(line.chars().take(len));
    }

    write!(stdout, "{}", output)?;
    Ok(())
}
