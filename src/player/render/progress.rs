//! Progress bar rendering for the terminal viewer.
//!
//! Displays the playhead position on a timeline the width of the terminal.

use std::io::{self, Write};

use anyhow::Result;

/// Columns reserved around the bar for padding and the time display.
const BAR_CHROME_COLS: usize = 14;

/// Format a duration in seconds to MM:SS format.
///
/// Zero, negative and NaN inputs format as `00:00`.
///
/// # Arguments
/// * `seconds` - Duration in seconds
///
/// # Returns
/// A string in MM:SS format
pub fn format_duration(seconds: f64) -> String {
    if seconds.is_nan() {
        return "00:00".to_string();
    }
    let total_secs = seconds as u64;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Format a position with millisecond precision (MM:SS.mmm).
pub fn format_precise(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "00:00.000".to_string();
    }
    let total_millis = (seconds * 1000.0).round() as u64;
    let mins = total_millis / 60_000;
    let secs = (total_millis / 1000) % 60;
    let millis = total_millis % 1000;
    format!("{:02}:{:02}.{:03}", mins, secs, millis)
}

/// Start column and width of the bar for a terminal `width` columns wide.
pub fn progress_bar_geometry(width: u16) -> (u16, usize) {
    (1, (width as usize).saturating_sub(BAR_CHROME_COLS))
}

/// Build the progress bar character array.
///
/// # Arguments
/// * `bar_width` - Width of the bar in characters
/// * `current_time` - Current playback position
/// * `total_duration` - Total duration of the media
///
/// # Returns
/// A tuple of (bar_chars, filled_count) where bar_chars contains the visual
/// representation and filled_count is the number of filled positions.
pub fn build_progress_bar_chars(
    bar_width: usize,
    current_time: f64,
    total_duration: f64,
) -> (Vec<char>, usize) {
    let progress = if total_duration > 0.0 {
        (current_time / total_duration).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let filled = (bar_width as f64 * progress) as usize;

    let mut bar: Vec<char> = vec!['─'; bar_width];

    if filled < bar_width {
        bar[filled] = '⏺';
    }

    (bar, filled)
}

/// Render the progress bar.
///
/// # Arguments
/// * `stdout` - The stdout handle to write to
/// * `width` - Terminal width
/// * `row` - Row to render at (0-indexed)
/// * `current_time` - Current playback position
/// * `total_duration` - Total duration of the media
pub fn render_progress_bar(
    stdout: &mut io::Stdout,
    width: u16,
    row: u16,
    current_time: f64,
    total_duration: f64,
) -> Result<()> {
    let (_, bar_width) = progress_bar_geometry(width);
    let (bar, filled) = build_progress_bar_chars(bar_width, current_time, total_duration);

    let time_display = format!(
        " {}/{}",
        format_duration(current_time),
        format_duration(total_duration)
    );

    let mut output = String::with_capacity(width as usize * 4);
    output.push_str(&format!("\x1b[{};1H", row + 1)); // Move cursor
    output.push_str("\x1b[48;5;236m "); // Dark gray background + padding

    // ANSI color codes
    const GREEN: &str = "\x1b[32m";
    const WHITE: &str = "\x1b[97m";
    const DARK_GREY: &str = "\x1b[90m";
    const GREY: &str = "\x1b[37m";

    output.push_str(GREEN);
    for (i, &c) in bar.iter().enumerate() {
        if i < filled {
            output.push('━');
        } else if i == filled {
            output.push_str(WHITE);
            output.push(c);
            output.push_str(DARK_GREY);
        } else {
            output.push(c);
        }
    }

    output.push_str(GREY);
    output.push_str(&time_display);

    // Fill remaining width
    let used_width = 1 + bar_width + time_display.len();
    let remaining = (width as usize).saturating_sub(used_width);
    output.push_str(&" ".repeat(remaining));

    output.push_str("\x1b[0m"); // Reset
    write!(stdout, "{}", output)?;

    Ok(())
}
