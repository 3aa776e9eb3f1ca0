//! Rendering components for the terminal viewer.
//!
//! This module contains all the UI rendering functions for the viewer,
//! including the frame panel, progress bar, status bar, and help overlay.

mod frame;
mod help;
mod progress;
mod status;

pub use frame::{build_frame_lines, frame_index, render_frame_panel};
pub use help::{calc_help_start_col, calc_help_start_row, render_help, HELP_BOX_WIDTH, HELP_LINES};
pub use progress::{
    build_progress_bar_chars, format_duration, format_precise, progress_bar_geometry,
    render_progress_bar,
};
pub use status::{
    build_status_bar, calibration_label, format_step, render_separator_line, render_status_bar,
    StatusInfo,
};
