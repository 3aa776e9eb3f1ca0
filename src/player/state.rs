//! Viewer state management
//!
//! Contains the `ViewerState` struct holding the terminal viewer's UI state,
//! as well as shared types used across player modules. Playback state lives
//! in the session; stepping state lives in the `SteppingController`.

/// Result of processing an input event.
///
/// Returned by input handlers to signal control flow decisions to the main
/// loop. Variants that need to await the session are carried out by the
/// loop itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue normal playback/rendering
    Continue,
    /// Toggle between playing and paused
    TogglePlayback,
    /// Reload the media (resets and recalibrates the frame step)
    Reload,
    /// Exit the viewer
    Quit,
}

/// UI state for the terminal viewer.
#[derive(Debug)]
pub struct ViewerState {
    // === UI modes ===
    /// Whether help overlay is visible
    pub show_help: bool,

    // === Terminal ===
    /// Current terminal width
    pub term_cols: u16,
    /// Current terminal height
    pub term_rows: u16,

    // === Feedback ===
    /// Last step target applied, for display
    pub last_step: Option<f64>,
    /// One-line message shown above the progress bar
    pub message: Option<String>,

    // === Rendering flags ===
    /// True when screen needs to be redrawn
    pub needs_render: bool,
}

impl ViewerState {
    /// Number of status/chrome lines (separator + progress + status bar)
    pub const STATUS_LINES: u16 = 3;

    pub fn new(term_cols: u16, term_rows: u16) -> Self {
        Self {
            show_help: false,
            term_cols,
            term_rows,
            last_step: None,
            message: None,
            needs_render: true,
        }
    }

    /// Row the progress bar is drawn on.
    pub fn progress_row(&self) -> u16 {
        self.term_rows.saturating_sub(2)
    }

    /// Rows available above the chrome.
    pub fn view_rows(&self) -> u16 {
        self.term_rows.saturating_sub(Self::STATUS_LINES)
    }

    /// Handle terminal resize event.
    pub fn handle_resize(&mut self, new_cols: u16, new_rows: u16) {
        self.term_cols = new_cols;
        self.term_rows = new_rows;
        self.needs_render = true;
    }

    /// Toggle help overlay visibility.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.needs_render = true;
    }

    /// Show a message until the next one replaces it.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.needs_render = true;
    }
}
