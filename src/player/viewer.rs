//! Terminal viewer main loop.
//!
//! Drives a [`SimulatedSession`] with a [`SteppingController`]: calibrates
//! on every load, dispatches input, and redraws while playing or when the
//! state changed.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::{debug, info};

use super::input::handle_event;
use super::render::{
    build_frame_lines, render_frame_panel, render_help, render_progress_bar,
    render_separator_line, render_status_bar, StatusInfo,
};
use super::state::{InputResult, ViewerState};
use crate::config::Config;
use crate::sim::SimulatedSession;
use crate::step::{PlaybackSession, SteppingController};

/// Redraw interval while playing.
const TICK: Duration = Duration::from_millis(16);

/// Options for [`run_viewer`].
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    pub frame_rate: f64,
    pub duration_secs: f64,
    pub config: Config,
}

impl ViewerOptions {
    pub fn from_config(config: Config) -> Self {
        Self {
            frame_rate: config.viewer.frame_rate,
            duration_secs: config.viewer.duration_secs,
            config,
        }
    }
}

/// How the viewer ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerSummary {
    /// Position when the viewer was closed
    pub position: f64,
    /// Frame step in use when the viewer was closed
    pub step_secs: f64,
    pub calibrated: bool,
}

/// Restores the terminal when dropped, including on error paths.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            cursor::Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Run the interactive viewer until the user quits.
#[cfg(not(tarpaulin_include))]
pub async fn run_viewer(options: ViewerOptions) -> Result<ViewerSummary> {
    let mut session = SimulatedSession::new(options.frame_rate, options.duration_secs);
    let mut controller = SteppingController::new(options.config.snap, options.config.calibration);

    let (cols, rows) = terminal::size()?;
    let mut state = ViewerState::new(cols, rows);

    let guard = TerminalGuard::enter()?;
    let mut stdout = io::stdout();

    load_media(&mut stdout, &mut state, &mut controller, &mut session).await?;

    loop {
        if !session.is_paused() && session.has_ended() {
            session.pause();
            state.needs_render = true;
        }

        if state.needs_render || !session.is_paused() {
            render(&mut stdout, &mut state, &controller, &session)?;
        }

        if !event::poll(Duration::ZERO)? {
            tokio::time::sleep(TICK).await;
            continue;
        }

        match handle_event(event::read()?, &mut state, &mut controller, &mut session) {
            InputResult::Continue => {}
            InputResult::TogglePlayback => {
                if session.is_paused() {
                    if let Err(e) = session.play().await {
                        state.set_message(e.to_string());
                    }
                } else {
                    session.pause();
                }
                state.needs_render = true;
            }
            InputResult::Reload => {
                load_media(&mut stdout, &mut state, &mut controller, &mut session).await?;
            }
            InputResult::Quit => break,
        }
    }

    drop(guard);

    let estimate = controller.estimate();
    Ok(ViewerSummary {
        position: session.position(),
        step_secs: estimate.effective_step(),
        calibrated: estimate.is_calibrated(),
    })
}

/// Reset the session as a fresh load and calibrate the frame step.
///
/// Input arriving during calibration stays queued and is handled afterwards.
#[cfg(not(tarpaulin_include))]
async fn load_media(
    stdout: &mut io::Stdout,
    state: &mut ViewerState,
    controller: &mut SteppingController,
    session: &mut SimulatedSession,
) -> Result<()> {
    session.reload();
    controller.media_loaded();
    state.last_step = None;
    state.set_message("calibrating frame step...");
    render(stdout, state, controller, session)?;

    match controller.calibrate(session).await {
        Some(report) => {
            info!(?report, "viewer calibration finished");
            let message = match report.fallback {
                None => format!(
                    "calibrated from {} samples: {:.3}ms",
                    report.samples_kept,
                    report.estimate.seconds() * 1000.0
                ),
                Some(reason) => format!("using 1/30s fallback: {}", reason.description()),
            };
            state.set_message(message);
        }
        None => {
            debug!("calibration skipped");
            state.set_message("frame callbacks unavailable, using 1/30s");
        }
    }
    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn render(
    stdout: &mut io::Stdout,
    state: &mut ViewerState,
    controller: &SteppingController,
    session: &SimulatedSession,
) -> Result<()> {
    let width = state.term_cols;
    let height = state.term_rows;

    if state.show_help {
        render_help(stdout, width, height)?;
    } else {
        let position = session.position();
        let duration = session.duration().unwrap_or(0.0);
        let estimate = controller.estimate();

        let lines = build_frame_lines(
            position,
            duration,
            &estimate,
            state.last_step,
            state.message.as_deref(),
        );
        render_frame_panel(stdout, width, state.view_rows(), &lines)?;
        render_separator_line(stdout, width, height.saturating_sub(3))?;
        render_progress_bar(stdout, width, state.progress_row(), position, duration)?;
        render_status_bar(
            stdout,
            width,
            height.saturating_sub(1),
            &StatusInfo {
                paused: session.is_paused(),
                estimate,
                calibration: controller.state(),
                snap: controller.snap_config(),
            },
        )?;
    }

    stdout.flush()?;
    state.needs_render = false;
    Ok(())
}
