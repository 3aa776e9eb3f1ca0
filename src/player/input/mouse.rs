//! Mouse input handling for the terminal viewer.
//!
//! Handles click-to-seek on the progress bar and Shift+wheel frame stepping.

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::keyboard::step_paused;
use crate::player::render::progress_bar_geometry;
use crate::player::state::{InputResult, ViewerState};
use crate::step::time::position_from_ratio;
use crate::step::{Direction, PlaybackSession, SteppingController};

/// Handle a mouse event.
///
/// Currently handles:
/// - Left click on progress bar to seek to that position (not snapped)
/// - Shift + wheel up / down to step one frame forward / backward
pub fn handle_mouse_event<S: PlaybackSession>(
    mouse: MouseEvent,
    state: &mut ViewerState,
    controller: &SteppingController,
    session: &mut S,
) -> InputResult {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_click(mouse, state, session),
        MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
            // Plain scrolling is left alone
            if mouse.modifiers.contains(KeyModifiers::SHIFT) {
                if let Some(direction) = wheel_direction(mouse.kind) {
                    step_paused(state, controller, session, direction);
                }
            }
        }
        _ => {}
    }

    InputResult::Continue
}

/// Wheel up steps forward, wheel down steps backward.
pub fn wheel_direction(kind: MouseEventKind) -> Option<Direction> {
    match kind {
        MouseEventKind::ScrollUp => Some(Direction::Forward),
        MouseEventKind::ScrollDown => Some(Direction::Backward),
        _ => None,
    }
}

fn handle_click<S: PlaybackSession>(mouse: MouseEvent, state: &mut ViewerState, session: &mut S) {
    let Some(duration) = session.loaded_duration() else {
        return;
    };
    if mouse.row != state.progress_row() {
        return;
    }

    let (bar_start, bar_width) = progress_bar_geometry(state.term_cols);
    if bar_width == 0 {
        return;
    }
    if mouse.column >= bar_start && mouse.column < bar_start + bar_width as u16 {
        let ratio = (mouse.column - bar_start) as f64 / bar_width as f64;
        session.set_position(position_from_ratio(ratio, duration));
        state.last_step = None;
        state.needs_render = true;
    }
}
