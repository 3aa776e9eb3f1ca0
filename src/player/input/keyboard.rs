//! Keyboard input handling for the terminal viewer.
//!
//! Handles all keyboard shortcuts including playback controls, frame
//! stepping, snap settings, and seeking to the ends of the media.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::player::state::{InputResult, ViewerState};
use crate::step::{Direction, PlaybackSession, SteppingController};

/// Handle a keyboard event.
///
/// Frame keys pause playback before stepping and ignore auto-repeat, so a
/// held key never produces a burst of steps.
pub fn handle_key_event<S: PlaybackSession>(
    key: KeyEvent,
    state: &mut ViewerState,
    controller: &mut SteppingController,
    session: &mut S,
) -> InputResult {
    if key.kind == KeyEventKind::Release {
        return InputResult::Continue;
    }

    // If help is showing, any key closes it
    if state.show_help {
        state.show_help = false;
        state.needs_render = true;
        return InputResult::Continue;
    }

    if let Some(direction) = frame_key_direction(&key) {
        if key.kind != KeyEventKind::Repeat {
            step_paused(state, controller, session, direction);
        }
        return InputResult::Continue;
    }

    match key.code {
        // === Quit ===
        KeyCode::Char('q') | KeyCode::Esc => InputResult::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputResult::Quit,

        // === Playback controls ===
        KeyCode::Char(' ') => InputResult::TogglePlayback,
        KeyCode::Char('l') => InputResult::Reload,
        KeyCode::Home => {
            seek_to(state, session, 0.0);
            InputResult::Continue
        }
        KeyCode::End => {
            if let Some(duration) = session.loaded_duration() {
                seek_to(state, session, duration);
            }
            InputResult::Continue
        }

        // === Snap settings ===
        KeyCode::Char('s') => {
            controller.toggle_snap();
            let label = if controller.snap_config().enabled {
                "on"
            } else {
                "off"
            };
            state.set_message(format!("snap {}", label));
            InputResult::Continue
        }
        KeyCode::Char('d') => {
            let mode = controller.snap_config().mode.toggled();
            controller.set_snap_mode(mode);
            state.set_message(format!("snap mode: {}", mode));
            InputResult::Continue
        }

        // === Mode toggles ===
        KeyCode::Char('?') => {
            state.toggle_help();
            InputResult::Continue
        }

        _ => InputResult::Continue,
    }
}

/// Map a key to a frame step direction.
///
/// Right and `.` step forward, Left and `,` step backward.
pub fn frame_key_direction(key: &KeyEvent) -> Option<Direction> {
    match key.code {
        KeyCode::Right | KeyCode::Char('.') => Some(Direction::Forward),
        KeyCode::Left | KeyCode::Char(',') => Some(Direction::Backward),
        _ => None,
    }
}

/// Pause if playing, then step one frame.
///
/// Shared by keyboard and wheel input.
pub fn step_paused<S: PlaybackSession>(
    state: &mut ViewerState,
    controller: &SteppingController,
    session: &mut S,
    direction: Direction,
) {
    if !session.is_paused() {
        session.pause();
    }
    if let Some(target) = controller.apply_step(session, direction) {
        state.last_step = Some(target);
    }
    state.needs_render = true;
}

fn seek_to<S: PlaybackSession>(state: &mut ViewerState, session: &mut S, seconds: f64) {
    session.set_position(seconds);
    state.last_step = None;
    state.needs_render = true;
}
