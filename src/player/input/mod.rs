//! Input handling for the terminal viewer.
//!
//! This module handles keyboard and mouse input events, dispatching
//! them to the appropriate handlers and returning control flow signals.

mod keyboard;
mod mouse;

pub use keyboard::{frame_key_direction, handle_key_event, step_paused};
pub use mouse::{handle_mouse_event, wheel_direction};

use crossterm::event::Event;

use crate::player::state::{InputResult, ViewerState};
use crate::step::{PlaybackSession, SteppingController};

/// Handle any input event, dispatching to the appropriate handler.
///
/// # Arguments
/// * `event` - The crossterm event to handle
/// * `state` - Mutable reference to viewer state
/// * `controller` - Stepping controller of the loaded media
/// * `session` - The playback session being driven
///
/// # Returns
/// `InputResult` telling the main loop what to do next
pub fn handle_event<S: PlaybackSession>(
    event: Event,
    state: &mut ViewerState,
    controller: &mut SteppingController,
    session: &mut S,
) -> InputResult {
    match event {
        Event::Key(key) => handle_key_event(key, state, controller, session),
        Event::Mouse(mouse) => handle_mouse_event(mouse, state, controller, session),
        Event::Resize(new_cols, new_rows) => {
            state.handle_resize(new_cols, new_rows);
            InputResult::Continue
        }
        _ => InputResult::Continue, // Ignore focus events, paste, etc.
    }
}
