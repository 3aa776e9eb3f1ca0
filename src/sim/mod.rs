//! Reference playback sessions.
//!
//! - [`SimulatedSession`]: a virtual video advancing on the tokio clock at a
//!   fixed frame rate. Drives the terminal viewer and the `calibrate`
//!   command.
//! - [`ScriptedSession`]: replays a fixed list of frame media times, then
//!   stalls. Used to feed calibration exact samples.

mod scripted;
mod simulated;

pub use scripted::ScriptedSession;
pub use simulated::SimulatedSession;
