//! Frame stepping core.
//!
//! Provides calibrated one-frame stepping for players that cannot seek by
//! frame index:
//!
//! - `time`: clamping and rounding of seek targets
//! - `snap`: nearest / directional frame grid snapping
//! - `estimate`: the frame step estimate and its fallback
//! - `calibrate`: measuring the frame step from live playback
//! - `controller`: per-player stepping state and step computation
//! - `session`: the contract a host player implements
//!
//! # Usage
//!
//! ```no_run
//! use framestep::sim::SimulatedSession;
//! use framestep::step::{PlaybackSession, SteppingController};
//!
//! # async fn demo() {
//! let mut session = SimulatedSession::new(24.0, 10.0);
//! let mut controller = SteppingController::default();
//!
//! controller.media_loaded();
//! controller.calibrate(&mut session).await;
//!
//! if let Some(target) = controller.step_forward(&session) {
//!     session.set_position(target);
//! }
//! # }
//! ```

pub mod calibrate;
pub mod controller;
pub mod estimate;
pub mod session;
pub mod snap;
pub mod time;

pub use calibrate::{calibrate, CalibrationConfig, CalibrationReport, FallbackReason};
pub use controller::{CalibrationState, CalibrationTicket, SteppingController};
pub use estimate::{FrameStepEstimate, FALLBACK_STEP_SECS, MAX_STEP_SECS, MIN_STEP_SECS};
pub use session::{FrameMetadata, PlaybackSession, SessionError};
pub use snap::{snap_directional, snap_nearest, Direction, SnapConfig, SnapMode};
