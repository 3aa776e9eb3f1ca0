//! Terminal frame viewer
//!
//! Plays a simulated video in the terminal and exercises frame stepping
//! interactively.
//!
//! # Architecture
//!
//! The viewer is organized into submodules:
//! - `state`: ViewerState struct and shared types (InputResult)
//! - `input/`: Keyboard and mouse input handling
//! - `render/`: UI rendering (frame panel, progress bar, status bar, help)
//! - `viewer`: The async main loop tying session, controller and terminal together
//!
//! # Usage
//!
//! ```no_run
//! use framestep::player::{run_viewer, ViewerOptions};
//! use framestep::Config;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let summary = run_viewer(ViewerOptions::from_config(Config::default())).await?;
//! println!("stopped at {:.6}s", summary.position);
//! # Ok(())
//! # }
//! ```

pub(crate) mod input;
pub mod render;
pub mod state;
mod viewer;

pub use state::{InputResult, ViewerState};
pub use viewer::{run_viewer, ViewerOptions, ViewerSummary};
