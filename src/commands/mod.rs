//! Subcommand handlers for the framestep binary.

pub mod calibrate;
pub mod completions;
pub mod config;
pub mod step;
pub mod view;
