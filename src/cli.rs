//! Command-line interface definitions.
//!
//! Kept in the library so the xtask can generate the man page from the same
//! definitions the binary parses.

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::step::{SnapConfig, SnapMode};

const STEP_ABOUT: &str = "Compute where one frame step lands.

Adds (or subtracts with --backward) one frame duration to the position, clamps \
to the media and snaps onto the frame grid. The result is printed with six \
decimal places.

EXAMPLES:
  framestep step --position 5 --duration 10
  framestep step --position 0.1 --duration 10 --step 0.04 --backward --snap directional";

const CALIBRATE_ABOUT: &str = "Play a simulated video for a moment, measure the \
interval between presented frames and report the resulting frame step.

EXAMPLES:
  framestep calibrate --fps 24
  framestep calibrate --fps 25 --drop-every 4 --json
  framestep calibrate --no-frame-callbacks";

const MIGRATE_ABOUT: &str = "Add missing fields to the config file.

Existing values and comments are kept. A preview of the added fields is shown \
before anything is written.";

/// Calibrated frame stepping for video players
#[derive(Debug, Parser)]
#[command(name = "framestep", author, about, long_about = None)]
pub struct Cli {
    /// Log debug output to stderr (or the viewer log file)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute a single frame step and print the new position
    #[command(long_about = STEP_ABOUT)]
    Step(StepArgs),

    /// Calibrate the frame step against a simulated video
    #[command(long_about = CALIBRATE_ABOUT)]
    Calibrate(CalibrateArgs),

    /// Open the interactive terminal viewer
    View(ViewArgs),

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct StepArgs {
    /// Current position in seconds
    #[arg(long, allow_negative_numbers = true)]
    pub position: f64,

    /// Media duration in seconds
    #[arg(long, allow_negative_numbers = true)]
    pub duration: f64,

    /// Frame step in seconds (defaults to the 1/30s fallback)
    #[arg(long, allow_negative_numbers = true)]
    pub step: Option<f64>,

    /// Step one frame back instead of forward
    #[arg(long)]
    pub backward: bool,

    /// Grid snapping (defaults to the configured snap settings)
    #[arg(long, value_enum)]
    pub snap: Option<SnapArg>,
}

/// Snap choice on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SnapArg {
    Nearest,
    Directional,
    Off,
}

impl From<SnapArg> for SnapConfig {
    fn from(arg: SnapArg) -> Self {
        match arg {
            SnapArg::Nearest => SnapConfig::with_mode(SnapMode::Nearest),
            SnapArg::Directional => SnapConfig::with_mode(SnapMode::Directional),
            SnapArg::Off => SnapConfig::disabled(),
        }
    }
}

#[derive(Debug, Args)]
pub struct CalibrateArgs {
    /// Frame rate of the simulated video
    #[arg(long, default_value_t = 24.0)]
    pub fps: f64,

    /// Duration of the simulated video in seconds
    #[arg(long, default_value_t = 60.0)]
    pub duration: f64,

    /// Drop every Nth frame
    #[arg(long, value_name = "N")]
    pub drop_every: Option<u64>,

    /// Simulate a player without per-frame callbacks
    #[arg(long)]
    pub no_frame_callbacks: bool,

    /// Simulate a player that rejects programmatic play
    #[arg(long)]
    pub block_autoplay: bool,

    /// Print the full calibration report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Frame rate of the simulated video (defaults to the config file)
    #[arg(long)]
    pub fps: Option<f64>,

    /// Duration of the simulated video in seconds (defaults to the config file)
    #[arg(long)]
    pub duration: Option<f64>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Add missing fields to the config file
    #[command(long_about = MIGRATE_ABOUT)]
    Migrate {
        /// Apply changes without asking
        #[arg(short, long)]
        yes: bool,
    },
}
