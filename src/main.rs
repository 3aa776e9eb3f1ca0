//! framestep CLI entry point

mod commands;

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches};

use framestep::cli::{Cli, Commands, ConfigCommands};
use framestep::logging;

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    let matches = Cli::command()
        .version(framestep::version_string())
        .get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    // The viewer sets up its own file logger
    if !matches!(cli.command, Commands::View(_)) {
        logging::init_stderr(cli.verbose);
    }

    match cli.command {
        Commands::Step(args) => commands::step::handle(&args),
        Commands::Calibrate(args) => commands::calibrate::handle(&args),
        Commands::View(args) => commands::view::handle(&args, cli.verbose),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Path => commands::config::handle_path(),
            ConfigCommands::Migrate { yes } => commands::config::handle_migrate(yes),
        },
        Commands::Completions { shell } => {
            commands::completions::handle(shell);
            Ok(())
        }
    }
}
