//! modkit CLI - resolve module specifiers the way a build would.
//!
//! Handles argument parsing, logging initialization, and command dispatch.

use clap::Parser;
use miette::Result;
use modkit_cli::{cli, commands, config, error, logger, ui};

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    ui::init_colors(args.no_color);

    // The config file may pick a log level; a broken config is reported by the command itself.
    let configured_level = config::configured_log_level(&args.root, args.profile.as_deref());
    logger::init_logger(
        args.verbose,
        args.quiet,
        args.no_color,
        args.log_level.or(configured_level),
    );

    let profile = args.profile.as_deref();
    let result = match args.command {
        cli::Command::Resolve(resolve_args) => {
            commands::resolve_execute(resolve_args, &args.root, profile)
        }
        cli::Command::Check(check_args) => commands::check_execute(check_args, &args.root, profile),
    };

    result.map_err(error::cli_error_to_miette)
}
