//! Command-line interface definition for modkit.
//!
//! # Command Structure
//!
//! - `modkit resolve` - Resolve one or more specifiers from a directory
//! - `modkit check` - Validate configuration and print the materialized build config

mod commands;
pub mod enums;

use std::path::PathBuf;

use clap::Parser;

pub use commands::{CheckArgs, Command, ResolveArgs};
pub use enums::*;

use crate::logger::LogLevel;

/// modkit - module resolution for builds
#[derive(Parser, Debug)]
#[command(
    name = "modkit",
    version,
    about = "Resolve module specifiers the way a build would",
    long_about = "modkit resolves JavaScript, TypeScript and stylesheet specifiers using the\n\
                  project's aliases, tsconfig paths, package main fields and import/require\n\
                  export conditions."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log level (silent, error, warn, info, debug, trace)
    ///
    /// Overrides `settings.log_level` from the config file. `--verbose` and
    /// `--quiet` take precedence.
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Project root containing modkit.toml / package.json
    #[arg(long, global = true, default_value = ".", value_name = "DIR")]
    pub root: PathBuf,

    /// Config profile to apply (e.g. production)
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
