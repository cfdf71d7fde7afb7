use clap::{Args, Subcommand};
use modkit_config::BuildOverrides;
use std::path::PathBuf;

use crate::cli::enums::*;

/// Available modkit subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve module specifiers to files on disk
    ///
    /// Uses the project's configuration (aliases, tsconfig, main fields) and
    /// prints one absolute path per specifier.
    Resolve(ResolveArgs),

    /// Validate configuration
    ///
    /// Loads modkit.toml (or the package.json `modkit` field), checks that
    /// alias targets exist and prints the materialized build configuration.
    Check(CheckArgs),
}

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Specifiers to resolve
    ///
    /// Examples:
    ///   modkit resolve ./utils react
    ///   modkit resolve --css ~normalize.css/normalize.css
    #[arg(required = true, value_name = "SPECIFIER")]
    pub specifiers: Vec<String>,

    /// Directory the specifiers are resolved from (defaults to the root)
    #[arg(long, value_name = "DIR")]
    pub from: Option<PathBuf>,

    /// Import kind of the reference (import-statement, dynamic-import, require-call, ...)
    ///
    /// `import-statement` and `dynamic-import` select the "import" export
    /// condition; anything else selects "require".
    #[arg(short, long, value_name = "KIND")]
    pub kind: Option<String>,

    /// Resolve as stylesheets (css extensions, `~` package prefix)
    #[arg(long)]
    pub css: bool,

    /// Target platform, overriding the config
    #[arg(short, long, value_enum)]
    pub platform: Option<Platform>,

    /// package.json main fields in order, overriding the config
    #[arg(long, value_delimiter = ',', value_name = "FIELDS")]
    pub main_fields: Option<Vec<String>>,

    /// Try paths relative to the importer before node_modules
    #[arg(long)]
    pub prefer_relative: bool,

    /// tsconfig.json used for `paths` mapping, overriding the config
    #[arg(long, value_name = "FILE")]
    pub tsconfig: Option<PathBuf>,

    /// Print a JSON object mapping each specifier to its path
    #[arg(long)]
    pub json: bool,
}

impl ResolveArgs {
    /// Build config overrides carried by these flags.
    pub fn overrides(&self) -> BuildOverrides {
        BuildOverrides {
            platform: self.platform.map(Into::into),
            main_fields: self.main_fields.clone(),
            prefer_relative: self.prefer_relative.then_some(true),
            tsconfig: self.tsconfig.clone(),
            ..Default::default()
        }
    }
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Print the config as compact JSON instead of pretty JSON
    #[arg(long)]
    pub compact: bool,
}
