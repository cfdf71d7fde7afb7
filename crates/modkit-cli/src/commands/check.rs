//! Check command implementation.
//!
//! Validates configuration without resolving anything.

use std::path::Path;

use modkit_config::{BuildOverrides, ResolveDomain, validate_fs};

use crate::cli::CheckArgs;
use crate::config;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load modkit.toml or the package.json `modkit` field, applying the profile
/// 2. Layer `MODKIT_*` environment variables
/// 3. Check the schema, then that the root and every alias target exist
/// 4. Report whether tsconfig `paths` mapping is active
/// 5. Print the materialized build config as JSON on stdout
pub fn execute(args: CheckArgs, root: &Path, profile: Option<&str>) -> Result<()> {
    let loaded = config::load(root, profile, BuildOverrides::default())?;

    match &loaded.source {
        Some(source) => ui::info(&format!("Using config {source}")),
        None => ui::warning("No modkit.toml or package.json \"modkit\" field found, using defaults"),
    }

    validate_fs(&loaded.build, &loaded.root)?;
    ui::success("Configuration is valid");

    let options = loaded.build.resolver_options(&loaded.root, ResolveDomain::Js);
    let tsconfig = options.tsconfig_path();
    if tsconfig.is_file() {
        ui::info(&format!("tsconfig paths from {}", tsconfig.display()));
    } else {
        ui::warning(&format!(
            "{} not found, tsconfig paths disabled",
            tsconfig.display()
        ));
    }

    let output = if args.compact {
        serde_json::to_string(&loaded.build)?
    } else {
        serde_json::to_string_pretty(&loaded.build)?
    };
    println!("{output}");

    Ok(())
}
