//! Resolve command implementation.

use std::path::{Path, PathBuf};

use modkit_config::ResolveDomain;
use modkit_resolve::ModuleResolver;
use serde_json::{Map, Value};

use crate::cli::ResolveArgs;
use crate::config;
use crate::error::Result;

/// Execute the resolve command.
///
/// Specifiers are resolved in order with one resolver, so repeated
/// specifiers hit its cache. The first failure aborts the command.
pub fn execute(args: ResolveArgs, root: &Path, profile: Option<&str>) -> Result<()> {
    let loaded = config::load(root, profile, args.overrides())?;

    let domain = if args.css {
        ResolveDomain::Css
    } else {
        ResolveDomain::Js
    };
    let options = loaded.build.resolver_options(&loaded.root, domain);
    let from = importer_dir(args.from.as_deref(), &loaded.root)?;

    let mut resolver = ModuleResolver::new(&options);
    let resolved = resolve_all(&mut resolver, &args.specifiers, &from, args.kind.as_deref())?;

    tracing::debug!(
        count = resolved.len(),
        cached = resolver.cache().len(),
        "resolved specifiers"
    );

    if args.json {
        let map: Map<String, Value> = resolved
            .into_iter()
            .map(|(specifier, path)| (specifier, Value::String(path.display().to_string())))
            .collect();
        println!("{}", serde_json::to_string_pretty(&Value::Object(map))?);
    } else {
        for (_, path) in resolved {
            println!("{}", path.display());
        }
    }

    Ok(())
}

/// Resolve each specifier from `from`, keeping input order.
pub fn resolve_all(
    resolver: &mut ModuleResolver,
    specifiers: &[String],
    from: &Path,
    kind: Option<&str>,
) -> Result<Vec<(String, PathBuf)>> {
    specifiers
        .iter()
        .map(|specifier| {
            let path = resolver.resolve(specifier, from, kind)?;
            Ok((specifier.clone(), path))
        })
        .collect()
}

/// `--from` is taken relative to the working directory; the root is the default.
fn importer_dir(from: Option<&Path>, root: &Path) -> Result<PathBuf> {
    match from {
        Some(dir) => config::canonical_dir(dir),
        None => Ok(root.to_path_buf()),
    }
}
