//! Builds the require/import resolver pair from [`ResolverOptions`].

use std::path::Path;

use modkit_config::{Platform, ResolverOptions};
use oxc_resolver::{
    AliasValue, ResolveError, ResolveOptions, Resolver, TsconfigDiscovery, TsconfigOptions,
    TsconfigReferences,
};

use crate::capability::{ResolveCapability, ResolveOutcome};
use crate::kind::ConditionMode;

/// The two resolution capabilities a dispatcher chooses between.
#[derive(Debug, Clone)]
pub struct Resolvers<C> {
    pub require: C,
    pub import: C,
}

impl<C> Resolvers<C> {
    pub fn get(&self, mode: ConditionMode) -> &C {
        match mode {
            ConditionMode::Require => &self.require,
            ConditionMode::Import => &self.import,
        }
    }
}

/// [`ResolveCapability`] backed by `oxc_resolver`.
pub struct OxcCapability {
    resolver: Resolver,
}

impl OxcCapability {
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }
}

impl std::fmt::Debug for OxcCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OxcCapability").finish_non_exhaustive()
    }
}

impl ResolveCapability for OxcCapability {
    fn resolve_sync(&self, directory: &Path, specifier: &str) -> ResolveOutcome {
        match self.resolver.resolve(directory, specifier) {
            Ok(resolution) => ResolveOutcome::Resolved(resolution.path().to_path_buf()),
            // A module mapped to `false` resolves to nothing without failing.
            Err(ResolveError::Ignored(_)) => ResolveOutcome::NotFound,
            Err(err) => ResolveOutcome::Fault(err.into()),
        }
    }
}

/// Condition names in precedence order: platform, mode, then `module`.
pub fn condition_names(platform: Platform, mode: ConditionMode) -> Vec<String> {
    vec![
        platform.as_str().to_string(),
        mode.as_str().to_string(),
        "module".to_string(),
    ]
}

/// Translate [`ResolverOptions`] into `oxc_resolver` options for `mode`.
///
/// The tsconfig is attached only when the file exists; `oxc_resolver` fails
/// every resolution on a missing tsconfig otherwise.
pub fn resolve_options(options: &ResolverOptions, mode: ConditionMode) -> ResolveOptions {
    let alias_fields = match options.platform {
        Platform::Browser => vec![vec!["browser".to_string()]],
        Platform::Node | Platform::Neutral => vec![],
    };

    let alias = options
        .alias_targets()
        .into_iter()
        .map(|(key, target)| {
            (
                key,
                vec![AliasValue::Path(target.to_string_lossy().into_owned())],
            )
        })
        .collect();

    ResolveOptions {
        tsconfig: tsconfig_discovery(options),
        alias,
        alias_fields,
        condition_names: condition_names(options.platform, mode),
        extensions: options.extensions.clone(),
        main_fields: options.main_fields.clone(),
        main_files: vec!["index".to_string()],
        prefer_relative: options.prefer_relative,
        ..ResolveOptions::default()
    }
}

fn tsconfig_discovery(options: &ResolverOptions) -> Option<TsconfigDiscovery> {
    let config_file = options.tsconfig_path();
    if !config_file.is_file() {
        tracing::debug!(tsconfig = %config_file.display(), "tsconfig not found, path mapping disabled");
        return None;
    }

    tracing::debug!(tsconfig = %config_file.display(), "attaching tsconfig path mapping");
    Some(TsconfigDiscovery::Manual(TsconfigOptions {
        config_file,
        references: TsconfigReferences::Auto,
    }))
}

/// Build the require/import pair.
///
/// Both resolvers share one filesystem cache; only their condition names
/// differ.
pub fn make_resolvers(options: &ResolverOptions) -> Resolvers<OxcCapability> {
    let require = Resolver::new(resolve_options(options, ConditionMode::Require));
    let import = require.clone_with_options(resolve_options(options, ConditionMode::Import));

    tracing::trace!(
        platform = %options.platform,
        domain = %options.resolve_type,
        root = %options.root.display(),
        "created resolvers"
    );

    Resolvers {
        require: OxcCapability::new(require),
        import: OxcCapability::new(import),
    }
}
