//! Module resolution for modkit builds.
//!
//! [`ModuleResolver`] locates the file a module specifier refers to. The actual
//! lookup (package.json fields, conditional exports, node_modules walk-up,
//! tsconfig `paths`) is done by `oxc_resolver`; this crate configures it from
//! [`ResolverOptions`](modkit_config::ResolverOptions), picks `import` or
//! `require` conditions per reference, retries legacy `~` stylesheet
//! specifiers, and memoizes results for the lifetime of the resolver.
//!
//! Resolution only emits `tracing` events; install a subscriber to see them.

pub mod cache;
pub mod capability;
pub mod error;
pub mod factory;
pub mod kind;
pub mod resolver;

pub use cache::{CacheKey, ResolutionCache};
pub use capability::{ResolveCapability, ResolveOutcome};
pub use error::{ResolutionError, ResolverFault, Result};
pub use factory::{condition_names, make_resolvers, resolve_options, OxcCapability, Resolvers};
pub use kind::{ConditionMode, ImportKind};
pub use resolver::ModuleResolver;
