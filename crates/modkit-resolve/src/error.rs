//! Error types for module resolution.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResolutionError>;

/// A failure reported by the underlying resolution capability.
///
/// This is distinct from "not found": it means the capability itself could not
/// complete, e.g. a broken tsconfig or an unreadable package.json. `oxc_resolver`
/// also reports a missing module this way; see [`ResolverFault::is_missing_module`].
#[derive(Debug, Error)]
pub enum ResolverFault {
    #[error(transparent)]
    Resolver(#[from] oxc_resolver::ResolveError),

    #[error("{0}")]
    Message(String),
}

impl ResolverFault {
    pub fn message(message: impl Into<String>) -> Self {
        ResolverFault::Message(message.into())
    }

    /// `oxc_resolver` gave up on the specifier without anything going wrong.
    pub fn is_missing_module(&self) -> bool {
        matches!(
            self,
            ResolverFault::Resolver(oxc_resolver::ResolveError::NotFound(_))
        )
    }
}

/// Error returned by [`ModuleResolver::resolve`](crate::ModuleResolver::resolve).
///
/// Both variants carry the original specifier and the directory it was
/// resolved from.
#[derive(Debug, Error, Diagnostic)]
pub enum ResolutionError {
    #[error("can not resolve {specifier} from {}", directory.display())]
    #[diagnostic(
        code(modkit::resolve::not_found),
        help("Check the specifier, the configured aliases and that the package is installed")
    )]
    NotFound {
        specifier: String,
        directory: PathBuf,
    },

    #[error("failed to resolve {specifier} from {}: {source}", directory.display())]
    #[diagnostic(code(modkit::resolve::fault))]
    Fault {
        specifier: String,
        directory: PathBuf,
        #[source]
        source: ResolverFault,
    },
}

impl ResolutionError {
    pub fn specifier(&self) -> &str {
        match self {
            ResolutionError::NotFound { specifier, .. }
            | ResolutionError::Fault { specifier, .. } => specifier,
        }
    }

    pub fn directory(&self) -> &std::path::Path {
        match self {
            ResolutionError::NotFound { directory, .. }
            | ResolutionError::Fault { directory, .. } => directory,
        }
    }
}
