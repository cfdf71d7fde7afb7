//! The resolution capability the dispatcher is built on.

use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use crate::error::ResolverFault;

/// Result of a single capability call.
#[derive(Debug)]
pub enum ResolveOutcome {
    Resolved(PathBuf),
    /// The capability completed and found nothing (e.g. a module mapped to
    /// `false` in a package's `browser` field).
    NotFound,
    Fault(ResolverFault),
}

impl ResolveOutcome {
    pub fn is_fault(&self) -> bool {
        matches!(self, ResolveOutcome::Fault(_))
    }
}

/// Synchronous `(directory, specifier) -> outcome` resolution.
pub trait ResolveCapability {
    fn resolve_sync(&self, directory: &Path, specifier: &str) -> ResolveOutcome;
}

impl<T: ResolveCapability + ?Sized> ResolveCapability for &T {
    fn resolve_sync(&self, directory: &Path, specifier: &str) -> ResolveOutcome {
        (**self).resolve_sync(directory, specifier)
    }
}

impl<T: ResolveCapability + ?Sized> ResolveCapability for Rc<T> {
    fn resolve_sync(&self, directory: &Path, specifier: &str) -> ResolveOutcome {
        (**self).resolve_sync(directory, specifier)
    }
}

impl<T: ResolveCapability + ?Sized> ResolveCapability for Arc<T> {
    fn resolve_sync(&self, directory: &Path, specifier: &str) -> ResolveOutcome {
        (**self).resolve_sync(directory, specifier)
    }
}

impl<T: ResolveCapability + ?Sized> ResolveCapability for Box<T> {
    fn resolve_sync(&self, directory: &Path, specifier: &str) -> ResolveOutcome {
        (**self).resolve_sync(directory, specifier)
    }
}
