//! Per-resolver memo of successful resolutions.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

/// Identity of one `resolve` call.
///
/// An absent import kind is stored as the empty string, so `None` and
/// `Some("")` address the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    specifier: String,
    directory: PathBuf,
    kind: String,
}

impl CacheKey {
    pub fn new(specifier: &str, directory: &Path, kind: Option<&str>) -> Self {
        Self {
            specifier: specifier.to_string(),
            directory: directory.to_path_buf(),
            kind: kind.unwrap_or_default().to_string(),
        }
    }

    pub fn specifier(&self) -> &str {
        &self.specifier
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }
}

/// Append-only map from [`CacheKey`] to resolved path.
///
/// Entries are never invalidated; the filesystem is assumed not to change for
/// the lifetime of the owning resolver.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: FxHashMap<CacheKey, PathBuf>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<&Path> {
        self.entries.get(key).map(PathBuf::as_path)
    }

    pub fn insert(&mut self, key: CacheKey, path: PathBuf) {
        self.entries.insert(key, path);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CacheKey, &Path)> {
        self.entries.iter().map(|(key, path)| (key, path.as_path()))
    }
}
