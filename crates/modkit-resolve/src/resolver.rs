//! The caching, mode-dispatching entry point.

use std::path::{Path, PathBuf};

use modkit_config::{ResolveDomain, ResolverOptions};

use crate::cache::{CacheKey, ResolutionCache};
use crate::capability::{ResolveCapability, ResolveOutcome};
use crate::error::{ResolutionError, Result};
use crate::factory::{make_resolvers, OxcCapability, Resolvers};
use crate::kind::{ConditionMode, ImportKind};

/// Resolves specifiers for one build, memoizing every successful result.
///
/// The cache belongs to the instance. `resolve` takes `&mut self`; share an
/// instance across threads only behind a lock.
///
/// # Example
///
/// ```no_run
/// use modkit_config::{ResolveDomain, ResolverOptions};
/// use modkit_resolve::ModuleResolver;
/// use std::path::Path;
///
/// let options = ResolverOptions::new("/project", ResolveDomain::Js).with_alias("@src", "./src");
/// let mut resolver = ModuleResolver::new(&options);
///
/// let path = resolver
///     .resolve("@src/app", Path::new("/project/src"), Some("import-statement"))
///     .unwrap();
/// println!("{}", path.display());
/// ```
#[derive(Debug)]
pub struct ModuleResolver<C = OxcCapability> {
    domain: ResolveDomain,
    resolvers: Resolvers<C>,
    cache: ResolutionCache,
}

impl ModuleResolver<OxcCapability> {
    /// Resolver backed by `oxc_resolver`, configured from `options`.
    pub fn new(options: &ResolverOptions) -> Self {
        Self::with_resolvers(options.resolve_type, make_resolvers(options))
    }
}

impl<C: ResolveCapability> ModuleResolver<C> {
    pub fn with_resolvers(domain: ResolveDomain, resolvers: Resolvers<C>) -> Self {
        Self {
            domain,
            resolvers,
            cache: ResolutionCache::new(),
        }
    }

    pub fn domain(&self) -> ResolveDomain {
        self.domain
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub fn resolvers(&self) -> &Resolvers<C> {
        &self.resolvers
    }

    /// Resolve `specifier` as seen from `directory`.
    ///
    /// `kind` is the import-kind tag of the reference (`import-statement`,
    /// `dynamic-import`, `require-call`, ...). In the js domain the two ESM
    /// kinds select the `import` conditions and everything else, including no
    /// kind, selects `require`. The css domain always uses `require` and
    /// retries once without a leading `~` when the first attempt faults.
    pub fn resolve(
        &mut self,
        specifier: &str,
        directory: &Path,
        kind: Option<&str>,
    ) -> Result<PathBuf> {
        let key = CacheKey::new(specifier, directory, kind);
        if let Some(cached) = self.cache.get(&key) {
            tracing::trace!(specifier, directory = %directory.display(), "resolution cache hit");
            return Ok(cached.to_path_buf());
        }

        let outcome = match self.domain {
            ResolveDomain::Js => {
                let mode = ConditionMode::for_tag(kind);
                tracing::trace!(specifier, directory = %directory.display(), %mode, "resolving script");
                self.resolvers.get(mode).resolve_sync(directory, specifier)
            }
            ResolveDomain::Css => self.resolve_stylesheet(specifier, directory),
        };

        let path = match outcome {
            ResolveOutcome::Resolved(path) if !path.as_os_str().is_empty() => path,
            ResolveOutcome::Resolved(_) | ResolveOutcome::NotFound => {
                return Err(ResolutionError::NotFound {
                    specifier: specifier.to_string(),
                    directory: directory.to_path_buf(),
                });
            }
            // Still a fault for the stylesheet retry above; reported as not-found.
            ResolveOutcome::Fault(source) if source.is_missing_module() => {
                return Err(ResolutionError::NotFound {
                    specifier: specifier.to_string(),
                    directory: directory.to_path_buf(),
                });
            }
            ResolveOutcome::Fault(source) => {
                return Err(ResolutionError::Fault {
                    specifier: specifier.to_string(),
                    directory: directory.to_path_buf(),
                    source,
                });
            }
        };

        self.cache.insert(key, path.clone());
        Ok(path)
    }

    /// [`resolve`](Self::resolve) with a typed import kind.
    pub fn resolve_kind(
        &mut self,
        specifier: &str,
        directory: &Path,
        kind: ImportKind,
    ) -> Result<PathBuf> {
        self.resolve(specifier, directory, Some(kind.as_str()))
    }

    fn resolve_stylesheet(&self, specifier: &str, directory: &Path) -> ResolveOutcome {
        match self.resolvers.require.resolve_sync(directory, specifier) {
            ResolveOutcome::Fault(fault) => {
                let Some(stripped) = specifier.strip_prefix('~') else {
                    return ResolveOutcome::Fault(fault);
                };
                tracing::debug!(
                    specifier,
                    retry = stripped,
                    error = %fault,
                    "stylesheet resolution failed, retrying without '~'"
                );
                self.resolvers.require.resolve_sync(directory, stripped)
            }
            outcome => outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolverFault;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Scripted capability that records every call.
    #[derive(Default)]
    struct Scripted {
        answers: HashMap<String, Answer>,
        calls: RefCell<Vec<String>>,
    }

    #[derive(Clone)]
    enum Answer {
        Path(&'static str),
        NotFound,
        Fault(&'static str),
        /// What `oxc_resolver` reports for a module that does not exist
        Missing,
    }

    impl Scripted {
        fn answer(mut self, specifier: &str, answer: Answer) -> Self {
            self.answers.insert(specifier.to_string(), answer);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl ResolveCapability for Scripted {
        fn resolve_sync(&self, _directory: &Path, specifier: &str) -> ResolveOutcome {
            self.calls.borrow_mut().push(specifier.to_string());
            match self.answers.get(specifier).cloned().unwrap_or(Answer::NotFound) {
                Answer::Path(path) => ResolveOutcome::Resolved(PathBuf::from(path)),
                Answer::NotFound => ResolveOutcome::NotFound,
                Answer::Fault(message) => ResolveOutcome::Fault(ResolverFault::message(message)),
                Answer::Missing => ResolveOutcome::Fault(ResolverFault::from(
                    oxc_resolver::ResolveError::NotFound(specifier.to_string()),
                )),
            }
        }
    }

    fn resolver(
        domain: ResolveDomain,
        require: Scripted,
        import: Scripted,
    ) -> (ModuleResolver<Rc<Scripted>>, Rc<Scripted>, Rc<Scripted>) {
        let require = Rc::new(require);
        let import = Rc::new(import);
        let resolver = ModuleResolver::with_resolvers(
            domain,
            Resolvers {
                require: Rc::clone(&require),
                import: Rc::clone(&import),
            },
        );
        (resolver, require, import)
    }

    #[test]
    fn repeated_calls_hit_the_cache() {
        let (mut resolver, require, _) = resolver(
            ResolveDomain::Js,
            Scripted::default().answer("./a", Answer::Path("/proj/a.ts")),
            Scripted::default(),
        );
        let dir = Path::new("/proj");

        let first = resolver.resolve("./a", dir, None).unwrap();
        let second = resolver.resolve("./a", dir, None).unwrap();

        assert_eq!(first, PathBuf::from("/proj/a.ts"));
        assert_eq!(first, second);
        assert_eq!(require.calls().len(), 1);
    }

    #[test]
    fn absent_and_empty_kind_share_an_entry() {
        let (mut resolver, require, _) = resolver(
            ResolveDomain::Js,
            Scripted::default().answer("pkg", Answer::Path("/proj/node_modules/pkg/index.js")),
            Scripted::default(),
        );
        let dir = Path::new("/proj");

        resolver.resolve("pkg", dir, None).unwrap();
        resolver.resolve("pkg", dir, Some("")).unwrap();

        assert_eq!(require.calls().len(), 1);
        assert_eq!(resolver.cache().len(), 1);
    }

    #[test]
    fn dynamic_import_uses_import_conditions() {
        let (mut resolver, require, import) = resolver(
            ResolveDomain::Js,
            Scripted::default().answer("pkg", Answer::Path("/cjs.js")),
            Scripted::default().answer("pkg", Answer::Path("/esm.mjs")),
        );
        let dir = Path::new("/proj");

        let esm = resolver.resolve("pkg", dir, Some("dynamic-import")).unwrap();
        assert_eq!(esm, PathBuf::from("/esm.mjs"));
        assert_eq!(import.calls(), vec!["pkg"]);
        assert!(require.calls().is_empty());

        let cjs = resolver.resolve("pkg", dir, None).unwrap();
        assert_eq!(cjs, PathBuf::from("/cjs.js"));
        assert_eq!(require.calls(), vec!["pkg"]);
    }

    #[test]
    fn import_statement_uses_import_conditions() {
        let (mut resolver, require, import) = resolver(
            ResolveDomain::Js,
            Scripted::default(),
            Scripted::default().answer("pkg", Answer::Path("/esm.mjs")),
        );

        resolver
            .resolve_kind("pkg", Path::new("/proj"), ImportKind::ImportStatement)
            .unwrap();
        assert_eq!(import.calls().len(), 1);
        assert!(require.calls().is_empty());
    }

    #[test]
    fn css_domain_ignores_import_kind() {
        let (mut resolver, require, import) = resolver(
            ResolveDomain::Css,
            Scripted::default().answer("./a.css", Answer::Path("/proj/a.css")),
            Scripted::default().answer("./a.css", Answer::Path("/wrong.css")),
        );

        let path = resolver
            .resolve("./a.css", Path::new("/proj"), Some("import-statement"))
            .unwrap();
        assert_eq!(path, PathBuf::from("/proj/a.css"));
        assert_eq!(require.calls().len(), 1);
        assert!(import.calls().is_empty());
    }

    #[test]
    fn css_fault_retries_without_tilde() {
        let (mut resolver, require, _) = resolver(
            ResolveDomain::Css,
            Scripted::default()
                .answer("~foo/bar.css", Answer::Fault("no package named ~foo"))
                .answer("foo/bar.css", Answer::Path("/proj/node_modules/foo/bar.css")),
            Scripted::default(),
        );

        let path = resolver
            .resolve("~foo/bar.css", Path::new("/proj/src"), None)
            .unwrap();

        assert_eq!(path, PathBuf::from("/proj/node_modules/foo/bar.css"));
        assert_eq!(require.calls(), vec!["~foo/bar.css", "foo/bar.css"]);
    }

    #[test]
    fn css_not_found_does_not_retry() {
        let (mut resolver, require, _) = resolver(
            ResolveDomain::Css,
            Scripted::default()
                .answer("~foo/bar.css", Answer::NotFound)
                .answer("foo/bar.css", Answer::Path("/proj/node_modules/foo/bar.css")),
            Scripted::default(),
        );

        let err = resolver
            .resolve("~foo/bar.css", Path::new("/proj/src"), None)
            .unwrap_err();

        assert!(matches!(err, ResolutionError::NotFound { .. }));
        assert_eq!(require.calls(), vec!["~foo/bar.css"]);
    }

    #[test]
    fn css_double_fault_propagates_second_fault() {
        let (mut resolver, _, _) = resolver(
            ResolveDomain::Css,
            Scripted::default()
                .answer("~foo/bar.css", Answer::Fault("first"))
                .answer("foo/bar.css", Answer::Fault("second")),
            Scripted::default(),
        );

        let err = resolver
            .resolve("~foo/bar.css", Path::new("/proj"), None)
            .unwrap_err();

        match err {
            ResolutionError::Fault {
                specifier, source, ..
            } => {
                assert_eq!(specifier, "~foo/bar.css");
                assert_eq!(source.to_string(), "second");
            }
            other => panic!("expected fault, got {other:?}"),
        }
    }

    #[test]
    fn css_fault_then_not_found_is_not_found() {
        let (mut resolver, _, _) = resolver(
            ResolveDomain::Css,
            Scripted::default().answer("~foo/bar.css", Answer::Fault("first")),
            Scripted::default(),
        );

        let err = resolver
            .resolve("~foo/bar.css", Path::new("/proj"), None)
            .unwrap_err();
        assert!(matches!(err, ResolutionError::NotFound { .. }));
    }

    #[test]
    fn css_fault_without_tilde_is_not_retried() {
        let (mut resolver, require, _) = resolver(
            ResolveDomain::Css,
            Scripted::default().answer("./theme.css", Answer::Fault("unreadable")),
            Scripted::default(),
        );

        let err = resolver
            .resolve("./theme.css", Path::new("/proj"), None)
            .unwrap_err();

        assert!(matches!(err, ResolutionError::Fault { .. }));
        assert_eq!(require.calls(), vec!["./theme.css"]);
    }

    #[test]
    fn missing_module_still_retries_then_reports_not_found() {
        let (mut resolver, require, _) = resolver(
            ResolveDomain::Css,
            Scripted::default()
                .answer("~foo/bar.css", Answer::Missing)
                .answer("foo/bar.css", Answer::Missing),
            Scripted::default(),
        );

        let err = resolver
            .resolve("~foo/bar.css", Path::new("/proj"), None)
            .unwrap_err();

        assert!(matches!(err, ResolutionError::NotFound { .. }));
        assert_eq!(require.calls(), vec!["~foo/bar.css", "foo/bar.css"]);
    }

    #[test]
    fn missing_script_module_is_not_found() {
        let (mut resolver, _, _) = resolver(
            ResolveDomain::Js,
            Scripted::default().answer("./gone", Answer::Missing),
            Scripted::default(),
        );

        let err = resolver.resolve("./gone", Path::new("/proj"), None).unwrap_err();
        assert!(matches!(err, ResolutionError::NotFound { .. }));
    }

    #[test]
    fn js_fault_propagates_without_retry() {
        let (mut resolver, require, _) = resolver(
            ResolveDomain::Js,
            Scripted::default()
                .answer("~foo", Answer::Fault("broken tsconfig"))
                .answer("foo", Answer::Path("/proj/node_modules/foo/index.js")),
            Scripted::default(),
        );

        let err = resolver.resolve("~foo", Path::new("/proj"), None).unwrap_err();
        assert!(matches!(err, ResolutionError::Fault { .. }));
        assert_eq!(require.calls(), vec!["~foo"]);
    }

    #[test]
    fn not_found_error_names_specifier_and_directory() {
        let (mut resolver, _, _) = resolver(
            ResolveDomain::Js,
            Scripted::default(),
            Scripted::default(),
        );

        let err = resolver
            .resolve("missing-pkg", Path::new("/proj/src"), Some("import-statement"))
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("missing-pkg"));
        assert!(message.contains("/proj/src"));
    }

    #[test]
    fn failures_are_not_cached() {
        let (mut resolver, require, _) = resolver(
            ResolveDomain::Js,
            Scripted::default(),
            Scripted::default(),
        );
        let dir = Path::new("/proj");

        assert!(resolver.resolve("nope", dir, None).is_err());
        assert!(resolver.resolve("nope", dir, None).is_err());
        assert_eq!(require.calls().len(), 2);
        assert!(resolver.cache().is_empty());
    }

    #[test]
    fn empty_path_counts_as_not_found() {
        let (mut resolver, _, _) = resolver(
            ResolveDomain::Js,
            Scripted::default().answer("empty", Answer::Path("")),
            Scripted::default(),
        );

        let err = resolver.resolve("empty", Path::new("/proj"), None).unwrap_err();
        assert!(matches!(err, ResolutionError::NotFound { .. }));
    }
}
