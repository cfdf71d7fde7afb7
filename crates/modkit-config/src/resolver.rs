//! Static options that a module resolver is built from.
//!
//! A [`ResolverOptions`] value is constructed once per build and handed to the
//! resolver factory in `modkit-resolve`. It is plain data: nothing here touches
//! the filesystem.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexMap;
use path_clean::PathClean;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Extensions tried for script specifiers, in order.
pub const JS_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".mjs", ".js", ".jsx", ".json"];

/// Extensions tried for stylesheet specifiers, in order.
///
/// `.js` is included so that preprocessors (less plugins) can pull in JS files.
pub const CSS_EXTENSIONS: &[&str] = &[".less", ".css", ".sass", ".scss", ".js"];

/// Target platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Browser environment (default)
    #[default]
    Browser,
    /// Node.js
    Node,
    /// No platform-specific behaviour
    Neutral,
}

impl Platform {
    /// Condition name this platform contributes to `exports` matching.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Browser => "browser",
            Platform::Node => "node",
            Platform::Neutral => "neutral",
        }
    }

    /// package.json fields consulted when `main_fields` is not configured.
    pub fn default_main_fields(&self) -> Vec<String> {
        let fields: &[&str] = match self {
            Platform::Browser => &["browser", "module", "main"],
            Platform::Node | Platform::Neutral => &["module", "main"],
        };
        fields.iter().map(|f| f.to_string()).collect()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "browser" => Ok(Platform::Browser),
            "node" => Ok(Platform::Node),
            "neutral" => Ok(Platform::Neutral),
            other => Err(ConfigError::UnknownVariant {
                kind: "platform",
                value: other.to_string(),
            }),
        }
    }
}

/// What kind of file is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveDomain {
    /// Script imports; import kind selects ESM or CJS conditions
    #[default]
    Js,
    /// Stylesheet imports; always CJS conditions with the `~` fallback
    Css,
}

impl ResolveDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolveDomain::Js => "js",
            ResolveDomain::Css => "css",
        }
    }

    pub fn default_extensions(&self) -> Vec<String> {
        let exts = match self {
            ResolveDomain::Js => JS_EXTENSIONS,
            ResolveDomain::Css => CSS_EXTENSIONS,
        };
        exts.iter().map(|e| e.to_string()).collect()
    }
}

impl fmt::Display for ResolveDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolveDomain {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "js" | "script" => Ok(ResolveDomain::Js),
            "css" | "style" | "stylesheet" => Ok(ResolveDomain::Css),
            other => Err(ConfigError::UnknownVariant {
                kind: "resolve type",
                value: other.to_string(),
            }),
        }
    }
}

/// Options a resolver is constructed from.
///
/// Alias keys are unique and keep insertion order, which is also the order in
/// which they are tried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverOptions {
    #[serde(default)]
    pub platform: Platform,

    #[serde(default)]
    pub resolve_type: ResolveDomain,

    pub extensions: Vec<String>,

    pub root: PathBuf,

    #[serde(default)]
    pub alias: IndexMap<String, PathBuf>,

    /// tsconfig.json used for `paths` mapping. May not exist.
    pub tsconfig: PathBuf,

    pub main_fields: Vec<String>,

    /// Try `./specifier` relative to the importer before node_modules
    #[serde(default)]
    pub prefer_relative: bool,
}

impl ResolverOptions {
    /// Options for `domain` rooted at `root` with platform defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use modkit_config::{ResolveDomain, ResolverOptions};
    ///
    /// let options = ResolverOptions::new("/project", ResolveDomain::Css);
    /// assert_eq!(options.extensions[0], ".less");
    /// assert!(options.tsconfig.ends_with("tsconfig.json"));
    /// ```
    pub fn new(root: impl Into<PathBuf>, domain: ResolveDomain) -> Self {
        let platform = Platform::default();
        Self {
            platform,
            resolve_type: domain,
            extensions: domain.default_extensions(),
            root: root.into(),
            alias: IndexMap::new(),
            tsconfig: PathBuf::from("tsconfig.json"),
            main_fields: platform.default_main_fields(),
            prefer_relative: false,
        }
    }

    /// Set the platform. Main fields are reset to that platform's defaults.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self.main_fields = platform.default_main_fields();
        self
    }

    /// Add a path alias
    ///
    /// # Example
    /// ```
    /// use modkit_config::{ResolveDomain, ResolverOptions};
    ///
    /// let options = ResolverOptions::new("/project", ResolveDomain::Js)
    ///     .with_alias("@src", "./src")
    ///     .with_alias("@ui", "src/ui");
    /// assert_eq!(options.alias.len(), 2);
    /// ```
    pub fn with_alias(mut self, alias: impl Into<String>, target: impl Into<PathBuf>) -> Self {
        self.alias.insert(alias.into(), target.into());
        self
    }

    pub fn with_tsconfig(mut self, tsconfig: impl Into<PathBuf>) -> Self {
        self.tsconfig = tsconfig.into();
        self
    }

    pub fn with_main_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.main_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_prefer_relative(mut self, prefer_relative: bool) -> Self {
        self.prefer_relative = prefer_relative;
        self
    }

    /// Absolute tsconfig location.
    pub fn tsconfig_path(&self) -> PathBuf {
        join_root(&self.root, &self.tsconfig)
    }

    /// Alias entries with relative targets anchored at the project root.
    pub fn alias_targets(&self) -> Vec<(String, PathBuf)> {
        self.alias
            .iter()
            .map(|(key, target)| (key.clone(), join_root(&self.root, target)))
            .collect()
    }
}

/// Anchor `path` at `root` unless it is already absolute.
pub(crate) fn join_root(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf().clean()
    } else {
        root.join(path).clean()
    }
}
