//! Locating a project's modkit configuration.
//!
//! Two places are checked under the project root, first match wins:
//!
//! 1. `modkit.toml`
//! 2. the `"modkit"` object of `package.json`
//!
//! A package.json without that field, or with it set to `null`, is not a
//! config source.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::ModkitConfig;
use crate::error::{ConfigError, Result};

pub const CONFIG_FILE_NAME: &str = "modkit.toml";

pub const PACKAGE_JSON_FIELD: &str = "modkit";

/// Where a project's configuration was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Toml(PathBuf),
    PackageJson(PathBuf),
}

impl ConfigSource {
    /// Classify a file by name; anything other than `package.json` is TOML.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.file_name().is_some_and(|name| name == "package.json") {
            ConfigSource::PackageJson(path)
        } else {
            ConfigSource::Toml(path)
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ConfigSource::Toml(path) | ConfigSource::PackageJson(path) => path,
        }
    }

    /// Read the raw config table.
    fn read(&self) -> Result<Value> {
        let content = fs::read_to_string(self.path())?;
        let parse_error = |message: String| ConfigError::Parse {
            path: self.path().to_path_buf(),
            message,
        };

        match self {
            ConfigSource::Toml(_) => toml::from_str(&content).map_err(|e| parse_error(e.to_string())),
            ConfigSource::PackageJson(path) => {
                let mut manifest: Value =
                    serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?;
                match manifest.get_mut(PACKAGE_JSON_FIELD).map(Value::take) {
                    None | Some(Value::Null) => {
                        Err(ConfigError::MissingPackageField { path: path.clone() })
                    }
                    Some(table) => Ok(table),
                }
            }
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Toml(path) => write!(f, "{}", path.display()),
            ConfigSource::PackageJson(path) => {
                write!(f, "{} (\"{PACKAGE_JSON_FIELD}\" field)", path.display())
            }
        }
    }
}

/// Finds and loads the config for one project root.
///
/// ```no_run
/// use modkit_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new("/project");
/// if let Some((source, config)) = discovery.locate(Some("production"))? {
///     println!("{source}: outdir {:?}", config.build.outdir);
/// }
/// # Ok::<(), modkit_config::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The source that would be loaded, if any.
    pub fn find(&self) -> Option<ConfigSource> {
        let toml = self.root.join(CONFIG_FILE_NAME);
        if toml.is_file() {
            return Some(ConfigSource::Toml(toml));
        }

        let manifest = self.root.join("package.json");
        has_modkit_field(&manifest).then(|| ConfigSource::PackageJson(manifest))
    }

    /// Find the source, load it and apply `profile`.
    ///
    /// `Ok(None)` means the project has no config; a requested profile is
    /// then not checked.
    pub fn locate(&self, profile: Option<&str>) -> Result<Option<(ConfigSource, ModkitConfig)>> {
        let Some(source) = self.find() else {
            tracing::debug!(root = %self.root.display(), "no modkit config");
            return Ok(None);
        };

        let config = self.load_source(&source)?.materialize_profile(profile)?;
        Ok(Some((source, config)))
    }

    /// Load the discovered config, failing with [`ConfigError::NotFound`] when
    /// there is none.
    pub fn load(&self) -> Result<ModkitConfig> {
        self.locate(None)?
            .map(|(_, config)| config)
            .ok_or(ConfigError::NotFound)
    }

    pub fn load_with_profile(&self, profile: &str) -> Result<ModkitConfig> {
        self.locate(Some(profile))?
            .map(|(_, config)| config)
            .ok_or(ConfigError::NotFound)
    }

    /// Load an explicit file, skipping discovery.
    pub fn load_from(&self, path: &Path) -> Result<ModkitConfig> {
        self.load_source(&ConfigSource::from_path(path))
    }

    pub fn load_source(&self, source: &ConfigSource) -> Result<ModkitConfig> {
        tracing::debug!(%source, "loading config");
        ModkitConfig::from_value(source.read()?)
    }
}

/// A package.json that cannot be read or parsed is not a config source.
fn has_modkit_field(manifest: &Path) -> bool {
    let Ok(content) = fs::read_to_string(manifest) else {
        return false;
    };
    match serde_json::from_str::<Value>(&content) {
        Ok(parsed) => parsed
            .get(PACKAGE_JSON_FIELD)
            .is_some_and(|field| !field.is_null()),
        Err(err) => {
            tracing::debug!(path = %manifest.display(), error = %err, "skipping unparsable package.json");
            false
        }
    }
}

/// Load the config for the current directory.
pub fn discover() -> Result<ModkitConfig> {
    ConfigDiscovery::new(std::env::current_dir()?).load()
}

/// Load the config for the current directory with `profile` applied.
pub fn discover_with_profile(profile: &str) -> Result<ModkitConfig> {
    ConfigDiscovery::new(std::env::current_dir()?).load_with_profile(profile)
}
