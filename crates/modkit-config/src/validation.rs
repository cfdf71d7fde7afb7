//! Pluggable config validation strategies
//!
//! Separates filesystem validation (for CLI use) from schema validation (for library use).

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::preset::BuildConfig;
use crate::resolver::join_root;

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use modkit_config::{BuildConfig, ConfigValidator, SchemaValidator};
///
/// let config = BuildConfig::default();
/// SchemaValidator.validate(&config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()> {
        for key in config.alias.keys() {
            if key.trim().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "alias keys cannot be empty".to_string(),
                    hint: Some("Remove empty keys from the 'alias' table".to_string()),
                });
            }

            // Aliases match whole specifiers or path prefixes only.
            if key.contains('*') {
                return Err(ConfigError::SchemaValidation {
                    message: format!("alias '{key}' contains a wildcard"),
                    hint: Some(
                        "Use a plain prefix such as '@src'; tsconfig 'paths' handles wildcards"
                            .to_string(),
                    ),
                });
            }
        }

        if let Some(extensions) = &config.extensions {
            if let Some(bad) = extensions.iter().find(|ext| !ext.starts_with('.')) {
                return Err(ConfigError::SchemaValidation {
                    message: format!("extension '{bad}' must start with '.'"),
                    hint: Some(format!("Write it as '.{}'", bad.trim_start_matches('.'))),
                });
            }
        }

        if let Some(fields) = &config.main_fields {
            if fields.iter().any(|field| field.trim().is_empty()) {
                return Err(ConfigError::SchemaValidation {
                    message: "main field names cannot be empty".to_string(),
                    hint: Some("Remove empty strings from 'main_fields'".to_string()),
                });
            }
        }

        if config.outdir.as_os_str().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "outdir cannot be empty".to_string(),
                hint: Some("Set 'outdir', e.g. \"./dist\"".to_string()),
            });
        }

        if config.target.trim().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "target cannot be empty".to_string(),
                hint: Some("Set 'target', e.g. \"es2019\"".to_string()),
            });
        }

        Ok(())
    }
}

/// Filesystem validator (for CLI use)
///
/// Checks that the project root and every alias target exist on disk.
/// The tsconfig is allowed to be missing.
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()> {
        SchemaValidator.validate(config)?;

        if !self.root.is_dir() {
            return Err(ConfigError::RootNotFound {
                path: self.root.clone(),
            });
        }

        for (alias, target) in &config.alias {
            let path = join_root(&self.root, target);
            if !path.exists() {
                return Err(ConfigError::AliasTargetNotFound {
                    alias: alias.clone(),
                    path,
                });
            }
        }

        Ok(())
    }
}

/// Convenience function for schema-only validation
pub fn validate_schema(config: &BuildConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience function for filesystem validation
pub fn validate_fs(config: &BuildConfig, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}
