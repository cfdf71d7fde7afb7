//! High-level configuration structure for modkit.
//!
//! This module provides the main `ModkitConfig` struct and profile merging logic.
//! For file discovery, see the `discovery` module.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result as ConfigResult};
use crate::preset::{BuildConfig, BuildOverrides, BuildPreset};
use crate::settings::GlobalSettings;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModkitConfig {
    #[serde(default)]
    pub build: BuildOverrides,

    #[serde(default)]
    pub profiles: HashMap<String, ProfileConfig>,

    #[serde(default)]
    pub settings: GlobalSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub build: Value,

    #[serde(default)]
    pub settings: Value,
}

impl ModkitConfig {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use modkit_config::ModkitConfig;
    /// use serde_json::json;
    /// use std::path::PathBuf;
    ///
    /// let value = json!({
    ///     "build": {
    ///         "outdir": "./dist/bundle/object",
    ///         "alias": { "@src": "./src" }
    ///     }
    /// });
    ///
    /// let config = ModkitConfig::from_value(value).unwrap();
    /// assert_eq!(config.build.outdir, Some(PathBuf::from("./dist/bundle/object")));
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Merge the named profile's tables onto the base tables.
    ///
    /// Objects merge key by key; scalars and arrays replace.
    pub fn materialize_profile(mut self, profile: Option<&str>) -> ConfigResult<Self> {
        let Some(name) = profile else {
            return Ok(self);
        };

        let profile_cfg = self
            .profiles
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))?;

        if !profile_cfg.build.is_null() {
            self.build = merge_into(&self.build, &profile_cfg.build)?;
        }

        if !profile_cfg.settings.is_null() {
            self.settings = merge_into(&self.settings, &profile_cfg.settings)?;
        }

        tracing::debug!(profile = name, "materialized config profile");
        Ok(self)
    }

    /// Layer this configuration's build overrides onto the preset's base.
    pub fn into_build_config(self, preset: &BuildPreset) -> BuildConfig {
        preset.build(|preset| preset.base_config().apply(self.build))
    }
}

fn merge_into<T>(base: &T, update: &Value) -> ConfigResult<T>
where
    T: Serialize + serde::de::DeserializeOwned,
{
    let mut merged =
        serde_json::to_value(base).map_err(|err| ConfigError::InvalidProfileOverride {
            message: err.to_string(),
        })?;
    merge_values(&mut merged, update);
    serde_json::from_value(merged).map_err(|err| ConfigError::InvalidProfileOverride {
        message: err.to_string(),
    })
}

fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}
