//! Layered configuration loading.
//!
//! Priority, lowest to highest:
//! 1. preset base config
//! 2. modkit.toml / package.json `modkit` field (with `--profile` applied)
//! 3. `MODKIT_*` environment variables (`MODKIT_PLATFORM=node`)
//! 4. command-line flags

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use modkit_config::{
    BuildConfig, BuildOverrides, BuildPreset, ConfigDiscovery, ConfigError, ConfigSource,
    GlobalSettings, ModkitConfig,
};

use crate::error::{CliError, Result};
use crate::logger::LogLevel;

pub const ENV_PREFIX: &str = "MODKIT_";

/// Fully layered configuration for one invocation.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Canonical project root
    pub root: PathBuf,
    /// Config source that contributed, if any
    pub source: Option<ConfigSource>,
    pub build: BuildConfig,
    pub settings: GlobalSettings,
}

/// Canonicalize a user-supplied directory.
pub fn canonical_dir(path: &Path) -> Result<PathBuf> {
    let path = path
        .canonicalize()
        .map_err(|_| CliError::FileNotFound(path.to_path_buf()))?;
    if !path.is_dir() {
        return Err(CliError::FileNotFound(path));
    }
    Ok(path)
}

/// Load the file layer for `root`, applying `profile`.
///
/// A missing config file is an empty layer unless a profile was requested.
pub fn load_file(
    root: &Path,
    profile: Option<&str>,
) -> Result<(Option<ConfigSource>, ModkitConfig)> {
    match ConfigDiscovery::new(root).locate(profile)? {
        Some((source, config)) => Ok((Some(source), config)),
        None => match profile {
            Some(name) => Err(ConfigError::ProfileNotFound(name.to_string()).into()),
            None => Ok((None, ModkitConfig::default())),
        },
    }
}

/// Load configuration from all layers.
pub fn load(root: &Path, profile: Option<&str>, cli: BuildOverrides) -> Result<LoadedConfig> {
    let root = canonical_dir(root)?;
    let (source, file) = load_file(&root, profile)?;

    let build = layer(
        &BuildPreset::default(),
        file.build,
        Figment::from(Env::prefixed(ENV_PREFIX)),
        cli,
    )?;

    tracing::debug!(
        root = %root.display(),
        source = ?source,
        platform = %build.platform,
        "configuration loaded"
    );

    Ok(LoadedConfig {
        root,
        source,
        build,
        settings: file.settings,
    })
}

/// Merge the layers and extract the build config.
///
/// `env` is any figment whose keys are build config field names.
pub fn layer(
    preset: &BuildPreset,
    file: BuildOverrides,
    env: Figment,
    cli: BuildOverrides,
) -> Result<BuildConfig> {
    let figment = Figment::new()
        .merge(Serialized::defaults(preset.base_config()))
        .merge(Serialized::defaults(file))
        .merge(env)
        .merge(Serialized::defaults(cli));

    Ok(figment.extract()?)
}

/// Log level named by `settings.log_level` after `profile` is applied, if the
/// config loads.
///
/// Errors are swallowed here; the command reports them after logging is up.
pub fn configured_log_level(root: &Path, profile: Option<&str>) -> Option<LogLevel> {
    let (_, config) = ConfigDiscovery::new(root).locate(profile).ok()??;
    config.settings.log_level?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::providers::{Format, Toml};
    use modkit_config::Platform;

    #[test]
    fn later_layers_win() {
        let file = BuildOverrides {
            platform: Some(Platform::Browser),
            target: Some("es2020".into()),
            ..Default::default()
        };
        let env = Figment::from(Toml::string("platform = \"neutral\"\nminify = true"));
        let cli = BuildOverrides {
            platform: Some(Platform::Node),
            ..Default::default()
        };

        let build = layer(&BuildPreset::default(), file, env, cli).unwrap();

        assert_eq!(build.platform, Platform::Node);
        assert_eq!(build.target, "es2020");
        assert!(build.minify);
        assert_eq!(build.outdir, PathBuf::from("./dist"));
    }

    #[test]
    fn empty_layers_yield_preset() {
        let build = layer(
            &BuildPreset::default(),
            BuildOverrides::default(),
            Figment::new(),
            BuildOverrides::default(),
        )
        .unwrap();

        assert_eq!(build, BuildPreset::default().base_config());
    }

    #[test]
    fn bad_env_value_is_invalid_config() {
        let env = Figment::from(Toml::string("platform = \"deno\""));
        let err = layer(
            &BuildPreset::default(),
            BuildOverrides::default(),
            env,
            BuildOverrides::default(),
        )
        .unwrap_err();

        assert!(matches!(err, CliError::InvalidConfig { .. }));
    }

    #[test]
    fn profile_without_config_file_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = load_file(temp.path(), Some("production")).unwrap_err();
        assert!(matches!(
            err,
            CliError::Config(ConfigError::ProfileNotFound(ref name)) if name == "production"
        ));
    }

    #[test]
    fn missing_config_file_is_empty_layer() {
        let temp = tempfile::TempDir::new().unwrap();
        let (source, config) = load_file(temp.path(), None).unwrap();
        assert!(source.is_none());
        assert_eq!(config.build, BuildOverrides::default());
    }

    #[test]
    fn configured_level_reads_settings() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("modkit.toml"),
            "[settings]\nlog_level = \"warn\"\n",
        )
        .unwrap();

        assert_eq!(configured_log_level(temp.path(), None), Some(LogLevel::Warn));
    }

    #[test]
    fn configured_level_honors_profile() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("modkit.toml"),
            "[settings]\nlog_level = \"error\"\n\n[profiles.dev.settings]\nlog_level = \"debug\"\n",
        )
        .unwrap();

        assert_eq!(
            configured_log_level(temp.path(), Some("dev")),
            Some(LogLevel::Debug)
        );
        assert_eq!(
            configured_log_level(temp.path(), None),
            Some(LogLevel::Error)
        );
        assert_eq!(configured_log_level(temp.path(), Some("missing")), None);
    }
}
