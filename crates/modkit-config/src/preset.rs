//! Build presets and the typed build configuration derived from them.
//!
//! A project configuration starts from a preset's base config and layers
//! overrides on top of it:
//!
//! ```
//! use modkit_config::{BuildOverrides, BuildPreset, BuildType};
//! use indexmap::IndexMap;
//! use std::path::PathBuf;
//!
//! let config = BuildPreset::default().build(|preset| {
//!     preset.base_config().apply(BuildOverrides {
//!         alias: Some(IndexMap::from([("@src".to_string(), PathBuf::from("./src"))])),
//!         outdir: Some(PathBuf::from("./dist/bundle/object")),
//!         build_type: Some(BuildType::Bundle),
//!         ..Default::default()
//!     })
//! });
//!
//! assert_eq!(config.outdir, PathBuf::from("./dist/bundle/object"));
//! ```
//!
//! Overrides replace a field whole. In particular an overriding `alias` map
//! replaces the preset's map instead of merging into it.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::resolver::{join_root, Platform, ResolveDomain, ResolverOptions};

/// How sources are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    /// Bundle each input with its dependencies
    #[default]
    Bundle,
    /// Transpile file by file, keeping the source layout
    Bundleless,
}

/// Module format of the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Esm,
    Cjs,
    Umd,
    Iife,
}

/// Fully materialized build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(alias = "buildType")]
    pub build_type: BuildType,

    pub format: Format,

    /// ECMAScript target, e.g. `es2019`
    pub target: String,

    pub platform: Platform,

    pub input: Vec<PathBuf>,

    #[serde(alias = "sourceDir")]
    pub source_dir: PathBuf,

    pub outdir: PathBuf,

    /// Path aliases, e.g. `@src` → `./src`
    pub alias: IndexMap<String, PathBuf>,

    pub tsconfig: PathBuf,

    /// Script-domain extension override. Stylesheets always use the css list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    /// package.json fields to consult; platform defaults when unset
    #[serde(
        default,
        alias = "mainFields",
        skip_serializing_if = "Option::is_none"
    )]
    pub main_fields: Option<Vec<String>>,

    #[serde(default, alias = "preferRelative")]
    pub prefer_relative: bool,

    #[serde(default)]
    pub sourcemap: bool,

    #[serde(default)]
    pub minify: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            build_type: BuildType::Bundle,
            format: Format::Esm,
            target: "es2019".to_string(),
            platform: Platform::Node,
            input: vec![PathBuf::from("src/index.ts")],
            source_dir: PathBuf::from("src"),
            outdir: PathBuf::from("./dist"),
            alias: IndexMap::new(),
            tsconfig: PathBuf::from("./tsconfig.json"),
            extensions: None,
            main_fields: None,
            prefer_relative: false,
            sourcemap: false,
            minify: false,
        }
    }
}

/// Partial build configuration. Every set field replaces the base value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOverrides {
    #[serde(default, alias = "buildType", skip_serializing_if = "Option::is_none")]
    pub build_type: Option<BuildType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Vec<PathBuf>>,

    #[serde(default, alias = "sourceDir", skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outdir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<IndexMap<String, PathBuf>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsconfig: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    #[serde(default, alias = "mainFields", skip_serializing_if = "Option::is_none")]
    pub main_fields: Option<Vec<String>>,

    #[serde(
        default,
        alias = "preferRelative",
        skip_serializing_if = "Option::is_none"
    )]
    pub prefer_relative: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sourcemap: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minify: Option<bool>,
}

impl BuildOverrides {
    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merge(mut self, other: BuildOverrides) -> Self {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        take!(
            build_type,
            format,
            target,
            platform,
            input,
            source_dir,
            outdir,
            alias,
            tsconfig,
            extensions,
            main_fields,
            prefer_relative,
            sourcemap,
            minify,
        );
        self
    }
}

impl BuildConfig {
    /// Apply overrides field by field.
    pub fn apply(mut self, overrides: BuildOverrides) -> Self {
        if let Some(build_type) = overrides.build_type {
            self.build_type = build_type;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        if let Some(target) = overrides.target {
            self.target = target;
        }
        if let Some(platform) = overrides.platform {
            self.platform = platform;
        }
        if let Some(input) = overrides.input {
            self.input = input;
        }
        if let Some(source_dir) = overrides.source_dir {
            self.source_dir = source_dir;
        }
        if let Some(outdir) = overrides.outdir {
            self.outdir = outdir;
        }
        if let Some(alias) = overrides.alias {
            self.alias = alias;
        }
        if let Some(tsconfig) = overrides.tsconfig {
            self.tsconfig = tsconfig;
        }
        if overrides.extensions.is_some() {
            self.extensions = overrides.extensions;
        }
        if overrides.main_fields.is_some() {
            self.main_fields = overrides.main_fields;
        }
        if let Some(prefer_relative) = overrides.prefer_relative {
            self.prefer_relative = prefer_relative;
        }
        if let Some(sourcemap) = overrides.sourcemap {
            self.sourcemap = sourcemap;
        }
        if let Some(minify) = overrides.minify {
            self.minify = minify;
        }
        self
    }

    /// Derive resolver options for `domain`, anchoring alias targets and the
    /// tsconfig path at `root`.
    pub fn resolver_options(&self, root: &Path, domain: ResolveDomain) -> ResolverOptions {
        let extensions = match (domain, &self.extensions) {
            (ResolveDomain::Js, Some(extensions)) => extensions.clone(),
            _ => domain.default_extensions(),
        };

        ResolverOptions {
            platform: self.platform,
            resolve_type: domain,
            extensions,
            root: root.to_path_buf(),
            alias: self
                .alias
                .iter()
                .map(|(key, target)| (key.clone(), join_root(root, target)))
                .collect(),
            tsconfig: join_root(root, &self.tsconfig),
            main_fields: self
                .main_fields
                .clone()
                .unwrap_or_else(|| self.platform.default_main_fields()),
            prefer_relative: self.prefer_relative,
        }
    }
}

/// The capability set a preset function receives.
#[derive(Debug, Clone, Default)]
pub struct BuildPreset {
    base: BuildConfig,
}

impl BuildPreset {
    pub fn new(base: BuildConfig) -> Self {
        Self { base }
    }

    /// A copy of the preset's base configuration.
    pub fn base_config(&self) -> BuildConfig {
        self.base.clone()
    }

    /// Run a preset function against this preset.
    pub fn build<F>(&self, preset_fn: F) -> BuildConfig
    where
        F: FnOnce(&BuildPreset) -> BuildConfig,
    {
        preset_fn(self)
    }
}
