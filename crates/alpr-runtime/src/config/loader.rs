//! Configuration loader using figment.
//!
//! # Feature Flags
//!
//! - `toml-config`: enables TOML configuration files (`alpr.toml`, `config.toml`)
//! - `yaml-config`: enables YAML configuration files (`alpr.yaml`, `alpr.yml`, ...)
//!
//! With neither enabled, only defaults and environment variables apply.
//!
//! # Configuration Priority (lowest to highest)
//!
//! 1. Built-in defaults
//! 2. Programmatic values passed to [`ConfigLoader::merge`]
//! 3. Base config file (`alpr.toml`)
//! 4. Profile variant next to it (`alpr.{profile}.toml`)
//! 5. Environment variables (`ALPR_*`)
//!
//! # File Discovery
//!
//! Unless search paths are set, the current directory is searched first,
//! then `$LAMBDA_TASK_ROOT` (the unpacked deployment package on Lambda).
//! The first directory holding a base file or a profile variant wins.
//!
//! # Environment Variable Mapping
//!
//! `ALPR_` prefix, `__` separates nesting levels:
//!
//! - `ALPR_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//! - `ALPR_LOGGING__FILTERS__ALPR_FRAMEWORK=trace` → `logging.filters.alpr_framework = "trace"`
//! - `ALPR_INVOCATION__WARN_ON_UNMATCHED=false` → `invocation.warn_on_unmatched = false`
//!
//! `ALPR_PROFILE` selects the profile and is not read as a setting.
//!
//! # Example
//!
//! ```rust,ignore
//! use alpr_runtime::config::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .profile("production")
//!     .load()?;
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
#[cfg(any(feature = "yaml-config", feature = "toml-config"))]
use figment::providers::Format;
#[cfg(feature = "toml-config")]
use figment::providers::Toml;
#[cfg(feature = "yaml-config")]
use figment::providers::Yaml;
use figment::providers::{Env, Serialized};
use tracing::{debug, info, trace};

use super::error::{ConfigError, ConfigResult};
use super::schema::AlprConfig;
use super::validation::validate_config;

const ENV_PREFIX: &str = "ALPR_";
const PROFILE_VAR: &str = "ALPR_PROFILE";
const TASK_ROOT_VAR: &str = "LAMBDA_TASK_ROOT";

/// Deployment profile, selecting `alpr.{profile}.toml` overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Profile {
    /// `development` (default).
    #[default]
    Development,
    /// `production`.
    Production,
    /// Any other name, lowercased.
    Custom(String),
}

impl Profile {
    /// Returns the profile name used in file names.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Custom(name) => name,
        }
    }

    /// Parses a profile name, accepting `dev` and `prod` as short forms.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "development" | "dev" => Self::Development,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Reads the profile from `ALPR_PROFILE`, defaulting to Development.
    pub fn from_env() -> Self {
        std::env::var(PROFILE_VAR)
            .map(|p| Self::parse(&p))
            .unwrap_or_default()
    }

    /// Returns the profile variant of `base`: `alpr.toml` becomes
    /// `alpr.production.toml`.
    fn variant_of(&self, base: &Path) -> Option<PathBuf> {
        let stem = base.file_stem()?.to_str()?;
        let ext = base.extension()?.to_str()?;
        Some(base.with_file_name(format!("{stem}.{self}.{ext}")))
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layered configuration loader.
#[derive(Debug)]
pub struct ConfigLoader {
    overrides: Figment,
    profile: Profile,
    search_paths: Vec<PathBuf>,
    load_env: bool,
    config_file: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a loader using `ALPR_PROFILE`, default search paths and
    /// environment variables.
    pub fn new() -> Self {
        Self {
            overrides: Figment::new(),
            profile: Profile::from_env(),
            search_paths: Vec::new(),
            load_env: true,
            config_file: None,
        }
    }

    /// Sets the profile, overriding `ALPR_PROFILE`.
    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.profile = Profile::parse(profile.as_ref());
        self
    }

    /// Adds a directory to search for configuration files.
    ///
    /// Once any path is added the default search paths are no longer used.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Loads this file instead of searching. Its profile variant, if
    /// present next to it, still applies.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Ignores `ALPR_*` environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Merges configuration values programmatically, below files and
    /// environment variables.
    pub fn merge(mut self, config: AlprConfig) -> Self {
        self.overrides = self.overrides.merge(Serialized::defaults(config));
        self
    }

    /// Loads, extracts and validates the configuration.
    pub fn load(self) -> ConfigResult<AlprConfig> {
        let profile = self.profile.clone();
        let config: AlprConfig = self.build_figment()?.extract()?;
        validate_config(&config)?;

        debug!(
            profile = %profile,
            logging_level = %config.logging.level,
            "Configuration loaded"
        );

        Ok(config)
    }

    fn build_figment(self) -> ConfigResult<Figment> {
        let files = self.config_files()?;

        let mut figment = Figment::from(Serialized::defaults(AlprConfig::default()))
            .merge(self.overrides);
        if files.is_empty() {
            debug!("No configuration file found, using defaults");
        }
        for path in &files {
            info!(path = %path.display(), "Loading configuration file");
            figment = merge_file(figment, path)?;
        }

        if self.load_env {
            trace!(prefix = ENV_PREFIX, "Loading environment variables");
            figment = figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["profile"]).split("__"));
        }

        Ok(figment)
    }

    /// Files to merge, lowest priority first.
    fn config_files(&self) -> ConfigResult<Vec<PathBuf>> {
        if let Some(path) = &self.config_file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
            let mut files = vec![path.clone()];
            files.extend(self.profile.variant_of(path).filter(|p| p.exists()));
            return Ok(files);
        }

        for dir in self.search_dirs() {
            for name in file_names() {
                let base = dir.join(name);
                let variant = self.profile.variant_of(&base);
                let found: Vec<PathBuf> = std::iter::once(base)
                    .chain(variant)
                    .filter(|p| p.exists())
                    .collect();
                if !found.is_empty() {
                    return Ok(found);
                }
            }
        }
        Ok(Vec::new())
    }

    fn search_dirs(&self) -> Vec<PathBuf> {
        if !self.search_paths.is_empty() {
            return self.search_paths.clone();
        }

        let mut dirs: Vec<PathBuf> = std::env::current_dir().into_iter().collect();
        if let Some(task_root) = std::env::var_os(TASK_ROOT_VAR) {
            let task_root = PathBuf::from(task_root);
            if !dirs.contains(&task_root) {
                dirs.push(task_root);
            }
        }
        dirs
    }
}

/// Base file names for the enabled formats, in lookup order.
#[allow(unused_mut)]
fn file_names() -> Vec<&'static str> {
    let mut names = Vec::new();
    #[cfg(feature = "toml-config")]
    names.extend(["alpr.toml", "config.toml"]);
    #[cfg(feature = "yaml-config")]
    names.extend(["alpr.yaml", "alpr.yml", "config.yaml", "config.yml"]);
    names
}

/// Merges one file, picking the provider from its extension.
#[cfg_attr(
    not(any(feature = "toml-config", feature = "yaml-config")),
    allow(unused_variables)
)]
fn merge_file(figment: Figment, path: &Path) -> ConfigResult<Figment> {
    match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        #[cfg(feature = "toml-config")]
        "toml" => Ok(figment.merge(Toml::file(path))),
        #[cfg(feature = "yaml-config")]
        "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
        ext => Err(ConfigError::ParseError(format!(
            "Unsupported or disabled configuration file format: .{ext}"
        ))),
    }
}

/// Loads configuration from the default locations.
pub fn load_config() -> ConfigResult<AlprConfig> {
    ConfigLoader::new().load()
}

// =============================================================================
// Tests
// =============================================================================
