//! Settings loader using figment.
//!
//! # Feature Flags
//!
//! - `toml-config` *(default)*: enables TOML settings files (`livecfg.toml`)
//! - `yaml-config`: enables YAML settings files (`livecfg.yaml`, `livecfg.yml`)
//!
//! Both features can be enabled at once; both formats are then searched.
//!
//! # Priority (lowest to highest)
//!
//! 1. Built-in defaults
//! 2. Profile-specific file (`livecfg.{profile}.toml` / `livecfg.{profile}.yaml`)
//! 3. Main file (`livecfg.toml` / `livecfg.yaml`)
//! 4. Environment variables (`LIVECFG_*`)
//! 5. Programmatic overrides
//!
//! # Environment Variable Mapping
//!
//! Variables use the `LIVECFG_` prefix with `__` as the nesting separator:
//!
//! - `LIVECFG_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//! - `LIVECFG_NOTIFY__QUEUE_CAPACITY=16` → `notify.queue_capacity = 16`
//!
//! # Example
//!
//! ```rust,ignore
//! use livecfg_runtime::settings::SettingsLoader;
//!
//! let settings = SettingsLoader::new()
//!     .profile("production")
//!     .set("logging.level", "warn")
//!     .load()?;
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
#[cfg(any(feature = "yaml-config", feature = "toml-config"))]
use figment::providers::Format;
#[cfg(feature = "toml-config")]
use figment::providers::Toml;
#[cfg(feature = "yaml-config")]
use figment::providers::Yaml;
use figment::providers::{Env, Serialized};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use super::error::{SettingsError, SettingsResult};
use super::schema::RuntimeSettings;
use super::validation::validate_settings;

const ENV_PREFIX: &str = "LIVECFG_";
const PROFILE_VAR: &str = "LIVECFG_PROFILE";
const FILE_STEM: &str = "livecfg";

/// Settings profile for environment-specific files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Profile {
    #[default]
    Development,
    Production,
    Custom(String),
}

impl Profile {
    /// Returns the profile name as a string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Custom(name) => name,
        }
    }

    /// Parses a profile name; `prod` and `dev` are accepted as short forms.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "development" | "dev" => Self::Development,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Reads the profile from `LIVECFG_PROFILE`, defaulting to development.
    pub fn from_env() -> Self {
        std::env::var(PROFILE_VAR)
            .map(|p| Self::parse(&p))
            .unwrap_or_default()
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layered settings loader.
pub struct SettingsLoader {
    profile: Profile,
    search_paths: Vec<PathBuf>,
    load_env: bool,
    settings_file: Option<PathBuf>,
    overrides: Figment,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    /// Creates a loader with the profile taken from the environment.
    pub fn new() -> Self {
        Self {
            profile: Profile::from_env(),
            search_paths: Vec::new(),
            load_env: true,
            settings_file: None,
            overrides: Figment::new(),
        }
    }

    /// Sets the profile.
    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.profile = Profile::parse(profile.as_ref());
        self
    }

    /// Adds a directory to search for settings files.
    ///
    /// Without any search path the current directory and the user config
    /// directory (`<config_dir>/livecfg`) are searched.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Loads exactly this file instead of searching.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.settings_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enables environment variables (default).
    pub fn with_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Disables environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Overrides a single value by its dotted path, e.g. `"logging.level"`.
    pub fn set<T: Serialize>(mut self, key: &str, value: T) -> Self {
        self.overrides = self.overrides.merge(Serialized::default(key, value));
        self
    }

    /// Overrides every value with `settings`.
    pub fn merge(mut self, settings: RuntimeSettings) -> Self {
        self.overrides = self.overrides.merge(Serialized::defaults(settings));
        self
    }

    /// Loads, validates and returns the settings.
    pub fn load(self) -> SettingsResult<RuntimeSettings> {
        let profile = self.profile.clone();
        let figment = self.build_figment()?;

        let settings: RuntimeSettings = figment.extract()?;
        validate_settings(&settings)?;

        debug!(
            profile = %profile,
            logging_level = %settings.logging.level,
            queue_capacity = settings.notify.queue_capacity,
            "Settings loaded"
        );

        Ok(settings)
    }

    fn build_figment(self) -> SettingsResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(RuntimeSettings::default()));

        if let Some(path) = &self.settings_file {
            if !path.exists() {
                return Err(SettingsError::FileNotFound(path.clone()));
            }
            info!(path = %path.display(), "Loading settings file");
            figment = Self::merge_settings_file(figment, path)?;
        } else {
            figment = self.load_settings_files(figment);
        }

        if self.load_env {
            trace!(prefix = ENV_PREFIX, "Loading environment variables");
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        }

        Ok(figment.merge(self.overrides))
    }

    fn merge_settings_file(figment: Figment, path: &Path) -> SettingsResult<Figment> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            #[cfg(feature = "toml-config")]
            "toml" => Ok(figment.merge(Toml::file(path))),
            #[cfg(feature = "yaml-config")]
            "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
            _ => Err(SettingsError::UnsupportedFormat(ext.to_string())),
        }
    }

    fn resolve_search_paths(&self) -> Vec<PathBuf> {
        if !self.search_paths.is_empty() {
            return self.search_paths.clone();
        }
        let mut paths = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd);
        }
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join(FILE_STEM));
        }
        paths
    }

    /// Searches `search_paths × extensions` and merges the first main file
    /// found, preceded by its profile-specific sibling if present.
    #[cfg(any(feature = "toml-config", feature = "yaml-config"))]
    fn load_format_files<F>(
        &self,
        mut figment: Figment,
        search_paths: &[PathBuf],
        extensions: &[&str],
        merge_fn: F,
    ) -> (Figment, bool)
    where
        F: Fn(Figment, &Path) -> Figment,
    {
        for search_path in search_paths {
            for ext in extensions {
                let profile_path =
                    search_path.join(format!("{FILE_STEM}.{}.{ext}", self.profile.as_str()));
                if profile_path.exists() {
                    debug!(path = %profile_path.display(), "Loading profile-specific settings");
                    figment = merge_fn(figment, &profile_path);
                }

                let base_path = search_path.join(format!("{FILE_STEM}.{ext}"));
                if base_path.exists() {
                    info!(path = %base_path.display(), "Loading settings file");
                    figment = merge_fn(figment, &base_path);
                    return (figment, true);
                }
            }
        }
        (figment, false)
    }

    fn load_settings_files(&self, mut figment: Figment) -> Figment {
        let search_paths = self.resolve_search_paths();
        let mut found = false;

        #[cfg(feature = "toml-config")]
        {
            let (f, ok) =
                self.load_format_files(figment, &search_paths, &["toml"], |fig, path| {
                    fig.merge(Toml::file(path))
                });
            figment = f;
            found |= ok;
        }

        #[cfg(feature = "yaml-config")]
        {
            let (f, ok) =
                self.load_format_files(figment, &search_paths, &["yaml", "yml"], |fig, path| {
                    fig.merge(Yaml::file(path))
                });
            figment = f;
            found |= ok;
        }

        if !found {
            warn!(profile = %self.profile, "No settings file found, using defaults");
        }
        figment
    }
}

/// Loads settings from the default locations.
pub fn load_settings() -> SettingsResult<RuntimeSettings> {
    SettingsLoader::new().load()
}

/// Loads settings from one file plus the environment.
pub fn load_settings_from_file<P: AsRef<Path>>(path: P) -> SettingsResult<RuntimeSettings> {
    SettingsLoader::new().file(path).load()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::schema::{LogFormat, LogLevel};
    use std::fs;

    #[test]
    fn test_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SettingsLoader::new()
            .search_path(dir.path())
            .without_env()
            .load()
            .unwrap();

        assert_eq!(settings, RuntimeSettings::default());
    }

    #[test]
    fn test_profile_parse() {
        assert_eq!(Profile::parse("PROD"), Profile::Production);
        assert_eq!(Profile::parse("dev"), Profile::Development);
        assert_eq!(
            Profile::parse("staging"),
            Profile::Custom("staging".to_string())
        );
    }

    #[test]
    fn test_profile_from_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env(PROFILE_VAR, "production");
            assert_eq!(Profile::from_env(), Profile::Production);
            Ok(())
        });
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_profile_file_then_main_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("livecfg.staging.toml"),
            "[logging]\nlevel = \"debug\"\nformat = \"pretty\"\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("livecfg.toml"),
            "[logging]\nformat = \"full\"\n\n[notify]\nqueue_capacity = 16\n",
        )
        .unwrap();

        let settings = SettingsLoader::new()
            .profile("staging")
            .search_path(dir.path())
            .without_env()
            .load()
            .unwrap();

        assert_eq!(settings.logging.level, LogLevel::Debug);
        assert_eq!(settings.logging.format, LogFormat::Full);
        assert_eq!(settings.notify.queue_capacity, 16);
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_environment_and_overrides() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("livecfg.toml", "[logging]\nlevel = \"warn\"\n")?;
            jail.set_env("LIVECFG_LOGGING__LEVEL", "debug");
            jail.set_env("LIVECFG_NOTIFY__QUEUE_CAPACITY", "7");

            let settings = SettingsLoader::new()
                .profile("development")
                .search_path(jail.directory())
                .set("notify.queue_capacity", 3)
                .load()
                .map_err(|e| e.to_string())?;

            assert_eq!(settings.logging.level, LogLevel::Debug);
            assert_eq!(settings.notify.queue_capacity, 3);
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = SettingsLoader::new()
            .file("/nonexistent/livecfg.toml")
            .without_env()
            .load();
        assert!(matches!(result, Err(SettingsError::FileNotFound(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("livecfg.ini");
        fs::write(&path, "level=debug").unwrap();

        let result = SettingsLoader::new().file(&path).without_env().load();
        assert!(matches!(result, Err(SettingsError::UnsupportedFormat(ext)) if ext == "ini"));
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("livecfg.toml");
        fs::write(&path, "[notify]\nqueue_capacity = 0\n").unwrap();

        let result = SettingsLoader::new().file(&path).without_env().load();
        assert!(matches!(result, Err(SettingsError::Validation { .. })));

        fs::write(&path, "[logging]\nlevel = \"loud\"\n").unwrap();
        let result = SettingsLoader::new().file(&path).without_env().load();
        assert!(matches!(result, Err(SettingsError::Extract(_))));
    }
}
