//! Layered loading of logging settings.

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;

use crate::domain::errors::ConfigError;
use crate::domain::models::LoggingSettings;

/// Project-local settings file read by [`ConfigLoader::load`].
pub const DEFAULT_CONFIG_FILE: &str = "sevlog.yaml";

/// Prefix of environment variable overrides (`SEVLOG_LEVEL`, `SEVLOG_JSON`).
pub const ENV_PREFIX: &str = "SEVLOG_";

/// Logging settings loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `sevlog.yaml` in the working directory (optional)
    /// 3. Environment variables (`SEVLOG_*` prefix)
    ///
    /// The level is not validated: unknown names fall back to WARN when the
    /// logger is built.
    pub fn load() -> Result<LoggingSettings, ConfigError> {
        let settings = Figment::new()
            .merge(Serialized::defaults(LoggingSettings::default()))
            .merge(Yaml::file(DEFAULT_CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?;
        Ok(settings)
    }

    /// Load settings from a specific file, which must exist
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<LoggingSettings, ConfigError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::MissingFile(path.display().to_string()));
        }

        let settings = Figment::new()
            .merge(Serialized::defaults(LoggingSettings::default()))
            .merge(Yaml::file(path))
            .extract()?;
        Ok(settings)
    }
}
