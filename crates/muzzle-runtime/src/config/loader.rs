//! Configuration loader using figment.
//!
//! Sources are layered, lowest to highest priority:
//!
//! 1. Built-in defaults
//! 2. `muzzle.toml` (or an explicit file passed to [`ConfigLoader::file`])
//! 3. Environment variables (`MUZZLE_*`, `__` as section separator)
//!
//! # Environment Variable Mapping
//!
//! - `MUZZLE_POLICY__MAX_BAN_TIME=1200` → `policy.max_ban_time = 1200`
//! - `MUZZLE_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//!
//! # Example
//!
//! ```rust,ignore
//! use muzzle_runtime::config::ConfigLoader;
//!
//! let config = ConfigLoader::new().load()?;
//! let policy = config.policy.to_policy();
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use tracing::debug;

use super::error::{ConfigError, ConfigResult};
use super::schema::MuzzleConfig;

/// Default config file searched in the working directory.
const DEFAULT_CONFIG_FILE: &str = "muzzle.toml";

/// Environment variable prefix.
const ENV_PREFIX: &str = "MUZZLE_";

/// Configuration loader with figment-based multi-source support.
pub struct ConfigLoader {
    file: Option<PathBuf>,
    with_env: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a loader with the default search behaviour.
    pub fn new() -> Self {
        Self {
            file: None,
            with_env: true,
        }
    }

    /// Loads from a specific file instead of searching `muzzle.toml`.
    ///
    /// Unlike the default search, an explicitly given file must exist.
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enables or disables the environment variable layer (default: on).
    pub fn with_env(mut self, enabled: bool) -> Self {
        self.with_env = enabled;
        self
    }

    /// Gathers all sources, extracts, and validates the configuration.
    pub fn load(self) -> ConfigResult<MuzzleConfig> {
        let mut figment = Figment::from(Serialized::defaults(MuzzleConfig::default()));

        match &self.file {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound(path.clone()));
                }
                debug!(path = %path.display(), "Loading configuration file");
                figment = figment.merge(Toml::file(path));
            }
            None => {
                // The default file is optional; Toml::file skips a missing one.
                figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
            }
        }

        if self.with_env {
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        }

        let config: MuzzleConfig = figment.extract()?;
        validate(&config)?;
        Ok(config)
    }
}

/// Checks cross-field constraints figment cannot express.
fn validate(config: &MuzzleConfig) -> ConfigResult<()> {
    if config.policy.min_ban_time > config.policy.max_ban_time {
        return Err(ConfigError::validation(format!(
            "policy.min_ban_time ({}) exceeds policy.max_ban_time ({})",
            config.policy.min_ban_time, config.policy.max_ban_time
        )));
    }
    Ok(())
}
