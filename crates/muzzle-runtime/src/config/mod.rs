//! Layered configuration for the muzzle runtime.
//!
//! See [`loader`] for source priority and environment variable mapping.

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use schema::{LoggingConfig, MuzzleConfig, PolicyConfig};

/// Loads configuration from the default locations.
pub fn load_config() -> ConfigResult<MuzzleConfig> {
    ConfigLoader::new().load()
}
