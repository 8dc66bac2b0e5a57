//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! # Configuration-Based Initialization
//!
//! ```rust,ignore
//! use muzzle_runtime::{config, logging};
//!
//! let cfg = config::load_config()?;
//! logging::init_from_config(&cfg.logging);
//! ```
//!
//! # Manual Initialization
//!
//! ```rust,ignore
//! use muzzle_runtime::logging::LoggingBuilder;
//!
//! LoggingBuilder::new()
//!     .level("debug")
//!     .directive("muzzle_core=trace")
//!     .init();
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::config::LoggingConfig;

/// Initialize logging from a [`LoggingConfig`].
///
/// Uses `try_init` internally so a second call (e.g. from tests) is a no-op
/// instead of a panic.
pub fn init_from_config(config: &LoggingConfig) {
    let _ = LoggingBuilder::from_config(config).try_init();
}

/// A builder for configuring logging.
#[derive(Debug, Clone)]
pub struct LoggingBuilder {
    level: String,
    directives: Vec<String>,
    with_target: bool,
}

impl Default for LoggingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingBuilder {
    /// Creates a builder with level `info` and targets enabled.
    pub fn new() -> Self {
        Self {
            level: "info".to_string(),
            directives: Vec::new(),
            with_target: true,
        }
    }

    /// Creates a builder from a [`LoggingConfig`].
    pub fn from_config(config: &LoggingConfig) -> Self {
        Self {
            level: config.level.clone(),
            directives: Vec::new(),
            with_target: config.with_target,
        }
    }

    /// Sets the base log level.
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Adds an `EnvFilter` directive, e.g. `"muzzle_core=debug"`.
    pub fn directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// Enables/disables event targets in output.
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    fn filter(&self) -> EnvFilter {
        let mut spec = self.level.clone();
        for directive in &self.directives {
            spec.push(',');
            spec.push_str(directive);
        }
        // RUST_LOG wins over the configured spec when set.
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(spec))
    }

    /// Initializes the global subscriber, panicking if one is already set.
    pub fn init(self) {
        self.try_init().expect("logging already initialized");
    }

    /// Initializes the global subscriber, returning an error if one is
    /// already set.
    pub fn try_init(self) -> Result<(), TryInitError> {
        let filter = self.filter();
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(self.with_target)
            .finish()
            .try_init()
    }
}
