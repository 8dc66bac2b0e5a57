//! # Muzzle Runtime
//!
//! Configuration loading and logging setup for the muzzle moderation core.
//!
//! The host framework embeds [`muzzle_core`] and uses this crate to build
//! the [`Policy`](muzzle_core::Policy) once at startup:
//!
//! ```rust,ignore
//! use muzzle_runtime::{config, logging};
//!
//! let cfg = config::load_config()?;
//! logging::init_from_config(&cfg.logging);
//! let policy = cfg.policy.to_policy();
//! ```

pub mod config;
pub mod logging;

pub use config::{ConfigError, ConfigLoader, ConfigResult, MuzzleConfig, load_config};
pub use logging::LoggingBuilder;
