//! Configuration schema definitions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use muzzle_core::Policy;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MuzzleConfig {
    /// Moderation policy settings.
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Moderation policy settings.
///
/// Field names keep the wire names the plugin variants historically used
/// (`min_ban_time`, `max_ban_time`, `allow_self_ban`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Users granted admin rank regardless of platform role.
    #[serde(default)]
    pub admin_user_ids: Vec<String>,

    /// Minimum (and default) mute duration in seconds.
    #[serde(default = "default_min_ban_time")]
    pub min_ban_time: u64,

    /// Maximum mute duration in seconds.
    #[serde(default = "default_max_ban_time")]
    pub max_ban_time: u64,

    /// Whether an issuer may mute themselves.
    #[serde(default)]
    pub allow_self_ban: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            admin_user_ids: Vec::new(),
            min_ban_time: default_min_ban_time(),
            max_ban_time: default_max_ban_time(),
            allow_self_ban: false,
        }
    }
}

impl PolicyConfig {
    /// Converts to the core policy record.
    pub fn to_policy(&self) -> Policy {
        Policy {
            min_duration_secs: self.min_ban_time,
            max_duration_secs: self.max_ban_time,
            allow_self_mute: self.allow_self_ban,
            admin_user_ids: self.admin_user_ids.iter().cloned().collect::<HashSet<_>>(),
        }
    }
}

fn default_min_ban_time() -> u64 {
    60
}

fn default_max_ban_time() -> u64 {
    600
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to include the event target in output.
    #[serde(default = "default_true")]
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            with_target: true,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
