//! The read-only moderation policy.

use std::collections::HashSet;

/// Policy bounds and allow-lists, loaded once at startup.
///
/// The authorization engine reads this for every decision; it never changes
/// after construction.
#[derive(Debug, Clone)]
pub struct Policy {
    /// Shortest mute the policy will apply; also the default when a request
    /// carries no duration.
    pub min_duration_secs: u64,
    /// Longest mute the policy will apply.
    pub max_duration_secs: u64,
    /// Whether an issuer may mute themselves.
    pub allow_self_mute: bool,
    /// Users granted admin rank regardless of their platform role.
    pub admin_user_ids: HashSet<String>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            min_duration_secs: 60,
            max_duration_secs: 600,
            allow_self_mute: false,
            admin_user_ids: HashSet::new(),
        }
    }
}

impl Policy {
    /// Clamps a requested duration into the policy bounds.
    ///
    /// An unset duration falls back to the minimum. Unmute never goes
    /// through here; its duration is fixed at 0.
    pub fn clamp(&self, requested: Option<u64>) -> u64 {
        requested
            .unwrap_or(self.min_duration_secs)
            .clamp(self.min_duration_secs, self.max_duration_secs)
    }

    /// Whether the user is on the admin allow-list.
    pub fn is_listed_admin(&self, user_id: &str) -> bool {
        self.admin_user_ids.contains(user_id)
    }
}
