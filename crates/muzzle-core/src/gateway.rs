//! The abstract chat-gateway collaborator.
//!
//! Everything platform-specific — member roles, rosters, the actual mute
//! call, delivering the report — sits behind [`GroupGateway`]. The decision
//! core never talks to a protocol directly.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::MemberRole;

/// Errors surfaced by gateway calls.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The gateway is not connected to the platform.
    #[error("gateway is not connected")]
    NotConnected,
    /// The platform rejected the call.
    #[error("API error ({retcode}): {message}")]
    Api {
        /// Platform return code.
        retcode: i64,
        /// Platform error message.
        message: String,
    },
    /// The call timed out.
    #[error("gateway call timed out")]
    Timeout,
    /// Other error.
    #[error("{0}")]
    Other(String),
}

/// Result type for gateway calls.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// One group member as reported by the roster lookup.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    /// Stable user identifier.
    pub user_id: String,
    /// The member's account nickname.
    pub nickname: String,
    /// The member's per-group display name (card), if set.
    pub card: Option<String>,
}

/// Group-moderation primitives supplied by the hosting bot framework.
///
/// Implementations are expected to be cheap to call repeatedly; the core
/// performs one role lookup per explicit-id target and at most one roster
/// fetch per request.
#[async_trait]
pub trait GroupGateway: Send + Sync {
    /// Looks up a member's role in a group.
    async fn member_role(&self, group_id: &str, user_id: &str) -> GatewayResult<MemberRole>;

    /// Fetches the full member roster of a group.
    async fn group_roster(&self, group_id: &str) -> GatewayResult<Vec<RosterEntry>>;

    /// Sets a member's mute duration. `0` lifts the mute.
    async fn set_mute_duration(
        &self,
        group_id: &str,
        user_id: &str,
        duration_secs: u64,
    ) -> GatewayResult<()>;

    /// The bot's own user identifier.
    fn bot_id(&self) -> &str;

    /// Delivers the aggregated report to the originating conversation.
    async fn send_report(&self, group_id: &str, text: &str) -> GatewayResult<()>;
}
