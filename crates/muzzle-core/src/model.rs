//! Core data model for mute/unmute requests.
//!
//! All types here are plain values: created once per incoming event, carried
//! through the pipeline, and discarded after the report is rendered. Nothing
//! is persisted.

use serde::{Deserialize, Serialize};

/// The operation a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuteAction {
    /// Silence the target for a duration.
    Mute,
    /// Lift an existing mute (duration is always 0).
    Unmute,
}

/// A reference to a user before resolution.
///
/// Exactly one representation applies: a stable identifier taken from a
/// structured mention element, or a display-name string extracted from an
/// embedded directive that still needs a roster lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetRef {
    /// A stable user identifier from an at-mention.
    UserId(String),
    /// A display name to be matched against the group roster.
    Name(String),
}

impl TargetRef {
    /// Display form used in report lines.
    pub fn label(&self) -> &str {
        match self {
            Self::UserId(id) => id,
            Self::Name(name) => name,
        }
    }
}

/// One parsed mute/unmute request, immutable after parsing.
#[derive(Debug, Clone)]
pub struct MuteRequest {
    /// User who issued the command or directive.
    pub issuer_id: String,
    /// Group the request applies to.
    pub group_id: String,
    /// Mute or unmute.
    pub action: MuteAction,
    /// Referenced users, in message order.
    pub targets: Vec<TargetRef>,
    /// Requested duration in seconds. `None` means the policy minimum
    /// applies; always `None` for unmute.
    pub requested_duration: Option<u64>,
}

/// The role of a member within a group.
///
/// Ordering follows rank: `Member < Admin < Owner`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Regular member with no special permissions.
    #[default]
    Member,
    /// Administrator with elevated permissions.
    Admin,
    /// Owner/creator of the group with full permissions.
    Owner,
}

impl MemberRole {
    /// Numeric rank: member=0, admin=1, owner=2.
    pub fn rank(self) -> u8 {
        match self {
            Self::Member => 0,
            Self::Admin => 1,
            Self::Owner => 2,
        }
    }

    /// Parses a gateway role string, case-insensitively.
    ///
    /// Unknown strings fall back to [`MemberRole::Member`]; gateways report
    /// free-form role names and an unrecognised one must never grant rank.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "owner" => Self::Owner,
            "admin" => Self::Admin,
            _ => Self::Member,
        }
    }
}

/// A successfully resolved target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Stable user identifier.
    pub user_id: String,
    /// The target's role in the group.
    pub role: MemberRole,
}

/// Outcome of resolving one [`TargetRef`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The ref mapped to a group member.
    Found(ResolvedTarget),
    /// No member matched; downstream authorization denies with
    /// [`ReasonCode::TargetNotFound`].
    Unresolved,
}

/// Why a target was denied or failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReasonCode {
    /// The target ref could not be resolved to a group member.
    TargetNotFound,
    /// Issuer targeted themselves and the policy forbids self-mute.
    SelfMuteForbidden,
    /// The issuer lacks admin rank for this operation.
    InsufficientPermission,
    /// The target's rank is equal to or above the issuer's.
    TargetRankTooHigh,
    /// The gateway call failed; carries the underlying error text.
    ExecutionFailed(String),
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TargetNotFound => write!(f, "target not found"),
            Self::SelfMuteForbidden => write!(f, "self-mute is not allowed"),
            Self::InsufficientPermission => write!(f, "insufficient permission"),
            Self::TargetRankTooHigh => write!(f, "target rank too high"),
            Self::ExecutionFailed(e) => write!(f, "execution failed: {e}"),
        }
    }
}

/// An authorization decision for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Proceed with the given duration (already clamped; 0 for unmute).
    Allow {
        /// Duration in seconds to apply.
        duration: u64,
    },
    /// Do not proceed.
    Deny {
        /// The denial reason.
        reason: ReasonCode,
    },
}

/// Terminal outcome for one target, in original request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// The originating target ref.
    pub target: TargetRef,
    /// Applied duration on success, reason on denial/failure.
    pub result: Result<u64, ReasonCode>,
}

impl ActionOutcome {
    /// Whether the gateway call was made and succeeded.
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}
