//! The authorization decision function.

use crate::model::{Decision, MemberRole, MuteAction, Resolution, ReasonCode};
use crate::policy::Policy;

/// Decides whether one target may be acted on, and with what duration.
///
/// Pure: no I/O, no shared state. Rules are checked in order and the first
/// match wins:
///
/// 1. unresolved target → `TargetNotFound`
/// 2. self-targeting with self-mute forbidden → `SelfMuteForbidden`
/// 3. issuer below admin rank and not on the policy allow-list →
///    `InsufficientPermission` (mute and unmute both require admin rights)
/// 4. target rank ≥ issuer rank → `TargetRankTooHigh` (skipped for a
///    policy-sanctioned self-mute, which would always be rank-equal)
/// 5. allow — mute clamps into policy bounds, unmute is always 0 and
///    bypasses the clamp.
///
/// Each target of a request is decided independently.
pub fn decide(
    issuer_id: &str,
    issuer_role: MemberRole,
    resolution: &Resolution,
    action: MuteAction,
    requested_duration: Option<u64>,
    policy: &Policy,
) -> Decision {
    let target = match resolution {
        Resolution::Found(target) => target,
        Resolution::Unresolved => {
            return Decision::Deny {
                reason: ReasonCode::TargetNotFound,
            };
        }
    };

    let is_self = target.user_id == issuer_id;
    if is_self && !policy.allow_self_mute {
        return Decision::Deny {
            reason: ReasonCode::SelfMuteForbidden,
        };
    }

    let listed = policy.is_listed_admin(issuer_id);
    if !listed && issuer_role < MemberRole::Admin {
        return Decision::Deny {
            reason: ReasonCode::InsufficientPermission,
        };
    }

    // Allow-listed members act with admin rank, otherwise the rank rule
    // below would deny every target they name.
    let effective_rank = issuer_role.max(if listed {
        MemberRole::Admin
    } else {
        MemberRole::Member
    });

    if !is_self && target.role >= effective_rank {
        return Decision::Deny {
            reason: ReasonCode::TargetRankTooHigh,
        };
    }

    let duration = match action {
        MuteAction::Mute => policy.clamp(requested_duration),
        MuteAction::Unmute => 0,
    };
    Decision::Allow { duration }
}
