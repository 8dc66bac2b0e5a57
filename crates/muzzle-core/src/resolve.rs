//! Target resolution against the group roster.

use tracing::debug;

use crate::gateway::{GroupGateway, RosterEntry};
use crate::model::{MemberRole, Resolution, ResolvedTarget, TargetRef};
use crate::policy::Policy;

/// Resolves every target ref of a request, independently.
///
/// One ref's failure never blocks the others: a failed role lookup or an
/// unmatched name yields [`Resolution::Unresolved`] for that ref only. The
/// roster is fetched lazily, at most once, and only when a name ref is
/// present.
pub async fn resolve_targets(
    gateway: &dyn GroupGateway,
    policy: &Policy,
    group_id: &str,
    targets: &[TargetRef],
) -> Vec<Resolution> {
    let mut roster: Option<Vec<RosterEntry>> = None;
    let mut results = Vec::with_capacity(targets.len());

    for target in targets {
        let resolution = match target {
            TargetRef::UserId(user_id) => {
                resolve_user_id(gateway, policy, group_id, user_id).await
            }
            TargetRef::Name(name) => {
                if roster.is_none() {
                    roster = match gateway.group_roster(group_id).await {
                        Ok(entries) => Some(entries),
                        Err(e) => {
                            debug!(group = group_id, error = %e, "Roster lookup failed");
                            Some(Vec::new())
                        }
                    };
                }
                match match_name(roster.as_deref().unwrap_or_default(), name) {
                    Some(entry) => {
                        resolve_user_id(gateway, policy, group_id, &entry.user_id).await
                    }
                    None => Resolution::Unresolved,
                }
            }
        };
        results.push(resolution);
    }

    results
}

/// Resolves an explicit user id via a single role lookup.
///
/// The bot's own id is excluded here unless the policy allows self-mute;
/// this catches LLM directives that would have the bot silence itself.
async fn resolve_user_id(
    gateway: &dyn GroupGateway,
    policy: &Policy,
    group_id: &str,
    user_id: &str,
) -> Resolution {
    if user_id == gateway.bot_id() && !policy.allow_self_mute {
        return Resolution::Unresolved;
    }
    match gateway.member_role(group_id, user_id).await {
        Ok(role) => Resolution::Found(ResolvedTarget {
            user_id: user_id.to_string(),
            role,
        }),
        Err(e) => {
            debug!(group = group_id, user = user_id, error = %e, "Role lookup failed");
            Resolution::Unresolved
        }
    }
}

/// Matches a display name against the roster.
///
/// Exact matches on nickname or card are scanned first; only when none
/// exists does the first substring match win. Both passes run in roster
/// order, so duplicate display names resolve deterministically.
fn match_name<'a>(roster: &'a [RosterEntry], name: &str) -> Option<&'a RosterEntry> {
    roster
        .iter()
        .find(|e| e.nickname == name || e.card.as_deref() == Some(name))
        .or_else(|| {
            roster.iter().find(|e| {
                e.nickname.contains(name)
                    || e.card.as_deref().is_some_and(|c| c.contains(name))
            })
        })
}
