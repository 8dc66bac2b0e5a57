//! Per-target execution and report assembly.

use futures::future::join_all;
use tracing::warn;

use crate::gateway::GroupGateway;
use crate::model::{ActionOutcome, Decision, MuteAction, ReasonCode, TargetRef};

/// One target after authorization, ready for execution.
#[derive(Debug, Clone)]
pub struct DecidedTarget {
    /// The originating ref, kept for report labelling and ordering.
    pub target: TargetRef,
    /// The resolved user id; present whenever resolution found a member.
    pub user_id: Option<String>,
    /// The authorization decision.
    pub decision: Decision,
}

/// Executes the decided actions and folds every target into one outcome list.
///
/// Allowed targets fan out concurrently; a failed gateway call turns only
/// that target into `ExecutionFailed`, never aborting the rest. Outcomes
/// come back in the original target order regardless of completion order.
pub async fn execute(
    gateway: &dyn GroupGateway,
    group_id: &str,
    decided: Vec<DecidedTarget>,
) -> Vec<ActionOutcome> {
    let calls = decided.into_iter().map(|item| async move {
        let result = match (item.decision, item.user_id) {
            (Decision::Allow { duration }, Some(user_id)) => {
                match gateway.set_mute_duration(group_id, &user_id, duration).await {
                    Ok(()) => Ok(duration),
                    Err(e) => {
                        warn!(
                            group = group_id,
                            user = %user_id,
                            error = %e,
                            "Mute call failed"
                        );
                        Err(ReasonCode::ExecutionFailed(e.to_string()))
                    }
                }
            }
            // decide() never allows an unresolved target; keep the arm
            // total anyway.
            (Decision::Allow { .. }, None) => Err(ReasonCode::TargetNotFound),
            (Decision::Deny { reason }, _) => Err(reason),
        };
        ActionOutcome {
            target: item.target,
            result,
        }
    });

    join_all(calls).await
}

/// Renders the aggregated outcomes into a multi-line report.
///
/// One line per target, in original order.
pub fn render_report(action: MuteAction, outcomes: &[ActionOutcome]) -> String {
    outcomes
        .iter()
        .map(|outcome| {
            let label = outcome.target.label();
            match (&outcome.result, action) {
                (Ok(duration), MuteAction::Mute) => {
                    format!("✅ {label}: muted for {duration}s")
                }
                (Ok(_), MuteAction::Unmute) => format!("✅ {label}: unmuted"),
                (Err(reason), _) => format!("❌ {label}: {reason}"),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
