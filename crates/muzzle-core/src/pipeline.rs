//! The end-to-end request pipeline.
//!
//! One flow per incoming event: parse → resolve → decide → execute →
//! report. Each request moves through those stages exactly once; a failed
//! target carries its terminal reason into the report, nothing is retried.

use tracing::{debug, info};

use crate::authorize::decide;
use crate::command::{CommandEvent, parse_command};
use crate::directive::parse_directives;
use crate::execute::{DecidedTarget, execute, render_report};
use crate::gateway::GroupGateway;
use crate::model::{MemberRole, MuteRequest, Resolution};
use crate::policy::Policy;
use crate::resolve::resolve_targets;

/// Entry point for the `/mute` and `/unmute` command surface.
///
/// Returns the rendered report, or `None` when the message is not one of
/// the two commands. The report is also delivered through
/// [`GroupGateway::send_report`]; a delivery failure is logged and does not
/// change the returned report.
pub async fn handle_command(
    gateway: &dyn GroupGateway,
    policy: &Policy,
    event: &CommandEvent<'_>,
) -> Option<String> {
    let request = parse_command(event)?;

    // Whole-command permission gate: a non-admin issuer is denied once,
    // before any target is resolved or processed.
    let issuer_role = issuer_role(gateway, &request).await;
    if issuer_role < MemberRole::Admin && !policy.is_listed_admin(&request.issuer_id) {
        info!(
            issuer = %request.issuer_id,
            group = %request.group_id,
            "Command denied: insufficient permission"
        );
        let report = "❌ insufficient permission".to_string();
        deliver(gateway, &request.group_id, &report).await;
        return Some(report);
    }

    let report = process_request(gateway, policy, &request, issuer_role).await;
    deliver(gateway, &request.group_id, &report).await;
    Some(report)
}

/// Passive hook for bot-authored messages carrying embedded directives.
///
/// Only text whose author is the bot itself is scanned; returns `None` for
/// every other message or when no directive is present.
pub async fn handle_outgoing_text(
    gateway: &dyn GroupGateway,
    policy: &Policy,
    sender_id: &str,
    group_id: &str,
    text: &str,
) -> Option<String> {
    let request = parse_directives(sender_id, gateway.bot_id(), group_id, text)?;
    let issuer_role = issuer_role(gateway, &request).await;
    let report = process_request(gateway, policy, &request, issuer_role).await;
    deliver(gateway, group_id, &report).await;
    Some(report)
}

/// Runs resolve → decide → execute for an already-parsed request.
pub async fn process_request(
    gateway: &dyn GroupGateway,
    policy: &Policy,
    request: &MuteRequest,
    issuer_role: MemberRole,
) -> String {
    debug!(
        issuer = %request.issuer_id,
        group = %request.group_id,
        action = ?request.action,
        targets = request.targets.len(),
        "Processing mute request"
    );

    let resolutions = resolve_targets(gateway, policy, &request.group_id, &request.targets).await;

    let decided = request
        .targets
        .iter()
        .cloned()
        .zip(resolutions)
        .map(|(target, resolution)| {
            let decision = decide(
                &request.issuer_id,
                issuer_role,
                &resolution,
                request.action,
                request.requested_duration,
                policy,
            );
            let user_id = match resolution {
                Resolution::Found(resolved) => Some(resolved.user_id),
                Resolution::Unresolved => None,
            };
            DecidedTarget {
                target,
                user_id,
                decision,
            }
        })
        .collect();

    let outcomes = execute(gateway, &request.group_id, decided).await;
    render_report(request.action, &outcomes)
}

/// The issuer's own role; a failed lookup never grants rank.
async fn issuer_role(gateway: &dyn GroupGateway, request: &MuteRequest) -> MemberRole {
    gateway
        .member_role(&request.group_id, &request.issuer_id)
        .await
        .unwrap_or_default()
}

async fn deliver(gateway: &dyn GroupGateway, group_id: &str, report: &str) {
    if let Err(e) = gateway.send_report(group_id, report).await {
        debug!(group = group_id, error = %e, "Report delivery failed");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::gateway::{GatewayError, GatewayResult, RosterEntry};
    use crate::segment::MessagePart;

    /// Scripted gateway: fixed roles and roster, records mute calls.
    struct MockGateway {
        bot_id: String,
        roles: HashMap<String, MemberRole>,
        roster: Vec<RosterEntry>,
        failing_lookups: Vec<String>,
        failing_mutes: Vec<String>,
        mute_calls: Mutex<Vec<(String, u64)>>,
        reports: Mutex<Vec<String>>,
    }

    impl MockGateway {
        fn new() -> Self {
            Self {
                bot_id: "100".into(),
                roles: HashMap::new(),
                roster: Vec::new(),
                failing_lookups: Vec::new(),
                failing_mutes: Vec::new(),
                mute_calls: Mutex::new(Vec::new()),
                reports: Mutex::new(Vec::new()),
            }
        }

        fn with_role(mut self, user_id: &str, role: MemberRole) -> Self {
            self.roles.insert(user_id.into(), role);
            self
        }

        fn with_roster_entry(mut self, user_id: &str, nickname: &str) -> Self {
            self.roster.push(RosterEntry {
                user_id: user_id.into(),
                nickname: nickname.into(),
                card: None,
            });
            self
        }

        fn mute_calls(&self) -> Vec<(String, u64)> {
            self.mute_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GroupGateway for MockGateway {
        async fn member_role(&self, _group_id: &str, user_id: &str) -> GatewayResult<MemberRole> {
            if self.failing_lookups.iter().any(|u| u == user_id) {
                return Err(GatewayError::Timeout);
            }
            self.roles
                .get(user_id)
                .copied()
                .ok_or_else(|| GatewayError::Other(format!("no such member: {user_id}")))
        }

        async fn group_roster(&self, _group_id: &str) -> GatewayResult<Vec<RosterEntry>> {
            Ok(self.roster.clone())
        }

        async fn set_mute_duration(
            &self,
            _group_id: &str,
            user_id: &str,
            duration_secs: u64,
        ) -> GatewayResult<()> {
            if self.failing_mutes.iter().any(|u| u == user_id) {
                return Err(GatewayError::Api {
                    retcode: 100,
                    message: "operation failed".into(),
                });
            }
            self.mute_calls
                .lock()
                .unwrap()
                .push((user_id.to_string(), duration_secs));
            Ok(())
        }

        fn bot_id(&self) -> &str {
            &self.bot_id
        }

        async fn send_report(&self, _group_id: &str, text: &str) -> GatewayResult<()> {
            self.reports.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn mute_parts(duration: &str, targets: &[&str]) -> Vec<MessagePart> {
        let mut parts = vec![MessagePart::Text(format!("/mute {duration} "))];
        parts.extend(
            targets
                .iter()
                .map(|t| MessagePart::At((*t).to_string())),
        );
        parts
    }

    #[tokio::test]
    async fn test_admin_mutes_member_with_default_duration() {
        let gateway = MockGateway::new()
            .with_role("900", MemberRole::Admin)
            .with_role("10001", MemberRole::Member);
        let parts = vec![
            MessagePart::Text("/mute ".into()),
            MessagePart::At("10001".into()),
        ];
        let event = CommandEvent {
            sender_id: "900",
            group_id: "g1",
            parts: &parts,
        };

        let report = handle_command(&gateway, &Policy::default(), &event)
            .await
            .unwrap();
        assert_eq!(report, "✅ 10001: muted for 60s");
        assert_eq!(gateway.mute_calls(), vec![("10001".to_string(), 60)]);
        assert_eq!(gateway.reports.lock().unwrap().as_slice(), [report]);
    }

    #[tokio::test]
    async fn test_requested_duration_clamped_to_max() {
        let gateway = MockGateway::new()
            .with_role("900", MemberRole::Admin)
            .with_role("10001", MemberRole::Member);
        let parts = mute_parts("9999", &["10001"]);
        let event = CommandEvent {
            sender_id: "900",
            group_id: "g1",
            parts: &parts,
        };

        let report = handle_command(&gateway, &Policy::default(), &event)
            .await
            .unwrap();
        assert_eq!(report, "✅ 10001: muted for 600s");
        assert_eq!(gateway.mute_calls(), vec![("10001".to_string(), 600)]);
    }

    #[tokio::test]
    async fn test_member_issuer_denied_before_targets() {
        let gateway = MockGateway::new()
            .with_role("900", MemberRole::Member)
            .with_role("10001", MemberRole::Member);
        let parts = mute_parts("60", &["10001"]);
        let event = CommandEvent {
            sender_id: "900",
            group_id: "g1",
            parts: &parts,
        };

        let report = handle_command(&gateway, &Policy::default(), &event)
            .await
            .unwrap();
        assert_eq!(report, "❌ insufficient permission");
        assert!(gateway.mute_calls().is_empty());
    }

    #[tokio::test]
    async fn test_batch_independence_with_failing_middle_lookup() {
        let mut gateway = MockGateway::new()
            .with_role("900", MemberRole::Admin)
            .with_role("10001", MemberRole::Member)
            .with_role("10003", MemberRole::Member);
        gateway.failing_lookups.push("10002".into());
        let parts = mute_parts("120", &["10001", "10002", "10003"]);
        let event = CommandEvent {
            sender_id: "900",
            group_id: "g1",
            parts: &parts,
        };

        let report = handle_command(&gateway, &Policy::default(), &event)
            .await
            .unwrap();
        let lines: Vec<_> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "✅ 10001: muted for 120s");
        assert_eq!(lines[1], "❌ 10002: target not found");
        assert_eq!(lines[2], "✅ 10003: muted for 120s");
    }

    #[tokio::test]
    async fn test_execution_failure_reported_per_target() {
        let mut gateway = MockGateway::new()
            .with_role("900", MemberRole::Admin)
            .with_role("10001", MemberRole::Member)
            .with_role("10002", MemberRole::Member);
        gateway.failing_mutes.push("10001".into());
        let parts = mute_parts("60", &["10001", "10002"]);
        let event = CommandEvent {
            sender_id: "900",
            group_id: "g1",
            parts: &parts,
        };

        let report = handle_command(&gateway, &Policy::default(), &event)
            .await
            .unwrap();
        let lines: Vec<_> = report.lines().collect();
        assert!(lines[0].starts_with("❌ 10001: execution failed"));
        assert_eq!(lines[1], "✅ 10002: muted for 60s");
        assert_eq!(gateway.mute_calls(), vec![("10002".to_string(), 60)]);
    }

    #[tokio::test]
    async fn test_unmute_applies_zero() {
        let gateway = MockGateway::new()
            .with_role("900", MemberRole::Admin)
            .with_role("10001", MemberRole::Member);
        let parts = vec![
            MessagePart::Text("/unmute ".into()),
            MessagePart::At("10001".into()),
        ];
        let event = CommandEvent {
            sender_id: "900",
            group_id: "g1",
            parts: &parts,
        };

        let report = handle_command(&gateway, &Policy::default(), &event)
            .await
            .unwrap();
        assert_eq!(report, "✅ 10001: unmuted");
        assert_eq!(gateway.mute_calls(), vec![("10001".to_string(), 0)]);
    }

    #[tokio::test]
    async fn test_admin_cannot_mute_admin() {
        let gateway = MockGateway::new()
            .with_role("900", MemberRole::Admin)
            .with_role("10001", MemberRole::Admin);
        let parts = mute_parts("60", &["10001"]);
        let event = CommandEvent {
            sender_id: "900",
            group_id: "g1",
            parts: &parts,
        };

        let report = handle_command(&gateway, &Policy::default(), &event)
            .await
            .unwrap();
        assert_eq!(report, "❌ 10001: target rank too high");
        assert!(gateway.mute_calls().is_empty());
    }

    #[tokio::test]
    async fn test_non_command_message_is_skipped() {
        let gateway = MockGateway::new();
        let parts = vec![MessagePart::Text("good morning".into())];
        let event = CommandEvent {
            sender_id: "900",
            group_id: "g1",
            parts: &parts,
        };
        assert!(
            handle_command(&gateway, &Policy::default(), &event)
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_directive_from_bot_resolves_name() {
        let gateway = MockGateway::new()
            .with_role("100", MemberRole::Admin)
            .with_role("10001", MemberRole::Member)
            .with_roster_entry("10001", "Alice");

        let report = handle_outgoing_text(
            &gateway,
            &Policy::default(),
            "100",
            "g1",
            "好的，这就处理。【mute @Alice 120】",
        )
        .await
        .unwrap();
        assert_eq!(report, "✅ Alice: muted for 120s");
        assert_eq!(gateway.mute_calls(), vec![("10001".to_string(), 120)]);
    }

    #[tokio::test]
    async fn test_directive_from_user_is_ignored() {
        let gateway = MockGateway::new()
            .with_role("999", MemberRole::Admin)
            .with_role("10001", MemberRole::Member)
            .with_roster_entry("10001", "Alice");

        let out = handle_outgoing_text(
            &gateway,
            &Policy::default(),
            "999",
            "g1",
            "【mute @Alice 120】",
        )
        .await;
        assert!(out.is_none());
        assert!(gateway.mute_calls().is_empty());
    }

    #[tokio::test]
    async fn test_directive_unknown_name_reported_not_found() {
        let gateway = MockGateway::new()
            .with_role("100", MemberRole::Admin)
            .with_roster_entry("10001", "Alice");

        let report = handle_outgoing_text(
            &gateway,
            &Policy::default(),
            "100",
            "g1",
            "【mute @Nobody 120】",
        )
        .await
        .unwrap();
        assert_eq!(report, "❌ Nobody: target not found");
    }

    #[tokio::test]
    async fn test_bot_never_mutes_itself_via_directive() {
        // The LLM names the bot's own roster entry; resolution excludes it.
        let gateway = MockGateway::new()
            .with_role("100", MemberRole::Admin)
            .with_roster_entry("100", "Muzzle");

        let report = handle_outgoing_text(
            &gateway,
            &Policy::default(),
            "100",
            "g1",
            "【mute @Muzzle 60】",
        )
        .await
        .unwrap();
        assert_eq!(report, "❌ Muzzle: target not found");
        assert!(gateway.mute_calls().is_empty());
    }
}
