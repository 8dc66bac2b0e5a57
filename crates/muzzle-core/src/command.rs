//! Slash-command parsing for `/mute` and `/unmute`.

use crate::model::{MuteAction, MuteRequest, TargetRef};
use crate::segment::{MessagePart, Token, tokenize};

/// Context of the incoming command message.
#[derive(Debug, Clone)]
pub struct CommandEvent<'a> {
    /// User who sent the message.
    pub sender_id: &'a str,
    /// Group the message was sent in.
    pub group_id: &'a str,
    /// The message content as adapter-delivered parts.
    pub parts: &'a [MessagePart],
}

/// Parses a `/mute` or `/unmute` invocation into a [`MuteRequest`].
///
/// Returns `None` when the message is not one of the two commands; that is
/// an ordinary skip, not an error. Grammar:
///
/// - token 0 must be `/mute` or `/unmute` (case-insensitive);
/// - every mention token becomes a target, in message order;
/// - for `/mute`, the first word that parses as an integer is the duration
///   in seconds; a non-numeric word is ignored (policy default applies);
/// - `/unmute` ignores duration words entirely — the applied duration is
///   always 0.
pub fn parse_command(event: &CommandEvent<'_>) -> Option<MuteRequest> {
    let tokens = tokenize(event.parts);
    let first = tokens.first()?;

    let action = match first {
        Token::Word(w) if w.eq_ignore_ascii_case("/mute") => MuteAction::Mute,
        Token::Word(w) if w.eq_ignore_ascii_case("/unmute") => MuteAction::Unmute,
        _ => return None,
    };

    let mut targets = Vec::new();
    let mut requested_duration = None;
    for token in &tokens[1..] {
        match token {
            Token::Mention(user_id) => targets.push(TargetRef::UserId(user_id.clone())),
            Token::Word(word) => {
                if action == MuteAction::Mute && requested_duration.is_none() {
                    // Malformed numbers fall through to the policy default.
                    requested_duration = word.parse::<u64>().ok();
                }
            }
        }
    }

    Some(MuteRequest {
        issuer_id: event.sender_id.to_string(),
        group_id: event.group_id.to_string(),
        action,
        targets,
        requested_duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(parts: &[MessagePart]) -> CommandEvent<'_> {
        CommandEvent {
            sender_id: "900",
            group_id: "g1",
            parts,
        }
    }

    #[test]
    fn test_parse_mute_with_duration_and_mentions() {
        let parts = vec![
            MessagePart::Text("/mute 120 ".into()),
            MessagePart::At("10001".into()),
            MessagePart::At("10002".into()),
        ];
        let req = parse_command(&event(&parts)).unwrap();
        assert_eq!(req.action, MuteAction::Mute);
        assert_eq!(req.requested_duration, Some(120));
        assert_eq!(
            req.targets,
            vec![
                TargetRef::UserId("10001".into()),
                TargetRef::UserId("10002".into())
            ]
        );
        assert_eq!(req.issuer_id, "900");
        assert_eq!(req.group_id, "g1");
    }

    #[test]
    fn test_parse_mute_without_duration() {
        let parts = vec![
            MessagePart::Text("/mute ".into()),
            MessagePart::At("10001".into()),
        ];
        let req = parse_command(&event(&parts)).unwrap();
        assert_eq!(req.requested_duration, None);
    }

    #[test]
    fn test_parse_mute_malformed_duration_is_unset() {
        let parts = vec![
            MessagePart::Text("/mute soon ".into()),
            MessagePart::At("10001".into()),
        ];
        let req = parse_command(&event(&parts)).unwrap();
        assert_eq!(req.requested_duration, None);
    }

    #[test]
    fn test_parse_unmute_ignores_duration() {
        let parts = vec![
            MessagePart::Text("/unmute 300 ".into()),
            MessagePart::At("10001".into()),
        ];
        let req = parse_command(&event(&parts)).unwrap();
        assert_eq!(req.action, MuteAction::Unmute);
        assert_eq!(req.requested_duration, None);
    }

    #[test]
    fn test_parse_unrelated_message_is_none() {
        let parts = vec![MessagePart::Text("hello there".into())];
        assert!(parse_command(&event(&parts)).is_none());
    }

    #[test]
    fn test_parse_empty_message_is_none() {
        assert!(parse_command(&event(&[])).is_none());
    }

    #[test]
    fn test_parse_case_insensitive_keyword() {
        let parts = vec![
            MessagePart::Text("/Mute ".into()),
            MessagePart::At("10001".into()),
        ];
        assert!(parse_command(&event(&parts)).is_some());
    }
}
