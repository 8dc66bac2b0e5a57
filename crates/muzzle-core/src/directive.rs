//! Embedded-directive scanning for LLM-authored replies.
//!
//! The LLM integration marks a mute instruction inline in the bot's own
//! reply text as `【mute @<name> [<seconds>]】`. Only messages authored by
//! the bot itself are scanned; the same pattern in an ordinary user message
//! is ignored, so users cannot inject fake directives.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{MuteAction, MuteRequest, TargetRef};

/// Literal keyword is case-sensitive; the name is lazy so trailing digits
/// are captured as the duration rather than swallowed into the name.
static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"【mute\s+@(.+?)(?:\s+(\d+))?\s*】").expect("directive pattern is valid")
});

/// One structured match of the directive pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveMatch {
    /// Raw target reference: a display name or a mention string.
    pub name: String,
    /// Duration in seconds, when digits were present.
    pub duration: Option<u64>,
}

/// Scans free text for directive occurrences.
///
/// Returns every match in text order. Text without the keyword, or with a
/// malformed bracket pair, simply yields no matches.
pub fn scan(text: &str) -> Vec<DirectiveMatch> {
    DIRECTIVE_RE
        .captures_iter(text)
        .map(|caps| DirectiveMatch {
            name: caps[1].to_string(),
            duration: caps.get(2).and_then(|m| m.as_str().parse().ok()),
        })
        .collect()
}

/// Extracts a [`MuteRequest`] from a bot-authored message.
///
/// Returns `None` when the message was not authored by the bot (the
/// self-origin guard) or contains no directive. All matches fold into one
/// request against the same group; the first stated duration wins.
pub fn parse_directives(
    sender_id: &str,
    bot_id: &str,
    group_id: &str,
    text: &str,
) -> Option<MuteRequest> {
    if sender_id != bot_id {
        return None;
    }

    let matches = scan(text);
    if matches.is_empty() {
        return None;
    }

    let requested_duration = matches.iter().find_map(|m| m.duration);
    Some(MuteRequest {
        issuer_id: sender_id.to_string(),
        group_id: group_id.to_string(),
        action: MuteAction::Mute,
        targets: matches.into_iter().map(|m| TargetRef::Name(m.name)).collect(),
        requested_duration,
    })
}
