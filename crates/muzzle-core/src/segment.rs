//! Message-part tokenization for command parsing.

/// One part of an incoming message, as delivered by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagePart {
    /// Plain text content.
    Text(String),
    /// A structured at-mention carrying the mentioned user's identifier.
    At(String),
}

/// One token produced by splitting message parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A whitespace-delimited word from a text part.
    Word(String),
    /// An at-mention, kept structured so mentions never mix with words.
    Mention(String),
}

/// Simple shell-like argument splitting for plain text.
///
/// Handles space separation, quoted strings (single and double quotes), and
/// escape sequences within double quotes.
pub fn shell_split(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_single_quote = false;
    let mut in_double_quote = false;
    let mut escape_next = false;

    for ch in input.chars() {
        if escape_next {
            current.push(ch);
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_double_quote => {
                escape_next = true;
            }
            '\'' if !in_double_quote => {
                in_single_quote = !in_single_quote;
            }
            '"' if !in_single_quote => {
                in_double_quote = !in_double_quote;
            }
            ' ' | '\t' if !in_single_quote && !in_double_quote => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            _ => {
                current.push(ch);
            }
        }
    }

    if !current.is_empty() {
        args.push(current);
    }

    args
}

/// Splits message parts into command tokens.
///
/// `Text` parts are split with [`shell_split`]; a part boundary always acts
/// as a word break, so text in adjacent parts is never concatenated. `At`
/// parts each become a single [`Token::Mention`].
pub fn tokenize(parts: &[MessagePart]) -> Vec<Token> {
    let mut tokens = Vec::new();
    for part in parts {
        match part {
            MessagePart::Text(text) => {
                tokens.extend(shell_split(text).into_iter().map(Token::Word));
            }
            MessagePart::At(user_id) => {
                tokens.push(Token::Mention(user_id.clone()));
            }
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_split_simple() {
        let args = shell_split("/mute 120 now");
        assert_eq!(args, vec!["/mute", "120", "now"]);
    }

    #[test]
    fn test_shell_split_quoted() {
        let args = shell_split(r#"/mute "two words" 60"#);
        assert_eq!(args, vec!["/mute", "two words", "60"]);
    }

    #[test]
    fn test_shell_split_empty() {
        assert!(shell_split("").is_empty());
        assert!(shell_split("   \t  ").is_empty());
    }

    #[test]
    fn test_tokenize_mixed() {
        let parts = vec![
            MessagePart::Text("/mute 120 ".into()),
            MessagePart::At("10001".into()),
            MessagePart::Text(" ".into()),
            MessagePart::At("10002".into()),
        ];
        let tokens = tokenize(&parts);
        assert_eq!(
            tokens,
            vec![
                Token::Word("/mute".into()),
                Token::Word("120".into()),
                Token::Mention("10001".into()),
                Token::Mention("10002".into()),
            ]
        );
    }

    #[test]
    fn test_tokenize_part_boundary_breaks_words() {
        let parts = vec![
            MessagePart::Text("/mute".into()),
            MessagePart::Text("120".into()),
        ];
        assert_eq!(
            tokenize(&parts),
            vec![Token::Word("/mute".into()), Token::Word("120".into())]
        );
    }
}
