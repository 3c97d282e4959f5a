//! Slash commands: `/token` typed into the buffer expands to a literal
//! snippet.

use std::ops::Range;

/// A slash command: the typed token and its literal expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlashCommand {
    pub token: &'static str,
    pub expansion: &'static str,
}

/// Commands the editor expands.
pub const SLASH_COMMANDS: [SlashCommand; 3] = [
    SlashCommand { token: "math", expansion: "$E = mc^2$" },
    SlashCommand { token: "equation", expansion: "$$\n1 + 1 = 2\n$$" },
    SlashCommand { token: "latex", expansion: "$\\alpha + \\beta$" },
];

pub fn lookup(token: &str) -> Option<&'static SlashCommand> {
    SLASH_COMMANDS.iter().find(|command| command.token == token)
}

/// Find a `/token` that ends exactly at `caret` (a char offset into
/// `text`). Returns the char range of the whole token including the slash,
/// plus the token itself. `None` when the word before the caret does not
/// start with `/` or is just a bare slash.
pub fn token_before_caret(text: &str, caret: usize) -> Option<(Range<usize>, String)> {
    let chars: Vec<char> = text.chars().take(caret).collect();
    let mut start = chars.len();
    while start > 0 && !chars[start - 1].is_whitespace() {
        start -= 1;
    }
    if start >= chars.len() || chars[start] != '/' {
        return None;
    }
    let token: String = chars[start + 1..].iter().collect();
    if token.is_empty() {
        return None;
    }
    Some((start..chars.len(), token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_token_at_end_of_buffer() {
        let (range, token) = token_before_caret("see /math", 9).unwrap();
        assert_eq!(range, 4..9);
        assert_eq!(token, "math");
    }

    #[test]
    fn test_token_alone_in_buffer() {
        let (range, token) = token_before_caret("/latex", 6).unwrap();
        assert_eq!(range, 0..6);
        assert_eq!(token, "latex");
    }

    #[rstest]
    #[case("math", 4)] // word without slash
    #[case("see /", 5)] // bare slash
    #[case("a /math b", 9)] // caret after trailing word, not the token
    #[case("", 0)] // empty buffer
    fn test_no_token_found(#[case] text: &str, #[case] caret: usize) {
        assert_eq!(token_before_caret(text, caret), None);
    }

    #[test]
    fn test_only_text_before_caret_is_considered() {
        // Caret sits in the middle; the token to its left is what counts.
        let (range, token) = token_before_caret("/math trailing", 5).unwrap();
        assert_eq!(range, 0..5);
        assert_eq!(token, "math");
    }

    #[test]
    fn test_lookup_known_and_unknown_tokens() {
        assert_eq!(lookup("math").map(|c| c.expansion), Some("$E = mc^2$"));
        assert!(lookup("nope").is_none());
    }
}
