#![allow(dead_code)]

use tq_highlight::{Token, TokenKind};

/// Assert the stream covers the input exactly: starts at 0, ends at
/// the character count, no gaps or overlaps between adjacent tokens.
pub fn assert_coverage(input: &str, tokens: &[Token]) {
    if input.is_empty() {
        assert!(tokens.is_empty(), "empty input produced tokens");
        return;
    }
    assert_eq!(tokens[0].start, 0, "first token does not start at 0");
    assert_eq!(
        tokens.last().unwrap().end,
        input.chars().count(),
        "last token does not reach end of input"
    );
    for pair in tokens.windows(2) {
        assert_eq!(
            pair[0].end, pair[1].start,
            "gap or overlap between {:?} and {:?}",
            pair[0], pair[1]
        );
    }
}

/// Tokens that carry meaning: everything except whitespace, newlines,
/// and comments.
pub fn non_trivia(tokens: &[Token]) -> Vec<&Token> {
    tokens
        .iter()
        .filter(|t| {
            !matches!(
                t.kind,
                TokenKind::Whitespace | TokenKind::Newline | TokenKind::Comment
            )
        })
        .collect()
}

/// Kind/value pairs of the non-trivia tokens, for compact assertions.
pub fn summary(tokens: &[Token]) -> Vec<(TokenKind, String)> {
    non_trivia(tokens)
        .into_iter()
        .map(|t| (t.kind, t.value.clone()))
        .collect()
}
