//! Presentation helpers for classified token streams.
//!
//! The documentation renderer maps each semantic kind to a fixed
//! presentation class, groups tokens into display lines, and builds
//! the copy-to-clipboard text. Tokens flagged as errors get an error
//! style regardless of kind, and `MetaError` tokens are shown as a
//! danger callout instead of code; both of those decisions belong to
//! the renderer and stay out of this crate.

use crate::token::{Token, TokenKind};

/// Fixed mapping from semantic kind to presentation class.
#[must_use]
pub const fn presentation_class(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Comment => "comment",
        TokenKind::Keyword => "keyword",
        TokenKind::Function => "function",
        TokenKind::Struct => "plain struct",
        TokenKind::Attribute => "attribute",
        TokenKind::Type => "type",
        TokenKind::Punctuation => "punctuation",
        TokenKind::Number => "number",
        TokenKind::String => "string",
        TokenKind::Boolean => "boolean",
        TokenKind::UnaryOperator => "operator unaryOperator",
        TokenKind::BinaryOperator => "operator binaryOperator",
        TokenKind::AssignOperator => "operator assignOperator",
        TokenKind::InlineHint => "inline-hint",
        TokenKind::MetaError => "meta-error",
        TokenKind::MetaWarning => "meta-warning",
        TokenKind::Identifier => "plain identifier",
        TokenKind::Word => "plain word",
        TokenKind::Whitespace => "plain whitespace",
        TokenKind::Newline => "plain newline",
        TokenKind::Unknown => "plain unknown",
    }
}

/// One visual line of a rendered sample.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayLine {
    pub tokens: Vec<Token>,
}

/// Group a classified stream into display lines.
///
/// Whitespace tokens are folded into the `wsp` field of the token
/// that follows them; newline tokens end the current line, with extra
/// line feeds in a run producing empty lines.
#[must_use]
pub fn display_lines(tokens: &[Token]) -> Vec<DisplayLine> {
    let mut lines = Vec::new();
    let mut line = DisplayLine::default();
    let mut pending_wsp: Option<String> = None;

    for token in tokens {
        match token.kind {
            TokenKind::Newline => {
                pending_wsp = None;
                lines.push(std::mem::take(&mut line));
                for _ in 1..token.value.chars().count() {
                    lines.push(DisplayLine::default());
                }
            }
            TokenKind::Whitespace => {
                pending_wsp.get_or_insert_default().push_str(&token.value);
            }
            _ => {
                let mut shown = token.clone();
                shown.wsp = pending_wsp.take();
                line.tokens.push(shown);
            }
        }
    }

    if !line.tokens.is_empty() {
        lines.push(line);
    }
    lines
}

/// Plain text for copy-to-clipboard: inline hints and extracted
/// diagnostics are not part of the sample's code.
#[must_use]
pub fn copy_text(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        if !matches!(token.kind, TokenKind::InlineHint | TokenKind::MetaError) {
            out.push_str(&token.value);
        }
    }
    out
}
