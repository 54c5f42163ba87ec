//! Lexer and scope-sensitive token classifier for TQ documentation
//! code samples.
//!
//! TQ samples are highlighted in two phases: a character-level lexer
//! turns source text into a flat token stream, then an analyzer walks
//! that stream with an explicit scope stack and reclassifies each
//! token by the grammatical construct it participates in. The result
//! distinguishes declarations from expressions, function calls from
//! plain identifiers, and fixed-width integer types from words, and
//! turns specially marked comments into simulated compiler
//! diagnostics.
//!
//! Classification is total: it never fails and never panics.
//! Malformed input degrades to tokens flagged with `error` so the
//! surrounding documentation page still renders.
//!
//! # Quick start
//!
//! ```
//! use tq_highlight::{TokenKind, tokenize};
//!
//! let tokens = tokenize("let x = 5");
//! let kinds: Vec<_> = tokens
//!     .iter()
//!     .filter(|t| t.kind != TokenKind::Whitespace)
//!     .map(|t| t.kind)
//!     .collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::Keyword,
//!         TokenKind::Identifier,
//!         TokenKind::AssignOperator,
//!         TokenKind::Number,
//!     ]
//! );
//! ```
//!
//! Bare-expression snippets opt into expression grammar with an
//! in-band scope hint on the first line:
//!
//! ```
//! use tq_highlight::{TokenKind, tokenize};
//!
//! let tokens = tokenize("#/// func scope ///\nprint(\"hi\")");
//! let call = tokens.iter().find(|t| t.value == "print").unwrap();
//! assert_eq!(call.kind, TokenKind::Function);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod analyzer;
pub mod annotation;
pub mod display;
pub mod lexer;
pub mod token;

pub use analyzer::{AnalyzeError, MAX_NESTING, Scope, analyze};
pub use display::{DisplayLine, copy_text, display_lines, presentation_class};
pub use lexer::lex;
pub use token::{Token, TokenKind};

/// Lex and classify TQ source text in one step.
///
/// Callers normally trim trailing whitespace from a fenced code block
/// before passing it in; the function itself is total over any input.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = lex(input);
    analyze(&mut tokens);
    tokens
}
