//! Simulated-diagnostic extraction.
//!
//! Documentation authors can embed a compiler error inside a sample by
//! writing a block comment that starts with a fixed marker:
//!
//! ```text
//! ### /!\ Compilation Error!
//! cannot assign to immutable binding `x`
//! ###
//! ```
//!
//! The analyzer reclassifies such comments to `MetaError` tokens whose
//! value is the bare diagnostic text, so the renderer can show them as
//! a danger callout instead of code.

/// Marker that opens an error-annotation block comment.
pub const ERROR_MARKER: &str = "### /!\\ Compilation Error!";

/// Whether a comment token's text is an error annotation.
#[must_use]
pub fn is_error_annotation(comment: &str) -> bool {
    comment.starts_with(ERROR_MARKER)
}

/// Strip the marker header and trailing `###`, trim each interior
/// line, and rejoin the diagnostic text.
#[must_use]
pub fn extract(comment: &str) -> String {
    let body = comment.strip_prefix(ERROR_MARKER).unwrap_or(comment);
    let body = body.trim_end();
    let body = body.strip_suffix("###").unwrap_or(body);
    let lines: Vec<&str> = body.lines().map(str::trim).collect();
    lines.join("\n").trim().to_string()
}
