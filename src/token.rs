/// Classification of a single token.
///
/// The lexer assigns the coarse lexical kinds (`Word`, `Number`,
/// `Whitespace`, ...); the analyzer later overwrites `Word` and some
/// punctuation with the finer semantic kinds (`Keyword`, `Type`,
/// `Function`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Character that cannot start any token.
    Unknown,
    /// Identifier-shaped word, not yet classified.
    Word,
    /// Language keyword (`func`, `let`, `return`, ...).
    Keyword,
    /// Type name (`i32`, `bool`, `string`, ...).
    Type,
    /// Plain identifier (variable, field, or module name).
    Identifier,
    /// `@`-attribute marker and its dotted path.
    Attribute,
    /// Function name in a declaration or call.
    Function,
    /// Struct name.
    Struct,
    /// Numeric literal (decimal, `0x...`, or `0b...`).
    Number,
    /// String or character literal.
    String,
    /// `true` or `false`.
    Boolean,
    /// Line (`# ...`) or block (`### ... ###`) comment.
    Comment,
    /// Run of spaces, tabs, or carriage returns.
    Whitespace,
    /// Run of line feeds.
    Newline,
    /// Assignment operator (`=`, `+=`, ...).
    AssignOperator,
    /// Binary operator (`+`, `==`, `as`, `..`, ...).
    BinaryOperator,
    /// Unary operator (`++`, `!`, `&`).
    UnaryOperator,
    /// Single punctuation character from `(){}[];:.,@`.
    Punctuation,
    /// `...` documentation ellipsis; excluded from copy text.
    InlineHint,
    /// Simulated compiler error extracted from a marker comment,
    /// rendered as a callout instead of code.
    MetaError,
    /// Reserved for simulated compiler warnings.
    MetaWarning,
}

/// A classified slice of the source text.
///
/// `start`/`end` are half-open character offsets; adjacent tokens are
/// contiguous across the whole stream. `value` is the exact source
/// slice, except for `MetaError` tokens whose value is the extracted
/// diagnostic text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    pub value: String,
    /// Leading whitespace attached by the display layer for rendering
    /// fidelity; never set by the lexer or analyzer.
    pub wsp: Option<String>,
    pub error: bool,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, start: usize, end: usize, value: String) -> Self {
        Self {
            kind,
            start,
            end,
            value,
            wsp: None,
            error: false,
        }
    }
}
