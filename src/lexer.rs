use crate::token::{Token, TokenKind};

/// Tokenize TQ source text into a flat lexical token stream.
///
/// Total over any input: every character lands in exactly one token
/// (possibly a one-character `Unknown` token flagged as an error), so
/// the stream has no gaps and no overlaps. Offsets are character
/// indices, not byte indices.
#[must_use]
pub fn lex(input: &str) -> Vec<Token> {
    Lexer::new(input).run()
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn run(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while self.pos < self.chars.len() {
            tokens.push(self.next_token());
        }
        tokens
    }

    fn next_token(&mut self) -> Token {
        let start = self.pos;
        let ch = self.chars[self.pos];

        if matches!(ch, ' ' | '\t' | '\r') {
            return self.read_run(TokenKind::Whitespace, |c| matches!(c, ' ' | '\t' | '\r'));
        }
        if ch == '\n' {
            return self.read_run(TokenKind::Newline, |c| c == '\n');
        }
        if ch == '#' {
            return self.read_comment();
        }
        if ch.is_ascii_alphabetic() || ch == '_' {
            return self.read_word();
        }
        if ch.is_ascii_digit() {
            return self.read_number();
        }
        if ch == '"' || ch == '\'' {
            return self.read_quoted(ch);
        }
        if let Some(token) = self.read_operator() {
            return token;
        }
        if self.starts_with("...") {
            self.pos += 3;
            return Token::new(TokenKind::InlineHint, start, self.pos, "...".to_string());
        }
        if self.starts_with("..") {
            self.pos += 2;
            return Token::new(TokenKind::BinaryOperator, start, self.pos, "..".to_string());
        }
        if "(){}[];:.,@".contains(ch) {
            self.pos += 1;
            return Token::new(TokenKind::Punctuation, start, self.pos, ch.to_string());
        }

        self.pos += 1;
        let mut token = Token::new(TokenKind::Unknown, start, self.pos, ch.to_string());
        token.error = true;
        token
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn starts_with(&self, pat: &str) -> bool {
        pat.chars()
            .enumerate()
            .all(|(i, c)| self.chars.get(self.pos + i) == Some(&c))
    }

    fn slice_from(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }

    fn token_from(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, start, self.pos, self.slice_from(start))
    }

    fn read_run(&mut self, kind: TokenKind, matcher: impl Fn(char) -> bool) -> Token {
        let start = self.pos;
        while self.peek().is_some_and(&matcher) {
            self.pos += 1;
        }
        self.token_from(kind, start)
    }

    /// Line comment to end of line, or `### ... ###` block comment.
    /// An unterminated block comment scans to end of input without an
    /// error flag.
    fn read_comment(&mut self) -> Token {
        let start = self.pos;

        if self.starts_with("###") {
            self.pos += 3;
            while self.pos < self.chars.len() && !self.starts_with("###") {
                self.pos += 1;
            }
            if self.pos < self.chars.len() {
                self.pos += 3;
            }
            return self.token_from(TokenKind::Comment, start);
        }

        while self.peek().is_some_and(|c| c != '\n') {
            self.pos += 1;
        }
        self.token_from(TokenKind::Comment, start)
    }

    /// Identifiers, keywords, and the operator-keyword `as` are
    /// lexically identical; only `as` is resolved here, the rest wait
    /// for the analyzer.
    fn read_word(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        let value = self.slice_from(start);
        let kind = if value == "as" {
            TokenKind::BinaryOperator
        } else {
            TokenKind::Word
        };
        Token::new(kind, start, self.pos, value)
    }

    fn read_number(&mut self) -> Token {
        let start = self.pos;
        let first = self.chars[self.pos];
        self.pos += 1;

        let base = if first == '0' {
            match self.peek() {
                Some('x') => {
                    self.pos += 1;
                    16
                }
                Some('b') => {
                    self.pos += 1;
                    2
                }
                _ => 10,
            }
        } else {
            10
        };

        while self.peek().is_some_and(|c| is_digit_in_base(c, base)) {
            self.pos += 1;
        }
        self.token_from(TokenKind::Number, start)
    }

    /// String or char literal; a backslash escapes the next character.
    /// Without a closing quote the token spans to end of input and is
    /// flagged as an error.
    fn read_quoted(&mut self, quote: char) -> Token {
        let start = self.pos;
        self.pos += 1;

        let mut escaped = false;
        while let Some(c) = self.peek() {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                break;
            }
            self.pos += 1;
        }

        let closed = self.pos < self.chars.len();
        if closed {
            self.pos += 1;
        }

        let mut token = self.token_from(TokenKind::String, start);
        token.error = !closed;
        token
    }

    fn read_operator(&mut self) -> Option<Token> {
        let start = self.pos;
        let ch = self.chars[self.pos];

        let kind = match ch {
            '+' | '-' => {
                self.pos += 1;
                if self.peek() == Some(ch) {
                    self.pos += 1;
                    TokenKind::UnaryOperator
                } else if self.peek() == Some('=') {
                    self.pos += 1;
                    TokenKind::AssignOperator
                } else {
                    if matches!(self.peek(), Some('%' | '|')) {
                        self.pos += 1;
                    }
                    TokenKind::BinaryOperator
                }
            }
            '*' => {
                self.pos += 1;
                if self.peek() == Some('=') {
                    self.pos += 1;
                    TokenKind::AssignOperator
                } else {
                    if self.peek() == Some('*') {
                        self.pos += 1;
                    }
                    TokenKind::BinaryOperator
                }
            }
            '/' => {
                self.pos += 1;
                if self.peek() == Some('=') {
                    self.pos += 1;
                    TokenKind::AssignOperator
                } else {
                    if matches!(self.peek(), Some('^' | '_')) {
                        self.pos += 1;
                    }
                    TokenKind::BinaryOperator
                }
            }
            '=' => {
                self.pos += 1;
                if matches!(self.peek(), Some('=' | '>')) {
                    self.pos += 1;
                    TokenKind::BinaryOperator
                } else {
                    TokenKind::AssignOperator
                }
            }
            '<' | '>' => {
                self.pos += 1;
                if self.peek() == Some('=') {
                    self.pos += 1;
                }
                TokenKind::BinaryOperator
            }
            '!' => {
                self.pos += 1;
                if self.peek() == Some('=') {
                    self.pos += 1;
                    TokenKind::BinaryOperator
                } else {
                    TokenKind::UnaryOperator
                }
            }
            '&' => {
                self.pos += 1;
                TokenKind::UnaryOperator
            }
            _ => return None,
        };

        Some(self.token_from(kind, start))
    }
}

const fn is_digit_in_base(c: char, base: u32) -> bool {
    match base {
        2 => matches!(c, '0' | '1'),
        16 => c.is_ascii_hexdigit(),
        _ => c.is_ascii_digit(),
    }
}
