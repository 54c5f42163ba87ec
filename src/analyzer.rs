use crate::annotation;
use crate::token::{Token, TokenKind};

/// Maximum `{ ... }` nesting before classification gives up. Keeps
/// recursion bounded on pathological input.
pub const MAX_NESTING: usize = 64;

/// Reason the analysis pass aborted.
///
/// Never escapes to callers of [`analyze`]: the driving loop catches it
/// and flags every token from the cursor to the end of the stream as an
/// error, so the sample still renders partially highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AnalyzeError {
    /// The token stream ended in the middle of a construct.
    #[error("token stream ended inside a construct")]
    UnexpectedEnd,
    /// Delimited scopes nested deeper than `MAX_NESTING`.
    #[error("nesting deeper than {MAX_NESTING} levels")]
    TooDeeplyNested,
}

/// Grammar applied to the next construct.
///
/// `Struct` and `Typedef` share the member-declaration grammar with
/// `Root`; `Function` switches to expression grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Root,
    Struct,
    Typedef,
    Function,
}

/// Reclassify a lexed token stream in place according to the
/// scope-sensitive TQ grammar.
///
/// Terminates on any input and never panics: recognizers that fail to
/// consume a token are force-advanced past, and an aborted pass leaves
/// the already-classified prefix intact while flagging the remainder
/// as errors.
pub fn analyze(tokens: &mut Vec<Token>) {
    let root = scope_hint(tokens.first()).unwrap_or(Scope::Root);
    let mut ctx = Context {
        tokens,
        index: 0,
        scopes: vec![root],
        depth: 0,
    };

    while ctx.index < ctx.tokens.len() {
        let before = ctx.index;
        if ctx.dispatch().is_err() {
            for token in &mut ctx.tokens[ctx.index..] {
                token.error = true;
            }
            return;
        }
        if ctx.index == before {
            // livelock guard: the recognizer consumed nothing
            ctx.index += 1;
        }
    }
}

/// First-line comment selecting the initial grammar for a snippet.
fn scope_hint(first: Option<&Token>) -> Option<Scope> {
    let token = first?;
    if token.kind != TokenKind::Comment {
        return None;
    }
    match token.value.as_str() {
        "#/// root scope ///" => Some(Scope::Root),
        "#/// func scope ///" => Some(Scope::Function),
        "#/// struct scope ///" => Some(Scope::Struct),
        _ => None,
    }
}

type Result<T> = std::result::Result<T, AnalyzeError>;

/// Cursor state threaded through the recognizers; lives for exactly
/// one classification pass.
struct Context<'a> {
    tokens: &'a mut Vec<Token>,
    index: usize,
    scopes: Vec<Scope>,
    depth: usize,
}

impl Context<'_> {
    // -- cursor helpers --

    fn at_end(&self) -> bool {
        self.index >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn token(&self) -> Result<&Token> {
        self.tokens.get(self.index).ok_or(AnalyzeError::UnexpectedEnd)
    }

    fn value_is(&self, value: &str) -> bool {
        self.peek().is_some_and(|t| t.value == value)
    }

    /// Overwrite the current token's kind and advance.
    fn reclassify(&mut self, kind: TokenKind) -> Result<()> {
        let token = self
            .tokens
            .get_mut(self.index)
            .ok_or(AnalyzeError::UnexpectedEnd)?;
        token.kind = kind;
        self.index += 1;
        Ok(())
    }

    /// Flag the current token as an error and advance.
    fn flag_error(&mut self) -> Result<()> {
        let token = self
            .tokens
            .get_mut(self.index)
            .ok_or(AnalyzeError::UnexpectedEnd)?;
        token.error = true;
        self.index += 1;
        Ok(())
    }

    // -- trivia skipping --

    /// Skip whitespace and comments, staying on the current line.
    fn skip_whitespace(&mut self) {
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Whitespace => self.index += 1,
                TokenKind::Comment => self.visit_comment(),
                _ => break,
            }
        }
    }

    /// Skip whitespace, newlines, and comments.
    fn skip_whitespace_and_newlines(&mut self) {
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Whitespace | TokenKind::Newline => self.index += 1,
                TokenKind::Comment => self.visit_comment(),
                _ => break,
            }
        }
    }

    /// Plain comments are skipped; an error-annotation comment becomes
    /// a `MetaError` token (without advancing, so the skip loops stop
    /// on it) and swallows the newline right after it.
    fn visit_comment(&mut self) {
        if annotation::is_error_annotation(&self.tokens[self.index].value) {
            let token = &mut self.tokens[self.index];
            token.kind = TokenKind::MetaError;
            token.value = annotation::extract(&token.value);

            let next = self.index + 1;
            if self
                .tokens
                .get(next)
                .is_some_and(|t| t.kind == TokenKind::Newline)
            {
                self.tokens.remove(next);
            }
        } else {
            self.index += 1;
        }
    }

    // -- driving loop --

    fn dispatch(&mut self) -> Result<()> {
        self.skip_whitespace_and_newlines();
        if self.at_end() {
            return Ok(());
        }
        match self.scopes.last().copied().unwrap_or(Scope::Root) {
            Scope::Root | Scope::Struct | Scope::Typedef => self.member()?,
            Scope::Function => self.expression()?,
        }
        self.skip_whitespace_and_newlines();
        Ok(())
    }

    /// Member-declaration grammar: attributes, imports, fields,
    /// functions, constructors/destructors, structs, and typedefs.
    /// Anything else at this level is an error.
    fn member(&mut self) -> Result<()> {
        let token = self.token()?;

        match token.kind {
            // hints and extracted diagnostics carry no grammar; trivia
            // can only reach here through an odd cursor position
            TokenKind::InlineHint
            | TokenKind::MetaError
            | TokenKind::Whitespace
            | TokenKind::Newline => {
                self.index += 1;
                Ok(())
            }
            TokenKind::Punctuation if token.value == "@" => self.attribute(),
            TokenKind::Word => {
                let value = token.value.clone();
                match value.as_str() {
                    "from" => self.from_import(),
                    "let" | "const" => self.field(),
                    "func" => self.function(),
                    "constructor" | "destructor" => self.ctor_dtor(),
                    "struct" => self.struct_decl(),
                    "typedef" => self.typedef_decl(),
                    _ => self.flag_error(),
                }
            }
            _ => self.flag_error(),
        }
    }

    /// `@path.to.attr` with an optional call-shaped argument list; the
    /// whole dotted path keeps the attribute kind.
    fn attribute(&mut self) -> Result<()> {
        self.reclassify(TokenKind::Attribute)?; // '@'
        if self.at_end() {
            return Ok(());
        }

        let start = self.index;
        self.identifier_path()?;
        for token in &mut self.tokens[start..self.index] {
            token.kind = TokenKind::Attribute;
        }

        if self.value_is("(") {
            self.call_arguments()?;
        }
        Ok(())
    }

    /// `from <module.path> import { a [as b], c, ... }`
    fn from_import(&mut self) -> Result<()> {
        self.reclassify(TokenKind::Keyword)?; // from
        self.skip_whitespace_and_newlines();

        self.identifier_path()?;
        self.skip_whitespace_and_newlines();

        self.reclassify(TokenKind::Keyword)?; // import
        self.skip_whitespace_and_newlines();

        if !self.value_is("{") {
            return Ok(());
        }
        self.reclassify(TokenKind::Punctuation)?;
        self.skip_whitespace_and_newlines();

        while !self.at_end() && !self.value_is("}") {
            self.reclassify(TokenKind::Identifier)?;
            self.skip_whitespace();

            if self.value_is("as") {
                self.reclassify(TokenKind::Keyword)?;
                self.skip_whitespace_and_newlines();
                self.reclassify(TokenKind::Identifier)?;
                self.skip_whitespace_and_newlines();
            }

            if !self.value_is(",") {
                break;
            }
            self.reclassify(TokenKind::Punctuation)?;
            self.skip_whitespace_and_newlines();
        }

        self.skip_whitespace_and_newlines();
        self.reclassify(TokenKind::Punctuation)?; // '}'
        Ok(())
    }

    /// `let`/`const` declaration: either a bare name, or a type
    /// expression followed by a name, with an optional `= <expr>`.
    fn field(&mut self) -> Result<()> {
        self.reclassify(TokenKind::Keyword)?;
        self.skip_whitespace();

        let bare_name = self.index + 3 < self.tokens.len()
            && self.tokens[self.index].kind == TokenKind::Word
            && is_trivia(&self.tokens[self.index + 1])
            && self.tokens[self.index + 2].kind != TokenKind::Word;

        if bare_name {
            self.reclassify(TokenKind::Identifier)?;
            self.skip_whitespace();
        } else {
            self.expression()?; // declared type
            self.skip_whitespace();

            let named = self.peek().is_some_and(|t| t.kind == TokenKind::Word)
                && self.tokens.get(self.index + 1).is_none_or(is_trivia);
            if named {
                self.reclassify(TokenKind::Identifier)?;
                self.skip_whitespace();
            } else {
                return Ok(());
            }
        }

        if !self.value_is("=") {
            return Ok(());
        }
        self.index += 1; // '=' keeps its lexed assign kind
        self.skip_whitespace_and_newlines();

        self.expression()?;
        self.skip_whitespace_and_newlines();
        Ok(())
    }

    /// `func name(params) [returnType] { body }`, or `func ...` for a
    /// forward-declared signature in documentation.
    fn function(&mut self) -> Result<()> {
        self.reclassify(TokenKind::Keyword)?;
        self.skip_whitespace();

        if self.value_is("...") {
            self.reclassify(TokenKind::InlineHint)?;
            self.skip_whitespace();
        } else {
            self.reclassify(TokenKind::Function)?;
            self.skip_whitespace();
            self.parameters()?;
            self.skip_whitespace_and_newlines();

            if self.at_end() {
                return Ok(());
            }
            if !self.value_is("{") {
                self.expression()?; // return type
            }
        }

        self.skip_whitespace_and_newlines();
        if self.value_is("{") {
            self.delimited_scope(Scope::Function)?;
        }
        Ok(())
    }

    /// `constructor`/`destructor`: the `func` shape without a name.
    fn ctor_dtor(&mut self) -> Result<()> {
        self.reclassify(TokenKind::Keyword)?;
        self.skip_whitespace();
        self.parameters()?;
        self.skip_whitespace_and_newlines();

        if self.at_end() {
            return Ok(());
        }
        if !self.value_is("{") {
            self.expression()?;
        }

        self.skip_whitespace_and_newlines();
        if self.value_is("{") {
            self.delimited_scope(Scope::Function)?;
        }
        Ok(())
    }

    fn struct_decl(&mut self) -> Result<()> {
        self.reclassify(TokenKind::Keyword)?;
        self.skip_whitespace();

        self.reclassify(TokenKind::Identifier)?; // struct name
        self.skip_whitespace();

        if self.value_is("{") {
            self.delimited_scope(Scope::Struct)?;
        }
        Ok(())
    }

    /// `typedef [(args)] name { members }`
    fn typedef_decl(&mut self) -> Result<()> {
        self.reclassify(TokenKind::Keyword)?;
        self.skip_whitespace();

        if self.value_is("(") {
            self.call_arguments()?;
            self.skip_whitespace();
        }

        self.reclassify(TokenKind::Identifier)?;
        self.skip_whitespace();

        if self.value_is("{") {
            self.delimited_scope(Scope::Typedef)?;
        }
        Ok(())
    }

    /// `{ ... }` parsed under the given scope until the matching `}`
    /// or end of input.
    fn delimited_scope(&mut self, scope: Scope) -> Result<()> {
        if self.depth >= MAX_NESTING {
            return Err(AnalyzeError::TooDeeplyNested);
        }

        self.reclassify(TokenKind::Punctuation)?; // '{'
        self.scopes.push(scope);
        self.depth += 1;

        while !self.at_end() && !self.value_is("}") {
            let before = self.index;
            self.dispatch()?;
            if self.index == before {
                self.index += 1;
            }
        }

        self.depth -= 1;
        self.scopes.pop();

        if self.value_is("}") {
            self.reclassify(TokenKind::Punctuation)?;
        }
        Ok(())
    }

    // -- expression grammar --

    /// Left-to-right term/operator chain. No precedence: highlighting
    /// has no use for an AST.
    fn expression(&mut self) -> Result<()> {
        loop {
            let mut run_end = self.index;
            while run_end < self.tokens.len() && is_expression_token(&self.tokens[run_end]) {
                run_end += 1;
            }
            while self.index < run_end {
                self.expression_term()?;
            }

            self.skip_whitespace();
            let chained = self.peek().is_some_and(|t| {
                matches!(
                    t.kind,
                    TokenKind::BinaryOperator | TokenKind::AssignOperator
                )
            });
            if chained {
                self.index += 1;
                self.skip_whitespace();
                continue;
            }
            return Ok(());
        }
    }

    fn expression_term(&mut self) -> Result<()> {
        let token = self.token()?;

        match token.kind {
            TokenKind::Word => {
                if is_fixed_width_int(&token.value) {
                    return self.reclassify(TokenKind::Type);
                }
                let value = token.value.clone();
                match value.as_str() {
                    "new" => self.construction(),
                    "let" | "const" | "while" | "for" | "if" | "elif" | "else" | "do"
                    | "match" | "case" | "default" | "return" => {
                        self.reclassify(TokenKind::Keyword)
                    }
                    "bool" | "byte" | "void" | "string" | "noreturn" => {
                        self.reclassify(TokenKind::Type)
                    }
                    "true" | "false" => self.reclassify(TokenKind::Boolean),
                    // call detection happens on the '(' that follows
                    _ => self.reclassify(TokenKind::Identifier),
                }
            }
            TokenKind::Punctuation if token.value == "(" => {
                if self.index > 0
                    && matches!(
                        self.tokens[self.index - 1].kind,
                        TokenKind::Word | TokenKind::Identifier
                    )
                {
                    self.tokens[self.index - 1].kind = TokenKind::Function;
                }
                self.index += 1;
                Ok(())
            }
            _ => {
                self.index += 1;
                Ok(())
            }
        }
    }

    /// `new <type-expr> [{ initializer }]`
    ///
    /// The type expression recurses back into [`Self::expression`], so
    /// a chain of `new` keywords nests one call frame per keyword; it
    /// counts against the same depth bound as delimited scopes.
    fn construction(&mut self) -> Result<()> {
        self.reclassify(TokenKind::Keyword)?;
        self.skip_whitespace();

        if self.depth >= MAX_NESTING {
            return Err(AnalyzeError::TooDeeplyNested);
        }
        self.depth += 1;
        let nested = self.expression();
        self.depth -= 1;
        nested?;

        self.skip_whitespace_and_newlines();

        if self.value_is("{") {
            self.delimited_scope(Scope::Function)?;
        }
        Ok(())
    }

    /// `(` { type-expr name-expr [`,`] } `)`
    fn parameters(&mut self) -> Result<()> {
        if !self.value_is("(") {
            return self.flag_error();
        }
        self.reclassify(TokenKind::Punctuation)?;
        self.skip_whitespace_and_newlines();

        while !self.at_end() && !self.value_is(")") {
            self.expression()?; // parameter type
            self.expression()?; // parameter name
            self.skip_whitespace();

            if !self.value_is(",") {
                break;
            }
            self.reclassify(TokenKind::Punctuation)?;
            self.skip_whitespace_and_newlines();
        }

        self.skip_whitespace_and_newlines();
        self.reclassify(TokenKind::Punctuation)?; // ')'
        Ok(())
    }

    /// `(` { expression [`,`] } `)`
    fn call_arguments(&mut self) -> Result<()> {
        if !self.value_is("(") {
            return self.flag_error();
        }
        self.reclassify(TokenKind::Punctuation)?;

        while !self.at_end() && !self.value_is(")") {
            self.skip_whitespace_and_newlines();
            self.expression()?;

            if self.value_is(",") {
                self.index += 1;
            } else {
                self.skip_whitespace_and_newlines();
                break;
            }
            self.skip_whitespace_and_newlines();
        }

        if self.value_is(")") {
            self.reclassify(TokenKind::Punctuation)?;
        }
        Ok(())
    }

    /// `identifier ('.' identifier)*`
    fn identifier_path(&mut self) -> Result<()> {
        loop {
            self.reclassify(TokenKind::Identifier)?;
            if !self.value_is(".") {
                return Ok(());
            }
            self.index += 1;
        }
    }
}

const fn is_trivia(token: &Token) -> bool {
    matches!(
        token.kind,
        TokenKind::Whitespace | TokenKind::Comment | TokenKind::Newline
    )
}

/// Tokens that may appear inside an expression run: everything except
/// trivia, and of the punctuation set only `.`, `(`, `)`, and `:`.
fn is_expression_token(token: &Token) -> bool {
    if is_trivia(token) {
        return false;
    }
    token.kind != TokenKind::Punctuation || matches!(token.value.as_str(), "." | "(" | ")" | ":")
}

/// Fixed-width integer type spelling: `i<N>` or `u<N>` with
/// `1 <= N <= 256`.
fn is_fixed_width_int(value: &str) -> bool {
    value
        .strip_prefix(['i', 'u'])
        .is_some_and(|rest| rest.parse::<u32>().is_ok_and(|n| (1..=256).contains(&n)))
}
