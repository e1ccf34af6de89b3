//! Recursive descent parser with inline semantic callbacks
//!
//! There is no AST. The parser walks the token stream once, left to right,
//! and reports what it recognises to a [`SemanticHooks`] implementation.
//! Syntax errors go to the [`DiagnosticReporter`]; after each one the parser
//! resynchronises on a statement boundary and keeps going, so every finite
//! input is consumed to the end.

pub mod expr;
pub mod recovery;
pub mod stmt;

use crate::diagnostic::DiagnosticReporter;
use crate::parser::checker::{SemanticHooks, TypeKind};
use crate::parser::token::{Keyword, Token, TokenKind};

/// Deepest statement or expression nesting the parser descends into. A
/// construct nested deeper is reported once and skipped as a whole.
pub const MAX_NESTING: usize = 128;

/// What one parse run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseSummary {
    /// Syntax diagnostics reported by this run
    pub syntax_errors: usize,
    /// Tokens in the stream, including the `End` sentinel
    pub tokens: usize,
}

/// Parser state.
///
/// Lookahead is unbounded in principle but the grammar never needs more
/// than four tokens; reads past the end return the `End` sentinel.
pub struct Parser<'a, S: SemanticHooks> {
    /// Pre-tokenized input, always ending with `End`
    tokens: Vec<Token>,

    /// Current position in token stream
    pos: usize,

    diags: &'a mut DiagnosticReporter,
    sema: &'a mut S,

    syntax_errors: usize,

    /// Enclosing `while`/`for` statements
    loop_depth: usize,

    /// Statements and parenthesised expressions currently open
    nesting: usize,
}

impl<'a, S: SemanticHooks> Parser<'a, S> {
    pub fn new(mut tokens: Vec<Token>, diags: &'a mut DiagnosticReporter, sema: &'a mut S) -> Self {
        // Add the End sentinel if the caller did not
        if !tokens.last().is_some_and(Token::is_end) {
            let end = match tokens.last() {
                Some(last) => Token::end(
                    last.span.end,
                    last.line(),
                    last.column() + last.length,
                ),
                None => Token::end(0, 1, 1),
            };
            tokens.push(end);
        }

        Self {
            tokens,
            pos: 0,
            diags,
            sema,
            syntax_errors: 0,
            loop_depth: 0,
            nesting: 0,
        }
    }

    /// Parse the whole token stream.
    ///
    /// `Program := { Function | Decl }`
    pub fn parse_program(mut self) -> ParseSummary {
        while !self.at_end() {
            let start = self.pos;
            if self.look_like_function() {
                self.parse_function();
            } else {
                self.parse_decl();
            }
            if self.pos == start {
                self.report(&format!("unexpected {}", self.current()));
                self.advance();
            }
        }

        tracing::debug!(
            syntax_errors = self.syntax_errors,
            tokens = self.tokens.len(),
            "parsed program"
        );

        ParseSummary {
            syntax_errors: self.syntax_errors,
            tokens: self.tokens.len(),
        }
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Token `k` positions ahead, saturating at `End`.
    #[inline]
    pub fn la(&self, k: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + k).min(last)]
    }

    #[inline]
    pub fn current(&self) -> &Token {
        self.la(0)
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.current().is_end()
    }

    /// Advance to the next token, returning the previous current token.
    /// Never moves past `End`.
    pub fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if !tok.is_end() {
            self.pos += 1;
        }
        tok
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn check_op(&self, op: &str) -> bool {
        self.current().is_operator(op)
    }

    #[inline]
    fn check_sym(&self, sym: &str) -> bool {
        self.current().is_symbol(sym)
    }

    #[inline]
    fn check_kw(&self, kw: Keyword) -> bool {
        self.current().is_keyword(kw)
    }

    fn accept_op(&mut self, op: &str) -> bool {
        let matched = self.check_op(op);
        if matched {
            self.advance();
        }
        matched
    }

    fn accept_any_op(&mut self, ops: &[&str]) -> bool {
        ops.iter().any(|op| self.accept_op(op))
    }

    fn accept_sym(&mut self, sym: &str) -> bool {
        let matched = self.check_sym(sym);
        if matched {
            self.advance();
        }
        matched
    }

    fn accept_kw(&mut self, kw: Keyword) -> bool {
        let matched = self.check_kw(kw);
        if matched {
            self.advance();
        }
        matched
    }

    /// Consume `sym` or report it missing and skip to it or to the next
    /// synchronisation token. The symbol is consumed if the skip lands on it.
    fn expect_sym(&mut self, sym: &str) -> bool {
        if self.accept_sym(sym) {
            return true;
        }
        self.report(&format!("missing '{}'", sym));
        recovery::skip_to_symbol(self, sym);
        self.accept_sym(sym)
    }

    /// Consume an identifier. On failure the offending token is skipped
    /// unless it is `End` or a synchronisation token.
    fn expect_ident(&mut self) -> Option<Token> {
        if self.current().is_identifier() {
            return Some(self.advance());
        }
        self.report("missing identifier");
        if !self.at_end() && !recovery::is_sync_token(self.current()) {
            self.advance();
        }
        None
    }

    // ========================================================================
    // Lookahead predicates
    // ========================================================================

    /// Offset of the first token after an optional `const` and its stars.
    fn skip_const_prefix(&self) -> usize {
        let mut k = 0;
        if self.la(k).is_keyword(Keyword::Const) {
            k += 1;
            while self.la(k).is_operator("*") {
                k += 1;
            }
        }
        k
    }

    /// `["const" "*"*] BaseType`
    fn look_like_type(&self) -> bool {
        self.la(self.skip_const_prefix()).base_type().is_some()
    }

    /// `Type Ident "("`, or a bare `Ident "("` (a function missing its type).
    fn look_like_function(&self) -> bool {
        let mut k = self.skip_const_prefix();
        if self.la(k).base_type().is_some() {
            k += 1;
            while self.la(k).is_operator("*") {
                k += 1;
            }
            if self.la(k).is_identifier() && self.la(k + 1).is_symbol("(") {
                return true;
            }
        }
        self.la(0).is_identifier() && self.la(1).is_symbol("(")
    }

    /// True if the current token can begin an expression.
    fn is_expr_start(&self) -> bool {
        let tok = self.current();
        match tok.kind {
            TokenKind::Identifier | TokenKind::Number { .. } | TokenKind::String | TokenKind::Char => {
                true
            }
            TokenKind::Symbol => tok.lexeme == "(",
            TokenKind::Operator => expr::UNARY_OPS.contains(&tok.lexeme.as_str()),
            _ => false,
        }
    }

    // ========================================================================
    // Error Handling
    // ========================================================================

    /// Report a syntax error at the current token.
    fn report(&mut self, message: &str) {
        self.syntax_errors += 1;
        let tok = self.current().clone();
        self.diags.syntax(message, &tok);
    }

    /// Run `parse` one nesting level deeper, or report and skip the
    /// construct when the limit is reached.
    fn nested(&mut self, what: &str, parse: fn(&mut Self)) {
        if self.nesting >= MAX_NESTING {
            self.report(&format!("{} nested too deeply", what));
            recovery::skip_nested(self);
            return;
        }
        self.nesting += 1;
        parse(self);
        self.nesting -= 1;
    }

    // ========================================================================
    // Types
    // ========================================================================

    /// `Type := ["const" "*"*] BaseType "*"*`
    ///
    /// A missing type is reported. If an identifier follows, it is left for
    /// the caller and the type defaults to `int`; any other token is skipped.
    fn parse_type(&mut self) -> TypeKind {
        if self.accept_kw(Keyword::Const) {
            while self.accept_op("*") {}
        }

        let Some(kw) = self.current().base_type() else {
            self.report("missing type");
            if self.current().is_identifier() {
                return TypeKind::Int;
            }
            self.advance();
            return TypeKind::Unknown;
        };

        self.advance();
        while self.accept_op("*") {}
        TypeKind::from_keyword(kw)
    }
}

/// Parse `tokens`, reporting into `diags` and driving `sema`.
pub fn parse_program<S: SemanticHooks>(
    tokens: Vec<Token>,
    diags: &mut DiagnosticReporter,
    sema: &mut S,
) -> ParseSummary {
    Parser::new(tokens, diags, sema).parse_program()
}
