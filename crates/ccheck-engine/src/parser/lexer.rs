//! Lexer for the checked C subset.
//!
//! Whitespace, comments and literals are scanned by hand so that malformed
//! literals can be turned into `Error` tokens carrying their partial text.
//! Identifiers, operators and punctuation go through logos; keywords are
//! identifiers whose text is reserved.
//!
//! Tokenization never fails: the output always ends with exactly one `End`.

use logos::Logos;
use thiserror::Error;

use crate::parser::token::{Keyword, Span, Token, TokenKind};

/// Logos-based token enum for the regular part of the grammar.
///
/// Converted to [`TokenKind`] right after matching.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum LogosToken {
    /// Reclassified as a keyword after matching when the text is reserved
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    // Two-character operators win over their one-character prefixes
    #[token("==")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    #[token("++")]
    #[token("--")]
    #[token("&&")]
    #[token("||")]
    #[token("<<")]
    #[token(">>")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("->")]
    #[token("::")]
    CompoundOperator,

    #[token("(")]
    #[token(")")]
    #[token("{")]
    #[token("}")]
    #[token("[")]
    #[token("]")]
    #[token(";")]
    #[token(",")]
    #[token("?")]
    #[token(".")]
    Punctuation,

    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("=")]
    #[token("<")]
    #[token(">")]
    #[token("!")]
    #[token("~")]
    #[token("&")]
    #[token("|")]
    #[token("^")]
    #[token(":")]
    #[token("@")]
    #[token("#")]
    #[token("$")]
    #[token("\\")]
    Operator,
}

impl LogosToken {
    fn into_kind(self, text: &str) -> TokenKind {
        match self {
            LogosToken::Identifier => {
                Keyword::lookup(text).map_or(TokenKind::Identifier, TokenKind::Keyword)
            }
            LogosToken::CompoundOperator | LogosToken::Operator => TokenKind::Operator,
            LogosToken::Punctuation => TokenKind::Symbol,
        }
    }
}

/// Why a literal could not be lexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("hexadecimal literal has no digits after '0x'")]
    MissingHexDigits,

    #[error("exponent has no digits")]
    MissingExponentDigits,

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("newline inside string literal")]
    NewlineInString,

    #[error("character literal is missing its closing quote")]
    UnterminatedChar,

    #[error("empty character literal")]
    EmptyChar,
}

impl LexError {
    /// Get a hint for fixing this error
    pub fn hint(&self) -> &'static str {
        match self {
            LexError::MissingHexDigits => "write at least one hex digit, e.g. 0x1F",
            LexError::MissingExponentDigits => "write the exponent, e.g. 1e10 or 2.5E-3",
            LexError::UnterminatedString | LexError::NewlineInString => {
                "add a closing quote before the end of the line"
            }
            LexError::UnterminatedChar => "a character literal holds exactly one character",
            LexError::EmptyChar => "write a character between the quotes, e.g. 'a'",
        }
    }
}

/// Position marker: byte offset plus line/column of a character.
#[derive(Debug, Clone, Copy)]
struct Mark {
    pos: usize,
    line: u32,
    column: u32,
}

/// Main lexer structure.
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    line: u32,
    column: u32,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the whole source. The result always ends with one `End` token.
    pub fn tokenize(mut self) -> Vec<Token> {
        loop {
            self.skip_trivia();

            let Some(ch) = self.peek(0) else {
                break;
            };

            let token = match ch {
                '0'..='9' => self.lex_number(),
                '"' => self.lex_string(),
                '\'' => self.lex_char(),
                _ => self.lex_regular(),
            };
            self.tokens.push(token);
        }

        self.tokens
            .push(Token::end(self.source.len(), self.line, self.column));
        self.tokens
    }

    // ========================================================================
    // Cursor
    // ========================================================================

    fn peek(&self, k: usize) -> Option<char> {
        self.source[self.pos..].chars().nth(k)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek(0)?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn bump_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let mut count = 0;
        while self.peek(0).is_some_and(&pred) {
            self.bump();
            count += 1;
        }
        count
    }

    fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    fn token_from(&self, kind: TokenKind, start: Mark) -> Token {
        let span = Span::new(start.pos, self.pos, start.line, start.column);
        Token::new(kind, &self.source[start.pos..self.pos], span)
    }

    // ========================================================================
    // Trivia
    // ========================================================================

    /// Skip whitespace, `//` comments and `/* */` comments.
    ///
    /// An unterminated block comment swallows the rest of the input.
    fn skip_trivia(&mut self) {
        loop {
            match (self.peek(0), self.peek(1)) {
                (Some(' ' | '\t' | '\n' | '\r' | '\x0c' | '\x0b'), _) => {
                    self.bump();
                }
                (Some('/'), Some('/')) => {
                    self.bump_while(|c| c != '\n');
                }
                (Some('/'), Some('*')) => {
                    self.bump();
                    self.bump();
                    loop {
                        match (self.peek(0), self.peek(1)) {
                            (Some('*'), Some('/')) => {
                                self.bump();
                                self.bump();
                                break;
                            }
                            (Some(_), _) => {
                                self.bump();
                            }
                            (None, _) => return,
                        }
                    }
                }
                _ => return,
            }
        }
    }

    // ========================================================================
    // Literals
    // ========================================================================

    fn lex_number(&mut self) -> Token {
        let start = self.mark();
        let mut is_float = false;

        match (self.peek(0), self.peek(1)) {
            (Some('0'), Some('x' | 'X')) => {
                self.bump();
                self.bump();
                if self.bump_while(|c| c.is_ascii_hexdigit()) == 0 {
                    return self.token_from(TokenKind::Error(LexError::MissingHexDigits), start);
                }
            }
            (Some('0'), Some(next)) if next.is_ascii_digit() => {
                self.bump();
                self.bump_while(|c| matches!(c, '0'..='7'));
            }
            _ => {
                self.bump_while(|c| c.is_ascii_digit());

                if self.peek(0) == Some('.') && self.peek(1).is_some_and(|c| c.is_ascii_digit()) {
                    is_float = true;
                    self.bump();
                    self.bump_while(|c| c.is_ascii_digit());
                }

                if matches!(self.peek(0), Some('e' | 'E')) {
                    is_float = true;
                    self.bump();
                    if matches!(self.peek(0), Some('+' | '-')) {
                        self.bump();
                    }
                    if self.bump_while(|c| c.is_ascii_digit()) == 0 {
                        return self
                            .token_from(TokenKind::Error(LexError::MissingExponentDigits), start);
                    }
                }
            }
        }

        self.token_from(TokenKind::Number { is_float }, start)
    }

    fn lex_string(&mut self) -> Token {
        let start = self.mark();
        self.bump(); // opening quote

        loop {
            match self.peek(0) {
                None => {
                    return self.token_from(TokenKind::Error(LexError::UnterminatedString), start)
                }
                // The newline is left for the trivia skipper
                Some('\n') => {
                    return self.token_from(TokenKind::Error(LexError::NewlineInString), start)
                }
                Some('\\') => {
                    self.bump();
                    if self.bump().is_none() {
                        return self
                            .token_from(TokenKind::Error(LexError::UnterminatedString), start);
                    }
                }
                Some('"') => {
                    self.bump();
                    return self.token_from(TokenKind::String, start);
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    fn lex_char(&mut self) -> Token {
        let start = self.mark();
        self.bump(); // opening quote

        match self.peek(0) {
            None | Some('\n') => {
                return self.token_from(TokenKind::Error(LexError::UnterminatedChar), start)
            }
            Some('\'') => {
                self.bump();
                return self.token_from(TokenKind::Error(LexError::EmptyChar), start);
            }
            Some('\\') => {
                self.bump();
                if matches!(self.peek(0), None | Some('\n')) {
                    return self.token_from(TokenKind::Error(LexError::UnterminatedChar), start);
                }
                self.bump();
            }
            Some(_) => {
                self.bump();
            }
        }

        if self.peek(0) == Some('\'') {
            self.bump();
            self.token_from(TokenKind::Char, start)
        } else {
            self.token_from(TokenKind::Error(LexError::UnterminatedChar), start)
        }
    }

    // ========================================================================
    // Everything else
    // ========================================================================

    /// Use logos for identifiers, operators and punctuation.
    fn lex_regular(&mut self) -> Token {
        let start = self.mark();
        let mut logos_lexer = LogosToken::lexer(&self.source[self.pos..]);

        let (kind, len) = match logos_lexer.next() {
            Some(Ok(logos_token)) => (
                logos_token.into_kind(logos_lexer.slice()),
                logos_lexer.span().end,
            ),
            // Anything logos does not know is a single Unknown character
            _ => {
                let ch_len = self.peek(0).map_or(1, char::len_utf8);
                (TokenKind::Unknown, ch_len)
            }
        };

        let end = self.pos + len;
        while self.pos < end {
            self.bump();
        }
        self.token_from(kind, start)
    }
}

/// Tokenize `source` in one call.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}
