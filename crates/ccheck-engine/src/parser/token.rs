//! Token definitions for the checked C subset.
//!
//! Tokens keep their source text: the parser matches operators and
//! punctuation by lexeme, and diagnostics quote it back to the user.

use std::fmt;

use crate::parser::lexer::LexError;

/// Reserved words recognised by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Types
    Int,
    Float,
    Double,
    Char,
    Long,
    Void,
    Const,

    // Control flow
    Return,
    If,
    Else,
    While,
    For,
    Break,
    Continue,
}

impl Keyword {
    /// Every keyword, in declaration order.
    pub const ALL: [Keyword; 14] = [
        Keyword::Int,
        Keyword::Float,
        Keyword::Double,
        Keyword::Char,
        Keyword::Long,
        Keyword::Void,
        Keyword::Const,
        Keyword::Return,
        Keyword::If,
        Keyword::Else,
        Keyword::While,
        Keyword::For,
        Keyword::Break,
        Keyword::Continue,
    ];

    /// Source spelling of the keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Int => "int",
            Keyword::Float => "float",
            Keyword::Double => "double",
            Keyword::Char => "char",
            Keyword::Long => "long",
            Keyword::Void => "void",
            Keyword::Const => "const",
            Keyword::Return => "return",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::For => "for",
            Keyword::Break => "break",
            Keyword::Continue => "continue",
        }
    }

    /// Look up the keyword spelled exactly `text`.
    pub fn lookup(text: &str) -> Option<Keyword> {
        Keyword::ALL.into_iter().find(|kw| kw.as_str() == text)
    }

    /// True for the base type names (`const` is a qualifier, not a type).
    pub fn is_base_type(self) -> bool {
        matches!(
            self,
            Keyword::Int
                | Keyword::Float
                | Keyword::Double
                | Keyword::Char
                | Keyword::Long
                | Keyword::Void
        )
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(Keyword),
    Identifier,
    Operator,
    /// Numeric literal; `is_float` is set by a fractional part or exponent.
    Number { is_float: bool },
    String,
    Char,
    /// Punctuation: one of `( ) { } [ ] ; , ? .`
    Symbol,
    End,
    Unknown,
    /// Malformed literal; the token keeps the partial lexeme.
    Error(LexError),
}

/// Source location information for a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
    /// 1-based line
    pub line: u32,
    /// 1-based column, counted in characters
    pub column: u32,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// A lexed token. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
    /// Length in characters of the consumed text
    pub length: u32,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        let lexeme = lexeme.into();
        let length = lexeme.chars().count() as u32;
        Self {
            kind,
            lexeme,
            span,
            length,
        }
    }

    /// The end-of-input sentinel at the given position.
    pub fn end(offset: usize, line: u32, column: u32) -> Self {
        Self {
            kind: TokenKind::End,
            lexeme: String::new(),
            span: Span::new(offset, offset, line, column),
            length: 1,
        }
    }

    pub fn line(&self) -> u32 {
        self.span.line
    }

    pub fn column(&self) -> u32 {
        self.span.column
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }

    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.kind == TokenKind::Keyword(kw)
    }

    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.lexeme == op
    }

    pub fn is_symbol(&self, sym: &str) -> bool {
        self.kind == TokenKind::Symbol && self.lexeme == sym
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    /// The keyword, if this token is one of the base type names.
    pub fn base_type(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) if kw.is_base_type() => Some(kw),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::End => write!(f, "end of input"),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for kw in Keyword::ALL {
            assert_eq!(Keyword::lookup(kw.as_str()), Some(kw));
        }
        assert_eq!(Keyword::lookup("Int"), None);
        assert_eq!(Keyword::lookup("integer"), None);
    }

    #[test]
    fn test_base_types() {
        assert!(Keyword::Void.is_base_type());
        assert!(!Keyword::Const.is_base_type());
        assert!(!Keyword::Return.is_base_type());
    }

    #[test]
    fn test_token_length_counts_chars() {
        let tok = Token::new(TokenKind::String, "\"é\"", Span::new(0, 4, 1, 1));
        assert_eq!(tok.length, 3);
    }

    #[test]
    fn test_token_predicates() {
        let semi = Token::new(TokenKind::Symbol, ";", Span::new(0, 1, 1, 1));
        assert!(semi.is_symbol(";"));
        assert!(!semi.is_operator(";"));

        let end = Token::end(10, 2, 3);
        assert!(end.is_end());
        assert_eq!(end.to_string(), "end of input");
    }
}
