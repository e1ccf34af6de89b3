//! Error recovery strategies for the parser.
//!
//! After a missing token is reported, the parser skips forward to a point
//! where parsing can resume: the token it wanted, or a synchronisation
//! token that starts or ends a statement.

use super::Parser;
use crate::parser::checker::SemanticHooks;
use crate::parser::token::{Keyword, Token, TokenKind};

/// True for `;`, `{`, `}` and every keyword that starts a statement or type.
pub fn is_sync_token(tok: &Token) -> bool {
    match tok.kind {
        TokenKind::Symbol => matches!(tok.lexeme.as_str(), ";" | "{" | "}"),
        TokenKind::Keyword(kw) => matches!(
            kw,
            Keyword::If
                | Keyword::Else
                | Keyword::While
                | Keyword::For
                | Keyword::Return
                | Keyword::Break
                | Keyword::Continue
                | Keyword::Int
                | Keyword::Float
                | Keyword::Double
                | Keyword::Void
                | Keyword::Char
                | Keyword::Long
                | Keyword::Const
        ),
        _ => false,
    }
}

/// Skip tokens until `sym`, a synchronisation token, or the end of input.
pub fn skip_to_symbol<S: SemanticHooks>(parser: &mut Parser<'_, S>, sym: &str) {
    while !parser.at_end() && !parser.check_sym(sym) && !is_sync_token(parser.current()) {
        parser.advance();
    }
}

/// Skip the construct at the cursor. Stops at a `;` or closing bracket that
/// is not matched within the skipped tokens, or at the end of input.
pub fn skip_nested<S: SemanticHooks>(parser: &mut Parser<'_, S>) {
    let mut open = 0usize;
    while !parser.at_end() {
        let tok = parser.current();
        if tok.kind == TokenKind::Symbol {
            match tok.lexeme.as_str() {
                "(" | "[" | "{" => open += 1,
                ")" | "]" | "}" => {
                    if open == 0 {
                        return;
                    }
                    open -= 1;
                }
                ";" if open == 0 => return,
                _ => {}
            }
        }
        parser.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticReporter;
    use crate::parser::lexer::tokenize;
    use crate::parser::parser::tests::Recorder;

    #[test]
    fn test_sync_tokens() {
        let tokens = tokenize("; { } if const x ) +");
        let flags: Vec<bool> = tokens.iter().map(is_sync_token).collect();
        assert_eq!(
            flags,
            vec![true, true, true, true, true, false, false, false, false]
        );
    }

    #[test]
    fn test_skip_stops_at_wanted_symbol() {
        let mut diags = DiagnosticReporter::new();
        let mut recorder = Recorder::default();
        let mut parser = Parser::new(tokenize("a b ) c;"), &mut diags, &mut recorder);

        skip_to_symbol(&mut parser, ")");
        assert!(parser.current().is_symbol(")"));
    }

    #[test]
    fn test_skip_stops_at_statement_keyword() {
        let mut diags = DiagnosticReporter::new();
        let mut recorder = Recorder::default();
        let mut parser = Parser::new(tokenize("a b while c"), &mut diags, &mut recorder);

        skip_to_symbol(&mut parser, ")");
        assert!(parser.current().is_keyword(Keyword::While));
    }

    #[test]
    fn test_skip_nested_stops_at_unmatched_closer() {
        let mut diags = DiagnosticReporter::new();
        let mut recorder = Recorder::default();
        let mut parser = Parser::new(tokenize("((a; b) { c; }) ) d"), &mut diags, &mut recorder);

        skip_nested(&mut parser);
        assert!(parser.current().is_symbol(")"));
        assert_eq!(parser.position(), 11);
    }

    #[test]
    fn test_skip_nested_stops_at_semicolon() {
        let mut diags = DiagnosticReporter::new();
        let mut recorder = Recorder::default();
        let mut parser = Parser::new(tokenize("if (x) y = 1; z"), &mut diags, &mut recorder);

        skip_nested(&mut parser);
        assert!(parser.current().is_symbol(";"));
    }

    #[test]
    fn test_skip_stops_at_end() {
        let mut diags = DiagnosticReporter::new();
        let mut recorder = Recorder::default();
        let mut parser = Parser::new(tokenize("a b c"), &mut diags, &mut recorder);

        skip_to_symbol(&mut parser, ")");
        assert!(parser.at_end());
    }
}
