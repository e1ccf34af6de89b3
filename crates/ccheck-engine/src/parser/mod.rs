//! Front end for the checked C subset: lexer, parser and the semantic
//! checks that run inline with parsing.
//!
//! # Example
//!
//! ```ignore
//! use ccheck_engine::parser::{parse_program, tokenize, SemanticAnalyzer};
//! use ccheck_engine::DiagnosticReporter;
//!
//! let mut diags = DiagnosticReporter::new();
//! let mut sema = SemanticAnalyzer::default();
//! parse_program(tokenize("int main() { return 0; }"), &mut diags, &mut sema);
//! assert!(diags.is_empty());
//! ```

pub mod checker;
pub mod lexer;
pub mod parser;
pub mod token;

// Re-exports for convenience
pub use checker::{SemanticAnalyzer, SemanticHooks, SymbolTable, TypeKind};
pub use lexer::{tokenize, LexError, Lexer};
pub use parser::{parse_program, ParseSummary, Parser};
pub use token::{Keyword, Span, Token, TokenKind};
