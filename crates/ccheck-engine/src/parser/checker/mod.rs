//! Name resolution and semantic checks
//!
//! Runs inline with parsing: there is no AST, the parser reports each
//! declaration, use and `return` through [`SemanticHooks`].

pub mod semantics;
pub mod symbols;

pub use semantics::{FunctionState, SemanticAnalyzer, SemanticHooks};
pub use symbols::{DuplicateSymbolError, ScopeLayer, Symbol, SymbolKind, SymbolTable, TypeKind};
