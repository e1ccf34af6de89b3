//! Semantic analysis driven by the parser
//!
//! The parser calls back into a [`SemanticHooks`] implementation as it
//! recognises constructs. [`SemanticAnalyzer`] is the real implementation:
//! it keeps the scope stack, resolves names, checks `return` against the
//! enclosing function and offers spelling suggestions for unknown names.

use crate::config::{CheckConfig, SuggestionConfig, SuggestionScope};
use crate::diagnostic::{DiagnosticCode, DiagnosticReporter, Severity};
use crate::parser::token::Token;
use crate::suggest::{FuzzySearch, IdentifierTrie};

use super::symbols::{Symbol, SymbolTable, TypeKind};

/// Callbacks invoked by the parser, in source order.
pub trait SemanticHooks {
    fn enter_scope(&mut self);

    fn leave_scope(&mut self);

    /// A function header was recognised. `name` is `None` when the
    /// identifier was missing.
    fn begin_function(&mut self, ret: TypeKind, name: Option<&Token>, diags: &mut DiagnosticReporter);

    fn end_function(&mut self);

    fn declare_var(&mut self, ty: TypeKind, name: &Token, diags: &mut DiagnosticReporter);

    fn declare_param(&mut self, ty: TypeKind, name: &Token, diags: &mut DiagnosticReporter) {
        self.declare_var(ty, name, diags);
    }

    /// A bare identifier or call target was used.
    fn use_ident(&mut self, name: &Token, diags: &mut DiagnosticReporter);

    /// A `return` statement; `token` is the `return` keyword.
    fn on_return(&mut self, token: &Token, has_expr: bool, diags: &mut DiagnosticReporter);
}

/// Whether the analyzer is inside a function body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionState {
    Outside,
    InFunction { return_kind: TypeKind },
}

/// Scoped name resolution and return checking.
#[derive(Debug, Clone)]
pub struct SemanticAnalyzer {
    symbols: SymbolTable,
    /// Every name successfully declared during the run
    identifiers: IdentifierTrie,
    function: FunctionState,
    deny_redeclaration: bool,
    suggestions: SuggestionConfig,
    search: FuzzySearch,
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new(&CheckConfig::default())
    }
}

impl SemanticAnalyzer {
    /// Create an analyzer with the global scope already open.
    pub fn new(config: &CheckConfig) -> Self {
        let mut symbols = match config.suggestions.scope {
            SuggestionScope::Visible => SymbolTable::with_layer_tries(),
            SuggestionScope::Persistent => SymbolTable::new(),
        };
        symbols.push_scope();

        Self {
            symbols,
            identifiers: IdentifierTrie::new(),
            function: FunctionState::Outside,
            deny_redeclaration: config.deny_redeclaration,
            suggestions: config.suggestions.clone(),
            search: FuzzySearch::new(config.suggestions.max_states),
        }
    }

    /// Register a name provided by an included library. Goes straight into
    /// the global scope; an existing binding is left alone.
    pub fn library_function(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        self.symbols.define_global(Symbol::library(name));
        self.identifiers.insert(name);
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn identifiers(&self) -> &IdentifierTrie {
        &self.identifiers
    }

    pub fn function_state(&self) -> &FunctionState {
        &self.function
    }

    fn declare(&mut self, symbol: Symbol, token: &Token, diags: &mut DiagnosticReporter) {
        match self.symbols.define(symbol) {
            Ok(()) => {
                self.identifiers.insert(&token.lexeme);
            }
            Err(_) => diags.redeclaration(token, self.deny_redeclaration),
        }
    }

    /// Best replacement for an unresolved name, never the name itself.
    fn suggest(&self, name: &str) -> Option<String> {
        if !self.suggestions.enabled {
            return None;
        }
        let candidates = match self.suggestions.scope {
            SuggestionScope::Persistent => self.search.search(&self.identifiers, name, 3).suggestions,
            SuggestionScope::Visible => self.symbols.suggestions(name, 1, &self.search),
        };
        candidates.into_iter().find(|candidate| candidate != name)
    }
}

impl SemanticHooks for SemanticAnalyzer {
    fn enter_scope(&mut self) {
        self.symbols.push_scope();
        tracing::debug!(depth = self.symbols.depth(), "enter scope");
    }

    fn leave_scope(&mut self) {
        self.symbols.pop_scope();
        tracing::debug!(depth = self.symbols.depth(), "leave scope");
    }

    fn begin_function(&mut self, ret: TypeKind, name: Option<&Token>, diags: &mut DiagnosticReporter) {
        if let Some(token) = name {
            tracing::debug!(name = %token.lexeme, ?ret, "begin function");
            self.declare(Symbol::function(ret, token), token, diags);
        }
        self.function = FunctionState::InFunction { return_kind: ret };
        self.enter_scope();
    }

    fn end_function(&mut self) {
        if let FunctionState::InFunction { .. } = self.function {
            self.leave_scope();
            self.function = FunctionState::Outside;
            tracing::debug!("end function");
        }
    }

    fn declare_var(&mut self, ty: TypeKind, name: &Token, diags: &mut DiagnosticReporter) {
        self.declare(Symbol::variable(ty, name), name, diags);
    }

    fn use_ident(&mut self, name: &Token, diags: &mut DiagnosticReporter) {
        if self.symbols.lookup(&name.lexeme).is_some() {
            return;
        }
        let suggestion = self.suggest(&name.lexeme);
        diags.undeclared(name, suggestion);
    }

    fn on_return(&mut self, token: &Token, has_expr: bool, diags: &mut DiagnosticReporter) {
        let FunctionState::InFunction { return_kind } = self.function else {
            return;
        };

        if return_kind.is_void() && has_expr {
            diags.add_at(
                Severity::Error,
                DiagnosticCode::RETURN_VALUE_IN_VOID,
                "'void' function must not return a value",
                token,
            );
        } else if !return_kind.is_void() && !has_expr {
            diags.add_at(
                Severity::Error,
                DiagnosticCode::RETURN_WITHOUT_VALUE,
                "non-void function must return a value",
                token,
            );
        }
    }
}
