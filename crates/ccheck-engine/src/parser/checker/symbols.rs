//! Symbol table implementation for name resolution
//!
//! A stack of scope layers. Lookup walks from the innermost layer outwards,
//! so an inner declaration shadows an outer one. Popping a layer drops its
//! symbols; nothing handed out by the table outlives that.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::parser::token::{Keyword, Span, Token, TokenKind};
use crate::suggest::fuzzy::ranking_score;
use crate::suggest::{FuzzySearch, IdentifierTrie};

/// Declared type of a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Int,
    Long,
    Float,
    Double,
    Char,
    Void,
    /// Missing or unrecognised type, and library names
    Unknown,
}

impl TypeKind {
    pub fn from_keyword(kw: Keyword) -> TypeKind {
        match kw {
            Keyword::Int => TypeKind::Int,
            Keyword::Long => TypeKind::Long,
            Keyword::Float => TypeKind::Float,
            Keyword::Double => TypeKind::Double,
            Keyword::Char => TypeKind::Char,
            Keyword::Void => TypeKind::Void,
            _ => TypeKind::Unknown,
        }
    }

    pub fn is_void(self) -> bool {
        self == TypeKind::Void
    }
}

/// Symbol kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
}

/// Symbol information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub ty: TypeKind,
    /// Declaring token; synthetic (line 0) for library names
    pub token: Token,
}

impl Symbol {
    pub fn variable(ty: TypeKind, token: &Token) -> Self {
        Self {
            name: token.lexeme.clone(),
            kind: SymbolKind::Variable,
            ty,
            token: token.clone(),
        }
    }

    pub fn function(ret: TypeKind, token: &Token) -> Self {
        Self {
            kind: SymbolKind::Function,
            ..Self::variable(ret, token)
        }
    }

    /// A library function known only by name.
    pub fn library(name: &str) -> Self {
        let token = Token::new(TokenKind::Identifier, name, Span::new(0, 0, 0, 0));
        Self::function(TypeKind::Unknown, &token)
    }

    pub fn is_function(&self) -> bool {
        self.kind == SymbolKind::Function
    }
}

/// Error returned when a name is already bound in the innermost layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{name}' is already declared in this scope")]
pub struct DuplicateSymbolError {
    pub name: String,
    /// Location of the binding that was kept
    pub original: Span,
    /// Location of the rejected declaration
    pub duplicate: Span,
}

/// One frame of bindings, for a function body or a block.
#[derive(Debug, Clone, Default)]
pub struct ScopeLayer {
    symbols: FxHashMap<String, Symbol>,
    /// Names declared in this layer, kept only when scoped suggestions are on
    names: Option<IdentifierTrie>,
}

impl ScopeLayer {
    fn new(track_names: bool) -> Self {
        Self {
            symbols: FxHashMap::default(),
            names: track_names.then(IdentifierTrie::new),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn names(&self) -> Option<&IdentifierTrie> {
        self.names.as_ref()
    }

    fn insert(&mut self, symbol: Symbol) {
        if let Some(names) = &mut self.names {
            names.insert(&symbol.name);
        }
        self.symbols.insert(symbol.name.clone(), symbol);
    }
}

/// Symbol table with a scope stack
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    layers: Vec<ScopeLayer>,
    track_names: bool,
}

impl SymbolTable {
    /// Create an empty table; the first declaration opens a layer if none exists.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table whose layers also keep a trie of their own names.
    pub fn with_layer_tries() -> Self {
        Self {
            layers: Vec::new(),
            track_names: true,
        }
    }

    pub fn push_scope(&mut self) {
        self.layers.push(ScopeLayer::new(self.track_names));
    }

    /// Pop the innermost layer. Does nothing when the stack is empty.
    pub fn pop_scope(&mut self) {
        self.layers.pop();
    }

    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Layers from outermost to innermost.
    pub fn layers(&self) -> &[ScopeLayer] {
        &self.layers
    }

    /// Define a symbol in the innermost layer.
    ///
    /// Returns an error if the name is already bound in that layer; the
    /// existing symbol is kept.
    pub fn define(&mut self, symbol: Symbol) -> Result<(), DuplicateSymbolError> {
        if self.layers.is_empty() {
            self.push_scope();
        }
        let Some(layer) = self.layers.last_mut() else {
            return Ok(());
        };

        if let Some(existing) = layer.get(&symbol.name) {
            return Err(DuplicateSymbolError {
                name: symbol.name.clone(),
                original: existing.token.span,
                duplicate: symbol.token.span,
            });
        }

        layer.insert(symbol);
        Ok(())
    }

    /// Define a symbol in the outermost layer unless the name is already bound
    /// there. Returns true if it was added.
    pub fn define_global(&mut self, symbol: Symbol) -> bool {
        if self.layers.is_empty() {
            self.push_scope();
        }
        match self.layers.first_mut() {
            Some(global) if global.get(&symbol.name).is_none() => {
                global.insert(symbol);
                true
            }
            _ => false,
        }
    }

    /// Resolve a name, innermost layer first.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.layers.iter().rev().find_map(|layer| layer.get(name))
    }

    /// Approximate matches drawn from every layer's own trie, up to
    /// `per_layer` from each, merged and ranked best first.
    pub fn suggestions(&self, name: &str, per_layer: usize, search: &FuzzySearch) -> Vec<String> {
        let query: Vec<char> = name.chars().map(|c| c.to_ascii_lowercase()).collect();
        let mut ranked: Vec<(i64, String)> = self
            .layers
            .iter()
            .rev()
            .filter_map(ScopeLayer::names)
            .flat_map(|names| search.search(names, name, per_layer).suggestions)
            .map(|word| (ranking_score(&query, &word), word))
            .collect();
        ranked.sort();
        ranked.dedup_by(|a, b| a.1 == b.1);
        ranked.into_iter().map(|(_, word)| word).collect()
    }
}
