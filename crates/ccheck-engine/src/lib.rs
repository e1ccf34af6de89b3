//! Single-pass checker for a simplified C dialect.
//!
//! Source text is tokenized, then parsed in one left-to-right pass that
//! drives scoped name resolution as it goes. Every problem becomes a
//! [`DiagnosticItem`]; nothing aborts, so any finite input yields a complete
//! diagnostic list. Unresolved names get spelling suggestions from a trie
//! searched with a bounded A*.

pub mod analysis;
pub mod config;
pub mod diagnostic;
pub mod parser;
pub mod suggest;

pub use analysis::{CheckReport, Checker};
pub use config::{CheckConfig, ConfigError, SuggestionConfig, SuggestionScope};
pub use diagnostic::{DiagnosticCode, DiagnosticItem, DiagnosticReporter, Severity};
pub use parser::{ParseSummary, SemanticAnalyzer};
pub use suggest::IdentifierTrie;
