//! Identifier trie and spelling suggestions

pub mod fuzzy;
pub mod trie;

pub use fuzzy::{FuzzySearch, PrefixIndex, SearchResult, DEFAULT_MAX_STATES};
pub use trie::{IdentifierTrie, TrieNode, MAX_WORD_LEN};
