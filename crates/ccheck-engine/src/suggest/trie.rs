//! Case-insensitive prefix tree of identifier names.
//!
//! Keys are ASCII-lowercased; each terminal node remembers the casing of
//! the first insertion so suggestions are shown the way the user wrote them.

use std::collections::BTreeMap;

use super::fuzzy::{FuzzySearch, PrefixIndex};

/// Longest word, in bytes, the trie stores. Each character is one level of
/// nesting, so longer names are refused.
pub const MAX_WORD_LEN: usize = 255;

/// One node of the trie. Children are owned; there are no back edges.
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    word: Option<String>,
}

impl TrieNode {
    pub fn child(&self, c: char) -> Option<&TrieNode> {
        self.children.get(&c)
    }

    /// Children in key order.
    pub fn children(&self) -> impl Iterator<Item = (char, &TrieNode)> {
        self.children.iter().map(|(c, node)| (*c, node))
    }

    /// True when a stored word ends here.
    pub fn is_terminal(&self) -> bool {
        self.word.is_some()
    }

    /// Display form of the word ending here.
    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    /// Depth-first collection: the node itself first, then children in key order.
    fn collect(&self, out: &mut Vec<String>, limit: usize) {
        if out.len() >= limit {
            return;
        }
        if let Some(word) = &self.word {
            out.push(word.clone());
        }
        for child in self.children.values() {
            if out.len() >= limit {
                return;
            }
            child.collect(out, limit);
        }
    }
}

/// Prefix tree used for completion and spelling suggestions.
#[derive(Debug, Clone, Default)]
pub struct IdentifierTrie {
    root: TrieNode,
    len: usize,
}

impl IdentifierTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `word`. Returns false if it was already present (in any casing),
    /// empty or longer than [`MAX_WORD_LEN`]; the stored display casing is
    /// left untouched in that case.
    pub fn insert(&mut self, word: &str) -> bool {
        if word.is_empty() || word.len() > MAX_WORD_LEN {
            return false;
        }

        let mut node = &mut self.root;
        for c in word.chars() {
            node = node.children.entry(c.to_ascii_lowercase()).or_default();
        }

        if node.word.is_some() {
            return false;
        }
        node.word = Some(word.to_string());
        self.len += 1;
        true
    }

    /// Case-insensitive membership test.
    pub fn search(&self, word: &str) -> bool {
        self.node_for(word).is_some_and(TrieNode::is_terminal)
    }

    /// Up to `limit` stored words starting with `prefix` (case-insensitive).
    ///
    /// An empty prefix matches nothing.
    pub fn find_words_with_prefix(&self, prefix: &str, limit: usize) -> Vec<String> {
        let mut out = Vec::new();
        if prefix.is_empty() || limit == 0 {
            return out;
        }
        if let Some(node) = self.node_for(prefix) {
            node.collect(&mut out, limit);
        }
        out
    }

    /// Ranked approximate matches for `word`, at most `max_suggestions`.
    pub fn find_similar_words(&self, word: &str, max_suggestions: usize) -> Vec<String> {
        FuzzySearch::default()
            .search(self, word, max_suggestions)
            .suggestions
    }

    /// Every stored word, in key order.
    pub fn all_words(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.len);
        self.root.collect(&mut out, usize::MAX);
        out
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn node_for(&self, key: &str) -> Option<&TrieNode> {
        key.chars()
            .try_fold(&self.root, |node, c| node.child(c.to_ascii_lowercase()))
    }
}

impl PrefixIndex for IdentifierTrie {
    fn root(&self) -> &TrieNode {
        &self.root
    }

    fn words_with_prefix(&self, prefix: &str, limit: usize) -> Vec<String> {
        self.find_words_with_prefix(prefix, limit)
    }
}

impl<S: AsRef<str>> FromIterator<S> for IdentifierTrie {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut trie = IdentifierTrie::new();
        for word in iter {
            trie.insert(word.as_ref());
        }
        trie
    }
}
