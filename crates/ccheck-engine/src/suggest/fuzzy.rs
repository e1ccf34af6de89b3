//! Bounded A* search for spelling suggestions.
//!
//! Spelling correction is treated as a shortest path problem over the trie:
//! each step either matches, substitutes, inserts or deletes one character,
//! and `h` is the number of query characters not yet consumed. An edit
//! budget derived from the query length prunes the frontier, and a hard cap
//! on popped states bounds the work for any query.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashSet;

use super::trie::TrieNode;

/// Default cap on explored states.
pub const DEFAULT_MAX_STATES: usize = 10_000;

/// Trie access needed by the search.
pub trait PrefixIndex {
    fn root(&self) -> &TrieNode;

    /// Up to `limit` words under `prefix`, used for the cheap exact-prefix path.
    fn words_with_prefix(&self, prefix: &str, limit: usize) -> Vec<String>;
}

/// Outcome of one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Best matches first
    pub suggestions: Vec<String>,
    /// Number of states popped from the queue
    pub states_explored: usize,
    /// True when the answer came from the exact-prefix path
    pub prefix_hit: bool,
}

/// Search parameters.
#[derive(Debug, Clone, Copy)]
pub struct FuzzySearch {
    max_states: usize,
}

impl Default for FuzzySearch {
    fn default() -> Self {
        Self {
            max_states: DEFAULT_MAX_STATES,
        }
    }
}

struct SearchState<'t> {
    node: &'t TrieNode,
    word: String,
    /// Characters in `word`
    len: usize,
    cursor: usize,
    g: usize,
    h: usize,
}

impl SearchState<'_> {
    fn f(&self) -> usize {
        self.g + self.h
    }
}

// Min-heap on f, ties to the shorter candidate.
impl Ord for SearchState<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f()
            .cmp(&self.f())
            .then_with(|| other.len.cmp(&self.len))
    }
}

impl PartialOrd for SearchState<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SearchState<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchState<'_> {}

impl FuzzySearch {
    pub fn new(max_states: usize) -> Self {
        Self {
            max_states: max_states.max(1),
        }
    }

    /// Up to `max_suggestions` ranked matches for `word` in `index`.
    pub fn search<I: PrefixIndex + ?Sized>(
        &self,
        index: &I,
        word: &str,
        max_suggestions: usize,
    ) -> SearchResult {
        if word.is_empty() || max_suggestions == 0 {
            return SearchResult::default();
        }

        let query = lowercase_chars(word);
        let normalized: String = query.iter().collect();

        let prefix_matches = index.words_with_prefix(&normalized, max_suggestions);
        if !prefix_matches.is_empty() {
            return SearchResult {
                suggestions: prefix_matches,
                states_explored: 0,
                prefix_hit: true,
            };
        }

        let budget = edit_budget(query.len());
        let max_len = query.len() + budget;

        let mut open = BinaryHeap::new();
        open.push(SearchState {
            node: index.root(),
            word: String::new(),
            len: 0,
            cursor: 0,
            g: 0,
            h: query.len(),
        });

        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut candidates: Vec<(i64, String)> = Vec::new();
        let mut worst_score = i64::MIN;
        let mut explored = 0;

        while explored < self.max_states {
            let Some(state) = open.pop() else {
                break;
            };
            explored += 1;

            if candidates.len() >= max_suggestions.saturating_mul(3)
                && (state.f() as i64) * 100 > worst_score + 5000
            {
                tracing::trace!(explored, candidates = candidates.len(), "fuzzy search early exit");
                break;
            }

            // The length gap alone already bounds the distance from below
            let in_reach = state.len.abs_diff(query.len()) <= budget;
            if let Some(display) = state.node.word().filter(|_| in_reach) {
                let distance = levenshtein(&query, &state.word);
                if distance <= budget && seen.insert(display.to_string()) {
                    let score = ranking_score(&query, &state.word);
                    worst_score = worst_score.max(score);
                    candidates.push((score, display.to_string()));
                }
            }

            if state.g > budget + 2 {
                continue;
            }

            let next_char = query.get(state.cursor).copied();

            // Match
            if let Some(c) = next_char {
                if let Some(child) = state.node.child(c) {
                    open.push(state.extend(child, c, 1, 0, query.len()));
                }
            }

            if state.g + 1 > budget {
                continue;
            }

            // Substitution
            if let Some(c) = next_char {
                for (key, child) in state.node.children().filter(|(key, _)| *key != c) {
                    open.push(state.extend(child, key, 1, 1, query.len()));
                }
            }

            // Insertion
            if state.len < max_len {
                for (key, child) in state.node.children() {
                    open.push(state.extend(child, key, 0, 1, query.len()));
                }
            }

            // Deletion
            if next_char.is_some() {
                open.push(SearchState {
                    node: state.node,
                    word: state.word.clone(),
                    len: state.len,
                    cursor: state.cursor + 1,
                    g: state.g + 1,
                    h: query.len() - state.cursor - 1,
                });
            }
        }

        tracing::trace!(
            query = word,
            explored,
            candidates = candidates.len(),
            "fuzzy search finished"
        );

        candidates.sort();
        SearchResult {
            suggestions: candidates
                .into_iter()
                .take(max_suggestions)
                .map(|(_, word)| word)
                .collect(),
            states_explored: explored,
            prefix_hit: false,
        }
    }
}

impl<'t> SearchState<'t> {
    fn extend(
        &self,
        node: &'t TrieNode,
        c: char,
        advance: usize,
        cost: usize,
        query_len: usize,
    ) -> SearchState<'t> {
        let mut word = self.word.clone();
        word.push(c);
        let cursor = self.cursor + advance;
        SearchState {
            node,
            word,
            len: self.len + 1,
            cursor,
            g: self.g + cost,
            h: query_len - cursor,
        }
    }
}

/// Maximum edit distance accepted for a query of `len` characters.
pub fn edit_budget(len: usize) -> usize {
    match len {
        0..=2 => 2,
        3..=4 => 3,
        _ => ((len + 1) / 2).max(3),
    }
}

/// Case-insensitive Levenshtein distance between the lowercased query and a
/// candidate.
pub fn levenshtein(query: &[char], candidate: &str) -> usize {
    edit_distance(query, &lowercase_chars(candidate))
}

fn lowercase_chars(s: &str) -> Vec<char> {
    s.chars().map(|c| c.to_ascii_lowercase()).collect()
}

fn edit_distance(a: &[char], b: &[char]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, &ac) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b.iter().enumerate() {
            curr[j + 1] = if ac == bc {
                prev[j]
            } else {
                1 + prev[j + 1].min(curr[j]).min(prev[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Lower is better.
///
/// A candidate that is a whole prefix of the query (or has the query as a
/// whole prefix) beats everything else; otherwise edit distance dominates,
/// with a bonus for a shared leading run and a small length penalty.
pub fn ranking_score(query: &[char], candidate: &str) -> i64 {
    let candidate = lowercase_chars(candidate);
    let shared = query
        .iter()
        .zip(&candidate)
        .take_while(|(a, b)| a == b)
        .count();
    let length_diff = query.len().abs_diff(candidate.len()) as i64;

    if shared == query.len() || shared == candidate.len() {
        return -10_000 + length_diff;
    }

    let distance = edit_distance(query, &candidate) as i64;
    distance * 100 - shared as i64 * 300 + length_diff * 10
}
