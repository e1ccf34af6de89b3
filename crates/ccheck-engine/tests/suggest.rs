//! Trie lookups and bounded fuzzy search.

use ccheck_engine::suggest::{FuzzySearch, IdentifierTrie, DEFAULT_MAX_STATES};

const WORDS: &[&str] = &[
    "count", "counter", "Counted", "index", "idx", "printf", "sprintf", "value", "values", "MAX_SIZE",
    "total", "temp", "tmp", "result", "main",
];

fn trie() -> IdentifierTrie {
    WORDS.iter().collect()
}

#[test]
fn test_round_trip() {
    let trie = trie();
    for word in WORDS {
        assert!(trie.search(word), "{} should be found", word);
        assert!(trie.search(&word.to_uppercase()));
    }
    assert_eq!(trie.len(), WORDS.len());
    assert!(!trie.search("coun"));
}

#[test]
fn test_prefix_results_share_prefix() {
    let trie = trie();
    for prefix in ["c", "COU", "val", "t", "ma", "x"] {
        for limit in [1, 2, 5, 100] {
            let found = trie.find_words_with_prefix(prefix, limit);
            assert!(found.len() <= limit);
            for word in &found {
                assert!(
                    word.to_lowercase().starts_with(&prefix.to_lowercase()),
                    "{} does not start with {}",
                    word,
                    prefix
                );
            }
        }
    }
}

#[test]
fn test_prefix_results_complete_under_limit() {
    let trie = trie();
    let mut found = trie.find_words_with_prefix("count", 100);
    found.sort();
    assert_eq!(found, vec!["Counted", "count", "counter"]);
}

#[test]
fn test_display_casing_preserved() {
    let trie = trie();
    assert_eq!(trie.find_words_with_prefix("max", 5), vec!["MAX_SIZE"]);
}

#[test]
fn test_exact_word_ranks_first() {
    let trie = trie();
    for word in WORDS {
        let found = trie.find_similar_words(word, 3);
        assert_eq!(found.first().map(String::as_str), Some(*word), "query {}", word);
    }
}

#[test]
fn test_typos_find_intended_word() {
    let trie = trie();
    let cases = [
        ("cuont", "count"),
        ("prnitf", "printf"),
        ("reslut", "result"),
        ("indx", "index"),
        ("totl", "total"),
        ("valeu", "value"),
    ];
    for (typo, expected) in cases {
        let found = trie.find_similar_words(typo, 3);
        assert!(
            found.iter().any(|w| w == expected),
            "{} should suggest {}, got {:?}",
            typo,
            expected,
            found
        );
    }
}

#[test]
fn test_unrelated_query_finds_nothing() {
    let trie = trie();
    assert!(trie.find_similar_words("zzzzzzzz", 3).is_empty());
    assert!(trie.find_similar_words("", 3).is_empty());
    assert!(trie.find_similar_words("count", 0).is_empty());
}

#[test]
fn test_results_never_exceed_requested() {
    let trie = trie();
    for query in ["cnt", "tep", "vlue", "x"] {
        for max in 1..4 {
            assert!(trie.find_similar_words(query, max).len() <= max);
        }
    }
}

#[test]
fn test_exploration_is_bounded() {
    // A dense trie: every two-letter word over a..t plus suffixes
    let mut trie = IdentifierTrie::new();
    for a in 'a'..='t' {
        for b in 'a'..='t' {
            trie.insert(&format!("{}{}", a, b));
            trie.insert(&format!("{}{}_value", a, b));
            trie.insert(&format!("{}{}_count", a, b));
        }
    }

    let search = FuzzySearch::default();
    for query in ["zz_valeu", "zzzzzzzzzzzzzzzz", "qq_cuont", "z"] {
        let result = search.search(&trie, query, 5);
        assert!(result.states_explored <= DEFAULT_MAX_STATES);
    }

    let tight = FuzzySearch::new(100);
    let result = tight.search(&trie, "zzzzzzzzzzzzzzzz", 5);
    assert!(result.states_explored <= 100);
}
