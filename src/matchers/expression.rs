//! Suffix-ambiguity-free multi-pattern streaming matcher
//!
//! The matcher is constructed with a set of named patterns and fed one symbol
//! at a time; it reports the pattern key at the exact symbol where a pattern
//! completes. No lookahead, no buffering by the caller.
//!
//! The construction rules make single-emission possible: patterns must be
//! non-empty, unique, and no pattern may be a suffix of another. With those
//! invariants, at most one pattern can complete on any symbol; two completing
//! at once indicates corrupted matcher state and panics.

use std::collections::HashMap;
use std::hash::Hash;

/// Streaming matcher over an arbitrary symbol type.
///
/// Generic so the same engine serves character streams and token-kind
/// streams.
#[derive(Debug, Clone)]
pub struct ExpressionMatcher<K, S> {
    patterns: Vec<(K, Vec<S>)>,
    /// One progress list per pattern: how many symbols of it are matched so
    /// far, for each active partial match.
    progresses: Vec<Vec<usize>>,
    max_len: usize,
}

impl<K, S> ExpressionMatcher<K, S>
where
    K: Clone + Eq + Hash + std::fmt::Debug,
    S: PartialEq + Clone,
{
    /// Build a matcher from a key → pattern mapping.
    ///
    /// Panics when a pattern is empty, duplicated, or a suffix of another
    /// pattern; those break the one-emission-per-symbol guarantee.
    pub fn new(expressions: HashMap<K, Vec<S>>) -> Self {
        let patterns: Vec<(K, Vec<S>)> = expressions.into_iter().collect();
        for (key, pattern) in &patterns {
            assert!(!pattern.is_empty(), "pattern for {key:?} is empty");
        }
        for (i, (key_a, a)) in patterns.iter().enumerate() {
            for (key_b, b) in patterns.iter().skip(i + 1) {
                assert!(
                    !is_suffix(a, b) && !is_suffix(b, a),
                    "pattern for {key_a:?} and pattern for {key_b:?} overlap as suffixes"
                );
            }
        }
        let max_len = patterns.iter().map(|(_, p)| p.len()).max().unwrap_or(0);
        let progresses = vec![Vec::new(); patterns.len()];
        Self {
            patterns,
            progresses,
            max_len,
        }
    }

    /// Feed one symbol; returns the key of the pattern that completed on it,
    /// if any.
    pub fn next(&mut self, symbol: &S) -> Option<K> {
        let mut completed: Option<K> = None;
        for (slot, (key, pattern)) in self.patterns.iter().enumerate() {
            let progresses = &mut self.progresses[slot];
            // A fresh partial match starts at every symbol.
            progresses.push(0);
            let mut kept = Vec::with_capacity(progresses.len());
            for &progress in progresses.iter() {
                if pattern[progress] != *symbol {
                    continue;
                }
                if progress + 1 == pattern.len() {
                    assert!(
                        completed.is_none(),
                        "two patterns completed on the same symbol; suffix-freedom violated"
                    );
                    completed = Some(key.clone());
                } else {
                    kept.push(progress + 1);
                }
            }
            *progresses = kept;
        }
        completed
    }

    pub fn reset(&mut self) {
        for progresses in &mut self.progresses {
            progresses.clear();
        }
    }

    /// Length of the longest configured pattern.
    pub fn max_pattern_len(&self) -> usize {
        self.max_len
    }
}

/// Whether `a` is a (non-strict) suffix of `b` or equal to it.
fn is_suffix<S: PartialEq>(a: &[S], b: &[S]) -> bool {
    if a.len() > b.len() {
        return false;
    }
    b[b.len() - a.len()..] == *a
}

/// Convenience alias for the common string-pattern case.
pub type StringExpressionMatcher<K> = ExpressionMatcher<K, char>;

/// Build a char matcher from `&str` patterns.
pub fn string_matcher<K>(expressions: HashMap<K, &str>) -> StringExpressionMatcher<K>
where
    K: Clone + Eq + Hash + std::fmt::Debug,
{
    ExpressionMatcher::new(
        expressions
            .into_iter()
            .map(|(key, pattern)| (key, pattern.chars().collect()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(pairs: &[(&'static str, &'static str)]) -> StringExpressionMatcher<&'static str> {
        string_matcher(pairs.iter().cloned().collect())
    }

    fn feed(m: &mut StringExpressionMatcher<&'static str>, input: &str) -> Vec<&'static str> {
        input.chars().filter_map(|ch| m.next(&ch)).collect()
    }

    #[test]
    fn test_single_pattern_emits_once_per_occurrence() {
        let mut m = matcher(&[("open", "/*")]);
        assert_eq!(feed(&mut m, "a /* b /* c"), vec!["open", "open"]);
    }

    #[test]
    fn test_multiple_patterns() {
        let mut m = matcher(&[("line", "//"), ("open", "/*"), ("close", "*/")]);
        assert_eq!(feed(&mut m, "x /* y */ z // w"), vec!["open", "close", "line"]);
    }

    #[test]
    fn test_emission_happens_at_completing_symbol() {
        let mut m = matcher(&[("arrow", "=>")]);
        assert_eq!(m.next(&'='), None);
        assert_eq!(m.next(&'>'), Some("arrow"));
        assert_eq!(m.next(&'>'), None);
    }

    #[test]
    fn test_overlapping_completions_all_reported() {
        // Partial matches run in parallel, so "aaa" completes "aa" at the
        // second and again at the third symbol.
        let mut m = matcher(&[("double", "aa")]);
        assert_eq!(feed(&mut m, "aaa"), vec!["double", "double"]);
    }

    #[test]
    fn test_reset_discards_progress() {
        let mut m = matcher(&[("arrow", "=>")]);
        assert_eq!(m.next(&'='), None);
        m.reset();
        assert_eq!(m.next(&'>'), None);
    }

    #[test]
    fn test_max_pattern_len() {
        let m = matcher(&[("a", "xy"), ("b", "longer")]);
        assert_eq!(m.max_pattern_len(), 6);
    }

    #[test]
    #[should_panic(expected = "empty")]
    fn test_empty_pattern_panics() {
        matcher(&[("bad", "")]);
    }

    #[test]
    #[should_panic(expected = "suffix")]
    fn test_suffix_pattern_panics() {
        matcher(&[("a", "bar"), ("b", "foobar")]);
    }

    #[test]
    #[should_panic(expected = "suffix")]
    fn test_duplicate_pattern_panics() {
        // Equal patterns are suffixes of each other.
        matcher(&[("a", "xx"), ("b", "xx")]);
    }

    #[test]
    fn test_integer_symbols() {
        let mut m: ExpressionMatcher<&str, u8> =
            ExpressionMatcher::new([("pair", vec![1u8, 2u8])].into_iter().collect());
        assert_eq!(m.next(&1), None);
        assert_eq!(m.next(&2), Some("pair"));
        assert_eq!(m.next(&2), None);
    }
}
