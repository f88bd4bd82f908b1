//! Approximate substring backend.
//!
//! Each fuzzy term is located anywhere inside an entry with Sellers' variant of the edit
//! distance table: the first row is all zeros, so an alignment may start at any text
//! position, and the best value in the last row lets it end anywhere. A term's score is
//! that distance divided by the term length.

use std::mem;

use super::{Candidate, FuzzyIndex, FuzzyTuning, extended::ExtendedQuery, rank};

/// Location-independent fuzzy index.
#[derive(Debug, Clone)]
pub struct SubstringIndex {
    /// Indexed entries, lower-cased.
    entries: Vec<String>,
    /// Entries as characters, for the distance table.
    chars: Vec<Vec<char>>,
    /// Scoring bounds.
    tuning: FuzzyTuning,
}

impl FuzzyIndex for SubstringIndex {
    fn build(corpus: &[String], tuning: FuzzyTuning) -> Self {
        let entries: Vec<String> = corpus.iter().map(|e| e.to_lowercase()).collect();
        let chars = entries.iter().map(|e| e.chars().collect()).collect();
        Self {
            entries,
            chars,
            tuning,
        }
    }

    fn query(&self, query: &str, limit: usize) -> Vec<Candidate> {
        let parsed = ExtendedQuery::parse(query, self.tuning.min_match_len);
        if parsed.is_empty() || limit == 0 {
            return Vec::new();
        }
        let terms: Vec<(&str, Vec<char>)> = parsed
            .fuzzy_terms()
            .map(|t| (t, t.chars().collect()))
            .collect();

        let threshold = self.tuning.threshold;
        let scored = self.entries.iter().enumerate().filter_map(|(position, entry)| {
            let text = &self.chars[position];
            let score = parsed.score(entry, |term| {
                let pattern = terms
                    .iter()
                    .find(|(t, _)| *t == term)
                    .map(|(_, p)| p.as_slice())?;
                let score = substring_distance(pattern, text) as f64 / pattern.len() as f64;
                (score <= threshold).then_some(score)
            })?;
            (score <= threshold).then_some((position, score, text.len()))
        });
        rank(scored, limit)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Fewest edits needed to turn `pattern` into some substring of `text`.
fn substring_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut cur = vec![0; m + 1];
    let mut best = m;

    for &c in text {
        cur[0] = 0;
        for i in 1..=m {
            let substitution = prev[i - 1] + usize::from(pattern[i - 1] != c);
            cur[i] = substitution.min(prev[i] + 1).min(cur[i - 1] + 1);
        }
        best = best.min(cur[m]);
        mem::swap(&mut prev, &mut cur);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(pattern: &str, text: &str) -> usize {
        let p: Vec<char> = pattern.chars().collect();
        let t: Vec<char> = text.chars().collect();
        substring_distance(&p, &t)
    }

    fn index(entries: &[&str]) -> SubstringIndex {
        let corpus: Vec<String> = entries.iter().map(|e| e.to_string()).collect();
        SubstringIndex::build(&corpus, FuzzyTuning::default())
    }

    #[test]
    fn distance_finds_substrings() {
        assert_eq!(distance("life", "# to maximum life"), 0);
        assert_eq!(distance("lfie", "# to maximum life"), 2);
        assert_eq!(distance("strenght", "# to strength"), 1);
        assert_eq!(distance("abc", ""), 3);
    }

    #[test]
    fn location_does_not_matter() {
        let idx = index(&["maximum life", "life regeneration rate"]);
        let hits = idx.query("life", 5);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.score == 0.0));
        assert_eq!(hits[0].position, 0);
    }

    #[test]
    fn scores_are_averaged_over_terms() {
        let idx = index(&["# to maximum mana"]);
        let hits = idx.query("maximum mona", 5);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].score - 0.125).abs() < 1e-9);
    }

    #[test]
    fn threshold_rejects_distant_terms() {
        let corpus = vec!["# to strength".to_string()];
        let strict = SubstringIndex::build(
            &corpus,
            FuzzyTuning {
                threshold: 0.1,
                min_match_len: 2,
            },
        );
        assert!(strict.query("strenght", 5).is_empty());
        assert_eq!(strict.query("strength", 5).len(), 1);
    }

    #[test]
    fn operators_filter_candidates() {
        let idx = index(&["# to fire resistance", "# to cold resistance"]);
        let hits = idx.query("resistance !fire", 5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].position, 1);

        // `^#` is shorter than the minimum match length and is dropped.
        let hits = idx.query("^# 'cold", 5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].position, 1);
    }

    #[test]
    fn query_is_case_insensitive() {
        let idx = index(&["# To Strength"]);
        assert_eq!(idx.query("STRENGTH", 5).len(), 1);
    }
}
