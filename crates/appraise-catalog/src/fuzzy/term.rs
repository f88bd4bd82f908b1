//! Whole-word backend built on Levenshtein automata.
//!
//! Every fuzzy term is compiled once per query into a DFA that accepts words within its
//! edit budget; entries are then scored word by word. Transpositions cost one edit.

use std::collections::HashMap;

use levenshtein_automata::{DFA, Distance, LevenshteinAutomatonBuilder};

use super::{Candidate, FuzzyIndex, FuzzyTuning, extended::ExtendedQuery, rank};

/// Largest edit distance a term may be given.
const MAX_DISTANCE: u8 = 2;

/// Word-level fuzzy index.
pub struct TermIndex {
    /// Indexed entries, lower-cased.
    entries: Vec<String>,
    /// Whitespace-separated words of each entry.
    words: Vec<Vec<String>>,
    /// One automaton builder per edit distance, `0..=MAX_DISTANCE`.
    builders: Vec<LevenshteinAutomatonBuilder>,
    /// Scoring bounds.
    tuning: FuzzyTuning,
}

impl TermIndex {
    /// Edit budget for a term: the threshold share of its length, capped at `MAX_DISTANCE`.
    fn budget(&self, term: &str) -> u8 {
        let allowed = (self.tuning.threshold * term.chars().count() as f64).floor();
        if allowed >= f64::from(MAX_DISTANCE) {
            MAX_DISTANCE
        } else if allowed > 0.0 {
            allowed as u8
        } else {
            0
        }
    }

    /// Compiles an automaton for every distinct fuzzy term.
    fn compile<'q>(&self, query: &'q ExtendedQuery) -> HashMap<&'q str, DFA> {
        let mut automata = HashMap::new();
        for term in query.fuzzy_terms() {
            automata.entry(term).or_insert_with(|| {
                self.builders[usize::from(self.budget(term))].build_dfa(term)
            });
        }
        automata
    }
}

impl FuzzyIndex for TermIndex {
    fn build(corpus: &[String], tuning: FuzzyTuning) -> Self {
        let entries: Vec<String> = corpus.iter().map(|e| e.to_lowercase()).collect();
        let words = entries
            .iter()
            .map(|e| e.split_whitespace().map(str::to_string).collect())
            .collect();
        let builders = (0..=MAX_DISTANCE)
            .map(|d| LevenshteinAutomatonBuilder::new(d, true))
            .collect();
        Self {
            entries,
            words,
            builders,
            tuning,
        }
    }

    fn query(&self, query: &str, limit: usize) -> Vec<Candidate> {
        let parsed = ExtendedQuery::parse(query, self.tuning.min_match_len);
        if parsed.is_empty() || limit == 0 {
            return Vec::new();
        }
        let automata = self.compile(&parsed);

        let threshold = self.tuning.threshold;
        let scored = self.entries.iter().enumerate().filter_map(|(position, entry)| {
            let words = &self.words[position];
            let score = parsed.score(entry, |term| {
                let dfa = automata.get(term)?;
                let best = words
                    .iter()
                    .filter_map(|word| match dfa.eval(word) {
                        Distance::Exact(d) => Some(d),
                        Distance::AtLeast(_) => None,
                    })
                    .min()?;
                Some(f64::from(best) / term.chars().count() as f64)
            })?;
            (score <= threshold).then_some((position, score, entry.chars().count()))
        });
        rank(scored, limit)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
