//! Fuzzy lookup over normalized catalog keys.
//!
//! Backends implement [`FuzzyIndex`]. Both share the [`extended`] query syntax and the same
//! score scale: `0.0` is a perfect match, `1.0` is unrelated, and nothing worse than the
//! configured threshold is returned.

pub mod extended;
mod substring;
mod term;

use appraise_config::{FuzzyBackend, MatcherSettings};

pub use self::{substring::SubstringIndex, term::TermIndex};

/// A catalog entry returned by a fuzzy query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Position of the entry in the indexed corpus.
    pub position: usize,
    /// Match score; lower is closer.
    pub score: f64,
}

/// Tuning shared by all backends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyTuning {
    /// Worst score a candidate may have.
    pub threshold: f64,
    /// Query terms shorter than this are ignored.
    pub min_match_len: usize,
}

impl Default for FuzzyTuning {
    fn default() -> Self {
        Self::from(&MatcherSettings::default())
    }
}

impl From<&MatcherSettings> for FuzzyTuning {
    fn from(settings: &MatcherSettings) -> Self {
        Self {
            threshold: settings.threshold,
            min_match_len: settings.min_match_len,
        }
    }
}

/// A searchable fuzzy index over a fixed corpus of strings.
pub trait FuzzyIndex: Send + Sync {
    /// Indexes `corpus`. Candidate positions refer to this slice.
    fn build(corpus: &[String], tuning: FuzzyTuning) -> Self
    where
        Self: Sized;

    /// Returns at most `limit` candidates for `query`, best first.
    fn query(&self, query: &str, limit: usize) -> Vec<Candidate>;

    /// Number of indexed entries.
    fn len(&self) -> usize;

    /// True when nothing is indexed.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds the configured backend.
pub fn build_index(
    backend: FuzzyBackend,
    corpus: &[String],
    tuning: FuzzyTuning,
) -> Box<dyn FuzzyIndex> {
    match backend {
        FuzzyBackend::Substring => Box::new(SubstringIndex::build(corpus, tuning)),
        FuzzyBackend::Term => Box::new(TermIndex::build(corpus, tuning)),
    }
}

/// Sorts scored entries best first and keeps the top `limit`.
///
/// Ties go to the shorter entry, then to the earlier one. `scored` yields
/// `(position, score, entry length)`.
fn rank(scored: impl Iterator<Item = (usize, f64, usize)>, limit: usize) -> Vec<Candidate> {
    let mut hits: Vec<_> = scored.collect();
    hits.sort_by(|a, b| {
        a.1.total_cmp(&b.1)
            .then(a.2.cmp(&b.2))
            .then(a.0.cmp(&b.0))
    });
    hits.truncate(limit);
    hits.into_iter()
        .map(|(position, score, _)| Candidate { position, score })
        .collect()
}
