//! Extended query syntax shared by all fuzzy backends.
//!
//! A query is a list of OR groups separated by a standalone `|`. Each group is a list of
//! whitespace-separated terms that must all match. Terms are fuzzy unless marked:
//!
//! | Token     | Matches when the candidate          |
//! |-----------|-------------------------------------|
//! | `life`    | approximately contains `life`       |
//! | `=life`   | is exactly `life`                   |
//! | `'life`   | contains `life`                     |
//! | `^life`   | starts with `life`                  |
//! | `life$`   | ends with `life`                    |
//! | `!life`   | does not contain `life`             |
//! | `!^life`  | does not start with `life`          |
//! | `!life$`  | does not end with `life`            |
//!
//! Terms whose text is shorter than the minimum match length are dropped, so a bare `#`
//! placeholder never disqualifies a candidate.

use std::mem;

/// How a term is compared against a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
    /// Approximate match, scored by the backend.
    Fuzzy,
    /// Whole-text equality.
    Exact,
    /// Substring.
    Include,
    /// Leading text.
    Prefix,
    /// Trailing text.
    Suffix,
    /// Substring must be absent.
    Inverse,
    /// Leading text must differ.
    InversePrefix,
    /// Trailing text must differ.
    InverseSuffix,
}

/// One parsed query term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// Comparison mode.
    pub kind: TermKind,
    /// Lower-cased term text without its operator.
    pub text: String,
}

impl Term {
    /// Parses a single whitespace-free token.
    fn parse(token: &str) -> Self {
        let token = token.to_lowercase();
        let (kind, text) = if let Some(rest) = token.strip_prefix("!^") {
            (TermKind::InversePrefix, rest)
        } else if let Some(rest) = token.strip_prefix('!') {
            match rest.strip_suffix('$') {
                Some(body) if !body.is_empty() => (TermKind::InverseSuffix, body),
                _ => (TermKind::Inverse, rest),
            }
        } else if let Some(rest) = token.strip_prefix('^') {
            (TermKind::Prefix, rest)
        } else if let Some(rest) = token.strip_prefix('=') {
            (TermKind::Exact, rest)
        } else if let Some(rest) = token.strip_prefix('\'') {
            (TermKind::Include, rest)
        } else {
            match token.strip_suffix('$') {
                Some(body) if !body.is_empty() => (TermKind::Suffix, body),
                _ => (TermKind::Fuzzy, token.as_str()),
            }
        };
        Self {
            kind,
            text: text.to_string(),
        }
    }

    /// Scores an operator term. Fuzzy terms are scored by the backend instead.
    fn score_literal(&self, candidate: &str) -> Option<f64> {
        let text = self.text.as_str();
        let matched = match self.kind {
            TermKind::Fuzzy => return None,
            TermKind::Exact => candidate == text,
            TermKind::Include => candidate.contains(text),
            TermKind::Prefix => candidate.starts_with(text),
            TermKind::Suffix => candidate.ends_with(text),
            TermKind::Inverse => !candidate.contains(text),
            TermKind::InversePrefix => !candidate.starts_with(text),
            TermKind::InverseSuffix => !candidate.ends_with(text),
        };
        matched.then_some(0.0)
    }
}

/// A parsed extended query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedQuery {
    /// OR groups of AND terms. Never contains an empty group.
    groups: Vec<Vec<Term>>,
}

impl ExtendedQuery {
    /// Parses `query`, dropping terms shorter than `min_len` characters.
    pub fn parse(query: &str, min_len: usize) -> Self {
        let mut groups = Vec::new();
        let mut current = Vec::new();
        for token in query.split_whitespace() {
            if token == "|" {
                if !current.is_empty() {
                    groups.push(mem::take(&mut current));
                }
                continue;
            }
            let term = Term::parse(token);
            if !term.text.is_empty() && term.text.chars().count() >= min_len {
                current.push(term);
            }
        }
        if !current.is_empty() {
            groups.push(current);
        }
        Self { groups }
    }

    /// True when no term survived parsing; such a query matches nothing.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// OR groups, in query order.
    pub fn groups(&self) -> &[Vec<Term>] {
        &self.groups
    }

    /// Texts of every fuzzy term, for backends that precompile per-term state.
    pub fn fuzzy_terms(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flatten()
            .filter(|t| t.kind == TermKind::Fuzzy)
            .map(|t| t.text.as_str())
    }

    /// Scores a candidate: the best group's mean term score, or `None` if no group matches.
    ///
    /// `fuzzy` scores a fuzzy term's text against this candidate and returns `None` when the
    /// term is too far off.
    pub fn score(
        &self,
        candidate: &str,
        mut fuzzy: impl FnMut(&str) -> Option<f64>,
    ) -> Option<f64> {
        let mut best: Option<f64> = None;
        for group in &self.groups {
            let mut total = 0.0;
            let mut all_matched = true;
            for term in group {
                let score = match term.kind {
                    TermKind::Fuzzy => fuzzy(&term.text),
                    _ => term.score_literal(candidate),
                };
                match score {
                    Some(s) => total += s,
                    None => {
                        all_matched = false;
                        break;
                    }
                }
            }
            if all_matched {
                let mean = total / group.len() as f64;
                if best.is_none_or(|b| mean < b) {
                    best = Some(mean);
                }
            }
        }
        best
    }
}
