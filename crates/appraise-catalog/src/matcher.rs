//! Resolving printed modifier lines to catalog definitions.

use serde::Serialize;
use tracing::debug;

use crate::{
    definition::ModifierDefinition, index::CatalogIndex, normalize::normalize,
    value::extract_value,
};

/// How a line was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// The normalized line equals a definition's normalized text.
    Exact,
    /// The best fuzzy candidate scored under the acceptance bound.
    Fuzzy,
}

/// A successful match against a specific index.
#[derive(Debug, Clone, PartialEq)]
pub struct StatMatch<'a> {
    /// Matched definition.
    pub definition: &'a ModifierDefinition,
    /// Match score; `0.0` for exact matches.
    pub score: f64,
    /// Exact or fuzzy.
    pub kind: MatchKind,
    /// The normalized line that was looked up.
    pub normalized: String,
}

/// A modifier id paired with the magnitude read from the line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// Marketplace stat id.
    pub modifier_id: String,
    /// First number on the printed line, `0.0` if none.
    pub magnitude: f64,
}

/// Stat matcher bound to one index snapshot.
#[derive(Debug, Clone, Copy)]
pub struct StatMatcher<'a> {
    /// Index to match against.
    index: &'a CatalogIndex,
}

impl<'a> StatMatcher<'a> {
    /// Creates a matcher over `index`.
    pub fn new(index: &'a CatalogIndex) -> Self {
        Self { index }
    }

    /// Finds the definition a printed modifier line refers to.
    ///
    /// An exact normalized match always wins. Otherwise the top fuzzy candidate is accepted
    /// only when its score is strictly below the acceptance bound. Lines that normalize to
    /// nothing never match.
    pub fn match_line(&self, raw: &str) -> Option<StatMatch<'a>> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return None;
        }

        if let Some(position) = self.index.lookup_exact(&normalized) {
            let definition = self.index.definition(position)?;
            debug!(line = raw, id = %definition.id, "exact modifier match");
            return Some(StatMatch {
                definition,
                score: 0.0,
                kind: MatchKind::Exact,
                normalized,
            });
        }

        let acceptance = self.index.settings().acceptance;
        let Some(best) = self.index.search(&normalized).into_iter().next() else {
            debug!(line = raw, key = %normalized, "no modifier candidates");
            return None;
        };
        if best.score >= acceptance {
            debug!(
                line = raw,
                score = best.score,
                acceptance,
                "best modifier candidate rejected"
            );
            return None;
        }

        let definition = self.index.definition(best.position)?;
        debug!(line = raw, id = %definition.id, score = best.score, "fuzzy modifier match");
        Some(StatMatch {
            definition,
            score: best.score,
            kind: MatchKind::Fuzzy,
            normalized,
        })
    }

    /// Matches a line and pairs the id with the line's magnitude.
    pub fn resolve(&self, raw: &str) -> Option<MatchResult> {
        self.match_line(raw).map(|m| MatchResult {
            modifier_id: m.definition.id.clone(),
            magnitude: extract_value(raw),
        })
    }
}

/// Resolves one printed modifier line against `index`.
pub fn resolve_line(raw: &str, index: &CatalogIndex) -> Option<MatchResult> {
    StatMatcher::new(index).resolve(raw)
}

#[cfg(test)]
mod tests {
    use appraise_config::{FuzzyBackend, MatcherSettings};

    use super::*;

    fn index_with(settings: &MatcherSettings) -> CatalogIndex {
        let defs = vec![
            ModifierDefinition::new("explicit.stat_strength", "# to Strength", "Explicit"),
            ModifierDefinition::new(
                "explicit.stat_strength_dex",
                "# to Strength and Dexterity",
                "Explicit",
            ),
            ModifierDefinition::new("explicit.stat_life", "# to maximum Life", "Explicit"),
            ModifierDefinition::new(
                "explicit.stat_phys",
                "Adds # to # Physical Damage to Attacks",
                "Explicit",
            ),
            ModifierDefinition::new("implicit.stat_strength", "# to Strength", "Implicit"),
        ];
        CatalogIndex::build(defs, settings).unwrap()
    }

    fn index() -> CatalogIndex {
        index_with(&MatcherSettings::default())
    }

    #[test]
    fn exact_match_uses_first_definition() {
        let index = index();
        let m = StatMatcher::new(&index).match_line("+30 to Strength").unwrap();
        assert_eq!(m.definition.id, "explicit.stat_strength");
        assert_eq!(m.kind, MatchKind::Exact);
        assert_eq!(m.score, 0.0);
        assert_eq!(m.normalized, "# to strength");
    }

    #[test]
    fn exact_beats_better_ranked_fuzzy() {
        let defs = vec![
            ModifierDefinition::new("explicit.short", "to Fire Damage", "Explicit"),
            ModifierDefinition::new("explicit.fire", "Adds # to # Fire Damage", "Explicit"),
        ];
        let index = CatalogIndex::build(defs, &MatcherSettings::default()).unwrap();
        assert_eq!(index.search("# to # fire damage")[0].position, 0);

        let m = StatMatcher::new(&index)
            .match_line("Adds 3 to 7 Fire Damage")
            .unwrap();
        assert_eq!(m.kind, MatchKind::Exact);
        assert_eq!(m.definition.id, "explicit.fire");
    }

    #[test]
    fn fuzzy_match_under_acceptance() {
        let index = index();
        let m = StatMatcher::new(&index)
            .match_line("+45 to maximum Lief")
            .unwrap();
        assert_eq!(m.kind, MatchKind::Fuzzy);
        assert_eq!(m.definition.id, "explicit.stat_life");
        assert!(m.score > 0.0 && m.score < 0.8);
    }

    #[test]
    fn prefix_difference_still_matches() {
        let index = index();
        let m = StatMatcher::new(&index)
            .match_line("Adds 5 to 10 Physical Damage")
            .unwrap();
        assert_eq!(m.definition.id, "explicit.stat_phys");
    }

    #[test]
    fn acceptance_bound_is_strict() {
        // "lief" is one transposition from "life": 0.25 on that term, 0.125 on average.
        for (acceptance, accepted) in [(0.125, false), (0.13, true)] {
            let settings = MatcherSettings {
                acceptance,
                backend: FuzzyBackend::Term,
                ..MatcherSettings::default()
            };
            let index = index_with(&settings);
            let m = StatMatcher::new(&index).match_line("maximum Lief");
            assert_eq!(m.is_some(), accepted, "acceptance {acceptance}");
        }
    }

    #[test]
    fn unrelated_line_does_not_match() {
        let settings = MatcherSettings {
            threshold: 0.3,
            ..MatcherSettings::default()
        };
        let index = index_with(&settings);
        let matcher = StatMatcher::new(&index);
        assert!(matcher.match_line("Grants Summon Harbinger Skill").is_none());
        assert!(matcher.resolve("Corrupted").is_none());
    }

    #[test]
    fn empty_lines_never_match() {
        let index = index();
        let matcher = StatMatcher::new(&index);
        assert!(matcher.match_line("").is_none());
        assert!(matcher.match_line("   ").is_none());
        assert!(matcher.match_line("[|]").is_none());
    }

    #[test]
    fn resolve_carries_magnitude() {
        let index = index();
        assert_eq!(
            resolve_line("+30 to Strength", &index),
            Some(MatchResult {
                modifier_id: "explicit.stat_strength".into(),
                magnitude: 30.0,
            })
        );
        assert_eq!(resolve_line("", &index), None);
    }
}
