//! In-memory search engine over an employer collection snapshot.

use ahash::AHashSet;

use crate::employer::Employer;
use crate::error::Result;
use crate::geo::GeoPoint;
use crate::search::filter::SearchFilter;
use crate::search::fuzzy::{FuzzyConfig, FuzzyIndex, MatchedField, WeightedLevenshteinIndex};

/// Default number of autocomplete suggestions.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Default geographic search radius in kilometers.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// A free-text search result.
#[derive(Debug)]
pub struct TextMatch<'a> {
    pub employer: &'a Employer,
    /// Fuzzy match score (0 = exact, lower is better), or `None` for the
    /// unscored listing a blank term produces.
    pub score: Option<f64>,
    pub matched_fields: Vec<MatchedField>,
}

/// Search engine combining fuzzy text matching, structured filtering,
/// suggestion extraction, and geographic radius search.
///
/// The engine is an explicit value built from a collection snapshot —
/// there is no shared global index. Build it once per snapshot and
/// rebuild whenever the collection changes; queries treat the snapshot
/// as immutable.
pub struct SearchEngine {
    employers: Vec<Employer>,
    config: FuzzyConfig,
    index: Box<dyn FuzzyIndex>,
}

impl SearchEngine {
    /// Index a collection snapshot with the default fuzzy configuration.
    pub fn new(employers: Vec<Employer>) -> Self {
        Self::with_config(employers, FuzzyConfig::default())
    }

    /// Index a collection snapshot with an explicit fuzzy configuration.
    pub fn with_config(employers: Vec<Employer>, config: FuzzyConfig) -> Self {
        let index = Box::new(WeightedLevenshteinIndex::with_config(
            &employers,
            config.clone(),
        ));
        SearchEngine {
            employers,
            config,
            index,
        }
    }

    /// Use a caller-provided fuzzy matcher instead of the default
    /// edit-distance index. The matcher must have been built over the
    /// same snapshot, in the same order.
    pub fn with_index(
        employers: Vec<Employer>,
        config: FuzzyConfig,
        index: Box<dyn FuzzyIndex>,
    ) -> Self {
        SearchEngine {
            employers,
            config,
            index,
        }
    }

    /// The indexed snapshot, in collection order.
    pub fn employers(&self) -> &[Employer] {
        &self.employers
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.employers.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.employers.is_empty()
    }

    /// Whether a term is long enough to drive fuzzy matching.
    fn is_searchable(&self, term: &str) -> bool {
        term.chars().count() >= self.config.min_term_length
    }

    /// Free-text search.
    ///
    /// A blank term — or one shorter than the minimum match length —
    /// returns every record unscored, in collection order. Otherwise
    /// records are ranked ascending by match score and annotated with the
    /// fields that matched.
    pub fn search_text(&self, term: &str) -> Vec<TextMatch<'_>> {
        let term = term.trim();
        if !self.is_searchable(term) {
            return self
                .employers
                .iter()
                .map(|employer| TextMatch {
                    employer,
                    score: None,
                    matched_fields: Vec::new(),
                })
                .collect();
        }

        self.index
            .search(term)
            .into_iter()
            .map(|hit| TextMatch {
                employer: &self.employers[hit.index],
                score: Some(hit.score),
                matched_fields: hit.matched_fields,
            })
            .collect()
    }

    /// Compound search: structured criteria, intersected with the fuzzy
    /// matches of `filter.term` when one is present.
    ///
    /// Results preserve collection order, except when a searchable term
    /// is present — then fuzzy rank order is preserved for the
    /// intersected subset.
    pub fn search_with_filter(&self, filter: &SearchFilter) -> Result<Vec<&Employer>> {
        filter.validate()?;

        let term = filter.term.as_deref().map(str::trim).unwrap_or("");
        if self.is_searchable(term) {
            Ok(self
                .index
                .search(term)
                .into_iter()
                .map(|hit| &self.employers[hit.index])
                .filter(|employer| filter.matches(employer))
                .collect())
        } else {
            Ok(self
                .employers
                .iter()
                .filter(|employer| filter.matches(employer))
                .collect())
        }
    }

    /// Autocomplete suggestions: distinct employer names drawn from the
    /// top `2 * limit` fuzzy matches, first-seen order, truncated to
    /// `limit`.
    ///
    /// The over-fetch matters: duplicate names collapse during
    /// deduplication, and a pool of exactly `limit` raw matches could
    /// yield fewer usable suggestions than the collection holds.
    pub fn suggest(&self, term: &str, limit: usize) -> Vec<String> {
        let term = term.trim();
        if !self.is_searchable(term) {
            return Vec::new();
        }

        let mut seen = AHashSet::new();
        let mut names = Vec::new();
        for hit in self.index.search(term).into_iter().take(limit * 2) {
            let name = &self.employers[hit.index].name;
            if seen.insert(name.clone()) {
                names.push(name.clone());
            }
        }
        names.truncate(limit);
        names
    }

    /// Geographic radius search: every record whose great-circle distance
    /// to the query point is at most `radius_km` (inclusive), in
    /// collection order.
    ///
    /// Callers needing nearest-first ordering sort the result by the same
    /// distance function.
    pub fn search_near(&self, lat: f64, lng: f64, radius_km: f64) -> Vec<&Employer> {
        let center = GeoPoint::new(lat, lng);
        self.employers
            .iter()
            .filter(|employer| employer.coordinates.distance_km(&center) <= radius_km)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn engine() -> SearchEngine {
        SearchEngine::new(fixtures::demo_employers())
    }

    #[test]
    fn test_blank_term_returns_all_unscored_in_order() {
        let engine = engine();
        let results = engine.search_text("");

        assert_eq!(results.len(), engine.len());
        for (result, employer) in results.iter().zip(engine.employers()) {
            assert_eq!(result.employer.id, employer.id);
            assert!(result.score.is_none());
            assert!(result.matched_fields.is_empty());
        }
    }

    #[test]
    fn test_single_char_term_behaves_like_blank() {
        let engine = engine();
        let blank: Vec<_> = engine.search_text("").iter().map(|m| m.employer.id.clone()).collect();
        let single: Vec<_> = engine.search_text("x").iter().map(|m| m.employer.id.clone()).collect();
        assert_eq!(blank, single);
        assert!(engine.search_text("x").iter().all(|m| m.score.is_none()));
    }

    #[test]
    fn test_scored_results_are_ranked() {
        let engine = engine();
        let results = engine.search_text("commerce");
        assert!(!results.is_empty());

        let scores: Vec<f64> = results.iter().map(|m| m.score.unwrap()).collect();
        for pair in scores.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_suggestions_respect_limit_and_minimum_length() {
        let engine = engine();
        assert!(engine.suggest("c", DEFAULT_SUGGESTION_LIMIT).is_empty());
        assert!(engine.suggest("   ", DEFAULT_SUGGESTION_LIMIT).is_empty());

        let suggestions = engine.suggest("commerce", 2);
        assert!(suggestions.len() <= 2);
    }

    #[test]
    fn test_radius_search_includes_boundary() {
        let engine = engine();
        let all = engine.search_near(5.3600, -4.0083, 40_075.0);
        assert_eq!(all.len(), engine.len());

        let none = engine.search_near(5.3600, -4.0083, -1.0);
        assert!(none.is_empty());
    }
}
