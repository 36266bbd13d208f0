//! Weighted fuzzy matching over employer text fields.
//!
//! Matching is abstracted behind the [`FuzzyIndex`] trait so the matching
//! algorithm (edit distance here, n-gram or trigram elsewhere) can be
//! swapped without touching the engine's filtering and suggestion logic.
//! The shipped implementation, [`WeightedLevenshteinIndex`], scores each
//! record field against the query and combines fields by weight, with the
//! display name dominating.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::employer::Employer;
use crate::search::levenshtein::distance_within;

/// Which employer field a fuzzy match hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchedField {
    Name,
    Sector,
    Region,
}

/// Configuration for fuzzy matching behavior.
#[derive(Debug, Clone)]
pub struct FuzzyConfig {
    /// Match tolerance on a 0-1 scale: 0 accepts exact matches only,
    /// 1 matches almost anything.
    pub threshold: f64,
    /// Queries shorter than this (in characters, after trimming) yield no
    /// fuzzy matches.
    pub min_term_length: usize,
    /// Relative weight of the display name.
    pub name_weight: f64,
    /// Relative weight of the sector field.
    pub sector_weight: f64,
    /// Relative weight of the region field.
    pub region_weight: f64,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        FuzzyConfig {
            threshold: 0.4,
            min_term_length: 2,
            name_weight: 0.7,
            sector_weight: 0.2,
            region_weight: 0.1,
        }
    }
}

/// A single fuzzy match against the indexed collection.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyHit {
    /// Position of the matched record in the collection snapshot.
    pub index: usize,
    /// Match score: 0 is an exact match, higher is worse. Always within
    /// `[0, threshold]` for hits that are returned.
    pub score: f64,
    /// Which fields matched, in name/sector/region order.
    pub matched_fields: Vec<MatchedField>,
}

/// Fuzzy text matching over a fixed collection snapshot.
///
/// Implementations are built once per snapshot; queries are read-only.
pub trait FuzzyIndex {
    /// Return all records matching `term`, ranked ascending by score
    /// (best match first), ties in collection order.
    fn search(&self, term: &str) -> Vec<FuzzyHit>;
}

/// Normalized text of one indexed field: the whole field plus its words.
#[derive(Debug, Clone)]
struct FieldText {
    full: String,
    words: Vec<String>,
}

impl FieldText {
    fn new(raw: &str) -> Self {
        FieldText {
            full: raw.to_lowercase(),
            words: raw.unicode_words().map(|w| w.to_lowercase()).collect(),
        }
    }
}

/// Edit-distance based [`FuzzyIndex`] with weighted field combination.
#[derive(Debug)]
pub struct WeightedLevenshteinIndex {
    entries: Vec<[FieldText; 3]>,
    config: FuzzyConfig,
}

impl WeightedLevenshteinIndex {
    /// Index a collection snapshot with the default configuration.
    pub fn new(employers: &[Employer]) -> Self {
        Self::with_config(employers, FuzzyConfig::default())
    }

    /// Index a collection snapshot with an explicit configuration.
    pub fn with_config(employers: &[Employer], config: FuzzyConfig) -> Self {
        let entries = employers
            .iter()
            .map(|employer| {
                [
                    FieldText::new(&employer.name),
                    FieldText::new(&employer.sector),
                    FieldText::new(&employer.region),
                ]
            })
            .collect();

        WeightedLevenshteinIndex { entries, config }
    }

    /// Get the active configuration.
    pub fn config(&self) -> &FuzzyConfig {
        &self.config
    }

    /// Score one candidate string against the query. `None` when the
    /// candidate is outside the tolerance.
    fn candidate_score(&self, term: &str, candidate: &str) -> Option<f64> {
        let term_len = term.chars().count();
        let candidate_len = candidate.chars().count();

        let score = if candidate == term {
            0.0
        } else if candidate.contains(term) {
            // Substring containment is a near-exact match; the residual
            // length keeps longer candidates slightly behind shorter ones.
            0.1 * (1.0 - term_len as f64 / candidate_len as f64)
        } else {
            let span = term_len.max(candidate_len);
            let max_edits = (self.config.threshold * span as f64).floor() as usize;
            let edits = distance_within(term, candidate, max_edits)?;
            edits as f64 / span as f64
        };

        (score <= self.config.threshold).then_some(score)
    }

    /// Best score of the query against one field, over the whole field
    /// text and each of its words.
    fn field_score(&self, term: &str, field: &FieldText) -> Option<f64> {
        let mut best: Option<f64> = None;
        for candidate in std::iter::once(&field.full).chain(field.words.iter()) {
            if let Some(score) = self.candidate_score(term, candidate) {
                best = Some(match best {
                    Some(current) if current <= score => current,
                    _ => score,
                });
            }
        }
        best
    }
}

const FIELD_ORDER: [MatchedField; 3] =
    [MatchedField::Name, MatchedField::Sector, MatchedField::Region];

impl FuzzyIndex for WeightedLevenshteinIndex {
    fn search(&self, term: &str) -> Vec<FuzzyHit> {
        let term = term.trim().to_lowercase();
        if term.chars().count() < self.config.min_term_length {
            return Vec::new();
        }

        let weights = [
            self.config.name_weight,
            self.config.sector_weight,
            self.config.region_weight,
        ];

        let mut hits = Vec::new();
        for (index, entry) in self.entries.iter().enumerate() {
            let mut matched_fields = Vec::new();
            let mut weighted_sum = 0.0;
            let mut weight_total = 0.0;

            for ((field, label), weight) in entry.iter().zip(FIELD_ORDER).zip(weights) {
                if let Some(score) = self.field_score(&term, field) {
                    matched_fields.push(label);
                    weighted_sum += weight * score;
                    weight_total += weight;
                }
            }

            if !matched_fields.is_empty() && weight_total > 0.0 {
                hits.push(FuzzyHit {
                    index,
                    score: weighted_sum / weight_total,
                    matched_fields,
                });
            }
        }

        // Stable sort keeps collection order for equal scores.
        hits.sort_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits
    }
}
