//! Search over the employer collection: weighted fuzzy text matching,
//! compound structured filtering, autocomplete suggestions, and
//! geographic radius search.

pub mod engine;
pub mod filter;
pub mod fuzzy;
pub mod levenshtein;

pub use self::engine::{DEFAULT_RADIUS_KM, DEFAULT_SUGGESTION_LIMIT, SearchEngine, TextMatch};
pub use self::filter::SearchFilter;
pub use self::fuzzy::{FuzzyConfig, FuzzyHit, FuzzyIndex, MatchedField, WeightedLevenshteinIndex};
