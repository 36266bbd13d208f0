//! Structured filter criteria for compound employer queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::employer::{Employer, EmployerStatus};
use crate::error::{Result, VigieError};
use crate::risk::RiskLevel;

/// Compound filter over an employer collection.
///
/// Every present criterion narrows the result set (logical AND); an
/// absent or empty criterion imposes no constraint. Array criteria match
/// when the record's field is a member of the supplied set (logical OR
/// within the array). All bounds are inclusive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Free-text term, applied through the fuzzy index.
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub sectors: Vec<String>,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub statuses: Vec<EmployerStatus>,
    #[serde(default)]
    pub risk_levels: Vec<RiskLevel>,
    /// Inclusive lower bound on `risk_score`.
    #[serde(default)]
    pub score_min: Option<f64>,
    /// Inclusive upper bound on `risk_score`.
    #[serde(default)]
    pub score_max: Option<f64>,
    /// Inclusive lower bound on `updated_at`.
    #[serde(default)]
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `updated_at`.
    #[serde(default)]
    pub date_to: Option<DateTime<Utc>>,
}

impl SearchFilter {
    /// Create an empty filter that matches every record.
    pub fn new() -> Self {
        SearchFilter::default()
    }

    /// Set the free-text term.
    pub fn term<S: Into<String>>(mut self, term: S) -> Self {
        self.term = Some(term.into());
        self
    }

    /// Restrict to the given sectors.
    pub fn sectors<I, S>(mut self, sectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sectors = sectors.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict to the given regions.
    pub fn regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = regions.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict to the given statuses.
    pub fn statuses<I: IntoIterator<Item = EmployerStatus>>(mut self, statuses: I) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    /// Restrict to the given risk levels.
    pub fn risk_levels<I: IntoIterator<Item = RiskLevel>>(mut self, levels: I) -> Self {
        self.risk_levels = levels.into_iter().collect();
        self
    }

    /// Bound the risk score inclusively on both ends.
    pub fn score_range(mut self, min: f64, max: f64) -> Self {
        self.score_min = Some(min);
        self.score_max = Some(max);
        self
    }

    /// Bound `updated_at` inclusively on both ends.
    pub fn date_range(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    /// Check the filter for structural validity.
    ///
    /// A malformed filter is a caller bug; it is reported rather than
    /// silently coerced into an unconstrained query.
    pub fn validate(&self) -> Result<()> {
        for (bound, label) in [(self.score_min, "score_min"), (self.score_max, "score_max")] {
            if let Some(value) = bound {
                if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                    return Err(VigieError::invalid_filter(format!(
                        "{label} must be a finite value in [0, 1], got {value}"
                    )));
                }
            }
        }

        if let (Some(min), Some(max)) = (self.score_min, self.score_max) {
            if min > max {
                return Err(VigieError::invalid_filter(format!(
                    "score_min {min} is above score_max {max}"
                )));
            }
        }

        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err(VigieError::invalid_filter(format!(
                    "date_from {from} is after date_to {to}"
                )));
            }
        }

        Ok(())
    }

    /// Whether a record passes every structured criterion. The free-text
    /// term is not evaluated here; the engine applies it through the
    /// fuzzy index.
    pub fn matches(&self, employer: &Employer) -> bool {
        if !self.sectors.is_empty() && !self.sectors.iter().any(|s| *s == employer.sector) {
            return false;
        }
        if !self.regions.is_empty() && !self.regions.iter().any(|r| *r == employer.region) {
            return false;
        }
        if !self.statuses.is_empty() && !self.statuses.contains(&employer.status) {
            return false;
        }
        if !self.risk_levels.is_empty() && !self.risk_levels.contains(&employer.risk_level) {
            return false;
        }
        if let Some(min) = self.score_min {
            if employer.risk_score < min {
                return false;
            }
        }
        if let Some(max) = self.score_max {
            if employer.risk_score > max {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if employer.updated_at < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if employer.updated_at > to {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = SearchFilter::new();
        assert!(filter.validate().is_ok());
        for employer in fixtures::demo_employers() {
            assert!(filter.matches(&employer));
        }
    }

    #[test]
    fn test_array_criteria_are_or_within_and_across() {
        let employers = fixtures::demo_employers();
        let filter = SearchFilter::new()
            .sectors(["Commerce", "Transport"])
            .regions(["Abidjan"]);

        for employer in &employers {
            let expected = (employer.sector == "Commerce" || employer.sector == "Transport")
                && employer.region == "Abidjan";
            assert_eq!(filter.matches(employer), expected, "record {}", employer.id);
        }
    }

    #[test]
    fn test_score_bounds_are_inclusive() {
        let mut employers = fixtures::demo_employers();
        let employer = &mut employers[0];
        employer.risk_score = 0.6;

        let filter = SearchFilter::new().score_range(0.6, 0.6);
        assert!(filter.matches(employer));

        employer.risk_score = 0.59;
        assert!(!filter.matches(employer));
    }

    #[test]
    fn test_invalid_score_bounds_are_reported() {
        assert!(SearchFilter::new().score_range(0.8, 0.2).validate().is_err());
        assert!(
            SearchFilter {
                score_min: Some(f64::NAN),
                ..SearchFilter::default()
            }
            .validate()
            .is_err()
        );
        assert!(
            SearchFilter {
                score_max: Some(1.5),
                ..SearchFilter::default()
            }
            .validate()
            .is_err()
        );
        assert!(SearchFilter::new().score_range(0.2, 0.8).validate().is_ok());
    }

    #[test]
    fn test_inverted_date_range_is_reported() {
        use chrono::TimeZone;
        let earlier = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();

        assert!(SearchFilter::new().date_range(later, earlier).validate().is_err());
        assert!(SearchFilter::new().date_range(earlier, later).validate().is_ok());
    }
}
