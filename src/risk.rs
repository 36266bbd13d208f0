//! Risk scoring over cross-source declaration signals.
//!
//! The scorer converts the heterogeneous signals of one employer record —
//! register affiliation, headcount declarations, wage gap, detected
//! anomalies — into a bounded `[0, 1]` score and a four-level category.
//! It is a total, deterministic function of the current declaration
//! snapshot: history never feeds it, missing optionals count as their
//! zero/false defaults, and non-finite numeric input is coerced to zero
//! instead of propagating.

use serde::{Deserialize, Serialize};

use crate::employer::{AnomalySeverity, Employer};

/// Penalty for declaring employees to the tax register while absent from
/// the social-insurance register — the strongest single signal of
/// declared-but-unregistered employment.
const NON_AFFILIATION_PENALTY: f64 = 0.4;

/// Weight of the normalized cross-register headcount gap.
const HEADCOUNT_GAP_WEIGHT: f64 = 0.3;

/// Flat penalty once the wage gap crosses [`WAGE_GAP_THRESHOLD`].
const WAGE_GAP_PENALTY: f64 = 0.2;

/// Wage-gap ratio above which the flat penalty applies.
const WAGE_GAP_THRESHOLD: f64 = 0.3;

/// Score added per critical anomaly.
const CRITICAL_ANOMALY_WEIGHT: f64 = 0.1;

/// Four-level categorical bucketing of a risk score.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Human-readable label, as shown by dashboard collaborators.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of scoring one employer record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: f64,
    pub level: RiskLevel,
}

/// Compute the risk score of an employer record.
///
/// The score is an additive combination of four independent signals,
/// clamped to `[0, 1]`:
///
/// 1. not affiliated with the social-insurance register while declaring a
///    nonzero headcount to the tax register: +0.4
/// 2. normalized headcount gap between the registers: `gap / max * 0.3`
///    (0 when both headcounts are 0)
/// 3. wage gap above 0.3: +0.2, as a binary threshold
/// 4. +0.1 per critical anomaly
pub fn score(employer: &Employer) -> f64 {
    let mut score = 0.0;

    if !employer.cnps.affiliated && employer.tax.declared_headcount > 0 {
        score += NON_AFFILIATION_PENALTY;
    }

    let cnps_headcount = employer.cnps.declared_headcount;
    let tax_headcount = employer.tax.declared_headcount;
    let gap = cnps_headcount.abs_diff(tax_headcount);
    let max_headcount = cnps_headcount.max(tax_headcount);
    if max_headcount > 0 {
        score += (gap as f64 / max_headcount as f64) * HEADCOUNT_GAP_WEIGHT;
    }

    let wage_gap = employer.wage_gap.filter(|gap| gap.is_finite()).unwrap_or(0.0);
    if wage_gap > WAGE_GAP_THRESHOLD {
        score += WAGE_GAP_PENALTY;
    }

    let critical_anomalies = employer
        .anomalies
        .iter()
        .filter(|anomaly| anomaly.severity == AnomalySeverity::Critical)
        .count();
    score += critical_anomalies as f64 * CRITICAL_ANOMALY_WEIGHT;

    score.min(1.0)
}

/// Map a score to its risk level. Thresholds are evaluated high-to-low
/// and the buckets do not overlap.
pub fn level_for(score: f64) -> RiskLevel {
    if score >= 0.8 {
        RiskLevel::Critical
    } else if score >= 0.6 {
        RiskLevel::High
    } else if score >= 0.3 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Score an employer record and bucket the result.
///
/// This is the surface collaborators call whenever a record is created or
/// its declaration fields change, before displaying it.
pub fn assess(employer: &Employer) -> RiskAssessment {
    let score = score(employer);
    RiskAssessment {
        score,
        level: level_for(score),
    }
}

/// Recompute the derived risk fields of every record in a collection.
///
/// Run this after each ingestion pass so no record carries a stale score.
pub fn rescore_all(employers: &mut [Employer]) {
    for employer in employers {
        employer.refresh_risk();
    }
}
