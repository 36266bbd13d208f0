//! Read-only dashboard aggregates over a scored employer collection.
//!
//! Everything here is derived on demand from the collection snapshot;
//! nothing is cached or rendered. Export formatting and chart drawing
//! belong to the presentation collaborators.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::employer::{Employer, EmployerStatus};
use crate::risk::RiskLevel;

/// Score at and above which an employer counts as high-risk on the
/// dashboard headline.
const HIGH_RISK_SCORE: f64 = 0.6;

/// Employer counts per risk level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl RiskDistribution {
    fn add(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
            RiskLevel::Critical => self.critical += 1,
        }
    }
}

/// Headline figures for the dashboard landing page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: usize,
    pub active: usize,
    /// Employers with `risk_score >= 0.6`.
    pub high_risk: usize,
    pub distribution: RiskDistribution,
}

impl DashboardStats {
    /// Compute headline figures from a scored collection.
    pub fn compute(employers: &[Employer]) -> Self {
        let mut stats = DashboardStats {
            total: employers.len(),
            ..DashboardStats::default()
        };

        for employer in employers {
            if employer.status == EmployerStatus::Active {
                stats.active += 1;
            }
            if employer.risk_score >= HIGH_RISK_SCORE {
                stats.high_risk += 1;
            }
            stats.distribution.add(employer.risk_level);
        }
        stats
    }
}

/// Employer count and mean risk score for one sector or region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRiskSummary {
    pub label: String,
    pub employer_count: usize,
    pub mean_score: f64,
}

/// Per-sector risk summaries, highest mean score first.
pub fn sector_summaries(employers: &[Employer]) -> Vec<GroupRiskSummary> {
    summaries_by(employers, |employer| &employer.sector)
}

/// Per-region risk summaries, highest mean score first.
pub fn region_summaries(employers: &[Employer]) -> Vec<GroupRiskSummary> {
    summaries_by(employers, |employer| &employer.region)
}

fn summaries_by<F>(employers: &[Employer], key: F) -> Vec<GroupRiskSummary>
where
    F: Fn(&Employer) -> &str,
{
    let mut groups: AHashMap<&str, (usize, f64)> = AHashMap::new();
    for employer in employers {
        let entry = groups.entry(key(employer)).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += employer.risk_score;
    }

    let mut summaries: Vec<GroupRiskSummary> = groups
        .into_iter()
        .map(|(label, (count, score_sum))| GroupRiskSummary {
            label: label.to_string(),
            employer_count: count,
            mean_score: score_sum / count as f64,
        })
        .collect();

    // Highest mean first; ties resolved by label so the order is stable
    // across runs.
    summaries.sort_by(|a, b| {
        b.mean_score
            .partial_cmp(&a.mean_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.label.cmp(&b.label))
    });
    summaries
}

/// One point of the headcount evolution series consumed by the
/// dashboard's chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionPoint {
    /// Month label in `MM/YYYY` form.
    pub label: String,
    pub cnps_headcount: u32,
    pub tax_headcount: u32,
    pub gap: u32,
}

/// The per-month declaration series of one employer, in history order.
pub fn headcount_evolution(employer: &Employer) -> Vec<EvolutionPoint> {
    employer
        .headcount_history
        .iter()
        .map(|record| EvolutionPoint {
            label: format!("{:02}/{}", record.month, record.year),
            cnps_headcount: record.cnps_headcount,
            tax_headcount: record.tax_headcount,
            gap: record.gap,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_dashboard_stats_headline_figures() {
        let employers = fixtures::demo_employers();
        let stats = DashboardStats::compute(&employers);

        assert_eq!(stats.total, 6);
        assert_eq!(stats.active, 4);
        assert_eq!(stats.high_risk, 2);
        assert_eq!(
            stats.distribution,
            RiskDistribution {
                low: 3,
                medium: 1,
                high: 1,
                critical: 1,
            }
        );
    }

    #[test]
    fn test_empty_collection_stats() {
        let stats = DashboardStats::compute(&[]);
        assert_eq!(stats, DashboardStats::default());
    }

    #[test]
    fn test_sector_summaries_are_ordered_and_averaged() {
        let employers = fixtures::demo_employers();
        let summaries = sector_summaries(&employers);

        // One group per distinct sector.
        assert_eq!(summaries.len(), 5);
        for pair in summaries.windows(2) {
            assert!(pair[0].mean_score >= pair[1].mean_score);
        }

        // Commerce holds emp-002 (0.0) and emp-005 (0.7).
        let commerce = summaries.iter().find(|s| s.label == "Commerce").unwrap();
        assert_eq!(commerce.employer_count, 2);
        assert!((commerce.mean_score - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_headcount_evolution_mirrors_history() {
        let employers = fixtures::demo_employers();
        let employer = &employers[0];
        let series = headcount_evolution(employer);

        assert_eq!(series.len(), employer.headcount_history.len());
        assert_eq!(series[0].label, "01/2023");
        for (point, record) in series.iter().zip(&employer.headcount_history) {
            assert_eq!(point.gap, record.cnps_headcount.abs_diff(record.tax_headcount));
        }
    }
}
