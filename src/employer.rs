//! Employer data model shared by the scoring and search components.
//!
//! An [`Employer`] carries the declarations one employer filed with two
//! independent administrative sources: the social-insurance register
//! (CNPS) and the tax register. Records are created and updated by an
//! external ingestion process; this crate never creates, deletes, or
//! persists them — it reads them, annotates the derived risk fields in
//! place, and serves read-only queries.
//!
//! The derived fields `risk_score` and `risk_level` are never
//! authoritative: they are recomputed from the declaration fields via
//! [`Employer::refresh_risk`] (or [`crate::risk::rescore_all`] for a whole
//! collection) whenever the underlying data changes.

use std::io::Read;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geo::GeoPoint;
use crate::risk::{self, RiskLevel};

/// Administrative status of an employer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployerStatus {
    /// Actively operating and declaring.
    Active,
    /// No longer operating.
    Inactive,
    /// Declarations suspended by the administration.
    Suspended,
    /// Currently under inspection.
    UnderReview,
}

/// What an anomaly is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnomalyKind {
    /// Headcount declared to the two registers diverges.
    Headcount,
    /// Declared wage mass is inconsistent with expectations.
    Wage,
    /// A declaration is missing, late, or malformed.
    Declaration,
    /// Declared location is inconsistent with observed activity.
    Geographic,
}

/// Severity of a detected anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnomalySeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// Handling state of a detected anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnomalyStatus {
    New,
    InProgress,
    Resolved,
    Dismissed,
}

/// A cross-source inconsistency detected on an employer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub kind: AnomalyKind,
    pub description: String,
    pub severity: AnomalySeverity,
    pub detected_at: DateTime<Utc>,
    pub status: AnomalyStatus,
    /// Value the registers were expected to agree on, when quantifiable.
    #[serde(default)]
    pub expected_value: Option<f64>,
    /// Value actually observed, when quantifiable.
    #[serde(default)]
    pub observed_value: Option<f64>,
}

/// Declaration filed with the social-insurance register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CnpsDeclaration {
    /// Whether the employer is affiliated with the register at all.
    pub affiliated: bool,
    #[serde(default)]
    pub affiliation_number: Option<String>,
    /// Employee count declared to the register.
    pub declared_headcount: u32,
    pub last_updated: DateTime<Utc>,
}

/// Declaration filed with the tax register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxDeclaration {
    pub taxpayer_number: String,
    /// Employee count declared to the register.
    pub declared_headcount: u32,
    /// Declared annual revenue, when available.
    #[serde(default)]
    pub revenue: Option<f64>,
    pub last_updated: DateTime<Utc>,
}

/// Which register a historical headcount figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistorySource {
    Cnps,
    Tax,
    Inspection,
}

/// One month of headcount figures from both registers.
///
/// History is consumed by presentation aggregates only — scoring reads
/// the current declaration snapshot, never this series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadcountRecord {
    pub year: i32,
    /// Month of year, 1-12.
    pub month: u32,
    pub cnps_headcount: u32,
    pub tax_headcount: u32,
    /// Absolute difference between the two figures.
    pub gap: u32,
    pub source: HistorySource,
}

/// An employer record cross-referencing both administrative sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employer {
    /// Unique, stable identifier assigned by the ingestion process.
    pub id: String,
    /// Display name, the primary search key.
    pub name: String,
    pub sector: String,
    pub region: String,
    pub city: String,
    pub coordinates: GeoPoint,
    pub status: EmployerStatus,

    /// Derived risk score in `[0, 1]`. Never set directly — recomputed via
    /// [`Employer::refresh_risk`].
    #[serde(default)]
    pub risk_score: f64,
    /// Derived risk category, a pure function of `risk_score`.
    #[serde(default)]
    pub risk_level: RiskLevel,

    pub cnps: CnpsDeclaration,
    pub tax: TaxDeclaration,

    /// Fractional wage-declaration gap in `[0, 1]`, supplied by an
    /// external comparison process.
    #[serde(default)]
    pub wage_gap: Option<f64>,
    #[serde(default)]
    pub anomalies: Vec<Anomaly>,
    #[serde(default)]
    pub headcount_history: Vec<HeadcountRecord>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub last_control_date: Option<DateTime<Utc>>,
}

impl Employer {
    /// Recompute the derived risk fields from the current declaration
    /// snapshot.
    ///
    /// Must be called whenever a field feeding the score changes; there is
    /// no other mutation path for `risk_score` and `risk_level`.
    pub fn refresh_risk(&mut self) {
        let assessment = risk::assess(self);
        self.risk_score = assessment.score;
        self.risk_level = assessment.level;
    }
}

/// Parse a collection snapshot from its JSON representation.
pub fn parse_snapshot(json: &str) -> Result<Vec<Employer>> {
    Ok(serde_json::from_str(json)?)
}

/// Read a collection snapshot produced by the ingestion process.
pub fn load_snapshot<R: Read>(mut reader: R) -> Result<Vec<Employer>> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    parse_snapshot(&buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_employer_json() -> String {
        r#"[{
            "id": "emp-042",
            "name": "Transport Ouest SARL",
            "sector": "Transport",
            "region": "Bas-Sassandra",
            "city": "San-Pédro",
            "coordinates": { "lat": 4.7485, "lng": -6.6363 },
            "status": "Active",
            "cnps": {
                "affiliated": true,
                "affiliation_number": "CNPS004200",
                "declared_headcount": 12,
                "last_updated": "2024-11-30T00:00:00Z"
            },
            "tax": {
                "taxpayer_number": "CI-TX-004200",
                "declared_headcount": 14,
                "last_updated": "2024-12-05T00:00:00Z"
            },
            "created_at": "2023-02-01T00:00:00Z",
            "updated_at": "2024-12-05T00:00:00Z"
        }]"#
        .to_string()
    }

    #[test]
    fn test_parse_snapshot_with_defaults() {
        let employers = parse_snapshot(&sample_employer_json()).unwrap();
        assert_eq!(employers.len(), 1);

        let employer = &employers[0];
        assert_eq!(employer.name, "Transport Ouest SARL");
        assert_eq!(employer.status, EmployerStatus::Active);
        // Fields absent from the snapshot fall back to their defaults.
        assert_eq!(employer.risk_score, 0.0);
        assert_eq!(employer.risk_level, RiskLevel::Low);
        assert!(employer.wage_gap.is_none());
        assert!(employer.anomalies.is_empty());
        assert!(employer.headcount_history.is_empty());
        assert_eq!(employer.tax.revenue, None);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut employers = parse_snapshot(&sample_employer_json()).unwrap();
        employers[0].refresh_risk();

        let json = serde_json::to_string(&employers).unwrap();
        let reparsed = parse_snapshot(&json).unwrap();
        assert_eq!(employers, reparsed);
    }

    #[test]
    fn test_refresh_risk_updates_derived_fields() {
        let mut employers = parse_snapshot(&sample_employer_json()).unwrap();
        let employer = &mut employers[0];

        employer.refresh_risk();
        let first_score = employer.risk_score;
        // gap 2 of max 14 -> 2/14 * 0.3
        assert!((first_score - (2.0 / 14.0) * 0.3).abs() < 1e-12);

        // Worsen the declarations and recompute.
        employer.cnps.affiliated = false;
        employer.cnps.declared_headcount = 0;
        employer.refresh_risk();
        assert!(employer.risk_score > first_score);
        assert_eq!(employer.risk_level, crate::risk::level_for(employer.risk_score));
    }
}
