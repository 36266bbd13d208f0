//! Deterministic demo collection for development, tests, and benchmarks.
//!
//! The dashboard this crate serves ships with a seeded data set standing
//! in for the external ingestion process: a handful of employers covering
//! each risk archetype (unregistered declarer, clean record, diverging
//! headcounts, wage gap, critical anomalies) plus generated monthly
//! headcount history. Generation is seeded per record, so the collection
//! is identical across runs.

use chrono::{DateTime, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::employer::{
    Anomaly, AnomalyKind, AnomalySeverity, AnomalyStatus, CnpsDeclaration, Employer,
    EmployerStatus, HeadcountRecord, HistorySource, TaxDeclaration,
};
use crate::geo::GeoPoint;
use crate::risk::{self, RiskLevel};

const HISTORY_SEED: u64 = 0x7669_6769_655f_6878;

/// Years covered by the generated headcount history. The final year is
/// truncated at June, matching the snapshot date of the demo data.
const HISTORY_YEARS: std::ops::RangeInclusive<i32> = 2023..=2025;
const HISTORY_CUTOFF_MONTH: u32 = 6;

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Generate a monthly headcount history around the current figure.
///
/// Figures wobble a few employees around `current_headcount` with a
/// per-record seed derived from `employer_id`, so repeated calls produce
/// identical series.
pub fn generate_history(employer_id: &str, current_headcount: u32) -> Vec<HeadcountRecord> {
    let seed = employer_id
        .bytes()
        .fold(HISTORY_SEED, |acc, byte| acc.rotate_left(8) ^ u64::from(byte));
    let mut rng = StdRng::seed_from_u64(seed);

    let mut history = Vec::new();
    for year in HISTORY_YEARS {
        let last_month = if year == *HISTORY_YEARS.end() {
            HISTORY_CUTOFF_MONTH
        } else {
            12
        };
        for month in 1..=last_month {
            let cnps_variation = rng.random_range(0..6) as i64 - 3;
            let tax_variation = rng.random_range(0..4) as i64 - 2;
            let cnps_headcount = (i64::from(current_headcount) + cnps_variation).max(0) as u32;
            let tax_headcount = (i64::from(current_headcount) + tax_variation).max(0) as u32;

            history.push(HeadcountRecord {
                year,
                month,
                cnps_headcount,
                tax_headcount,
                gap: cnps_headcount.abs_diff(tax_headcount),
                source: if rng.random_bool(0.5) {
                    HistorySource::Cnps
                } else {
                    HistorySource::Tax
                },
            });
        }
    }
    history
}

/// Build the demo employer collection, history generated and risk fields
/// annotated.
pub fn demo_employers() -> Vec<Employer> {
    let mut employers = vec![
        // Declares 50 employees to the tax register while absent from the
        // social-insurance register, with two critical anomalies on file.
        Employer {
            id: "emp-001".to_string(),
            name: "Bâtiment Plus Construction".to_string(),
            sector: "BTP".to_string(),
            region: "Abidjan".to_string(),
            city: "Abidjan".to_string(),
            coordinates: GeoPoint::new(5.3600, -4.0083),
            status: EmployerStatus::Active,
            risk_score: 0.0,
            risk_level: RiskLevel::Low,
            cnps: CnpsDeclaration {
                affiliated: false,
                affiliation_number: None,
                declared_headcount: 0,
                last_updated: day(2024, 12, 1),
            },
            tax: TaxDeclaration {
                taxpayer_number: "CI-TX-001001".to_string(),
                declared_headcount: 50,
                revenue: Some(850_000_000.0),
                last_updated: day(2024, 12, 15),
            },
            wage_gap: None,
            anomalies: vec![
                Anomaly {
                    kind: AnomalyKind::Declaration,
                    description: "No social-insurance affiliation despite tax-declared workforce"
                        .to_string(),
                    severity: AnomalySeverity::Critical,
                    detected_at: day(2024, 12, 1),
                    status: AnomalyStatus::New,
                    expected_value: Some(50.0),
                    observed_value: Some(0.0),
                },
                Anomaly {
                    kind: AnomalyKind::Headcount,
                    description: "Workforce collapse between declaration periods".to_string(),
                    severity: AnomalySeverity::Critical,
                    detected_at: day(2024, 11, 12),
                    status: AnomalyStatus::InProgress,
                    expected_value: Some(50.0),
                    observed_value: Some(5.0),
                },
            ],
            headcount_history: Vec::new(),
            created_at: day(2023, 6, 15),
            updated_at: day(2024, 12, 20),
            last_control_date: None,
        },
        // Clean record: both registers agree.
        Employer {
            id: "emp-002".to_string(),
            name: "Pharmacie du Plateau".to_string(),
            sector: "Commerce".to_string(),
            region: "Abidjan".to_string(),
            city: "Abidjan".to_string(),
            coordinates: GeoPoint::new(5.3364, -4.0267),
            status: EmployerStatus::Active,
            risk_score: 0.0,
            risk_level: RiskLevel::Low,
            cnps: CnpsDeclaration {
                affiliated: true,
                affiliation_number: Some("CNPS001234".to_string()),
                declared_headcount: 18,
                last_updated: day(2024, 12, 20),
            },
            tax: TaxDeclaration {
                taxpayer_number: "CI-TX-001234".to_string(),
                declared_headcount: 18,
                revenue: Some(120_000_000.0),
                last_updated: day(2024, 12, 18),
            },
            wage_gap: Some(0.05),
            anomalies: Vec::new(),
            headcount_history: Vec::new(),
            created_at: day(2023, 8, 20),
            updated_at: day(2024, 12, 20),
            last_control_date: Some(day(2024, 6, 10)),
        },
        // Diverging headcounts, a wage gap above threshold, one critical
        // anomaly: lands in the medium bucket.
        Employer {
            id: "emp-003".to_string(),
            name: "Transports Rapides de Bouaké".to_string(),
            sector: "Transport".to_string(),
            region: "Vallée du Bandama".to_string(),
            city: "Bouaké".to_string(),
            coordinates: GeoPoint::new(7.6906, -5.0303),
            status: EmployerStatus::UnderReview,
            risk_score: 0.0,
            risk_level: RiskLevel::Low,
            cnps: CnpsDeclaration {
                affiliated: true,
                affiliation_number: Some("CNPS002045".to_string()),
                declared_headcount: 30,
                last_updated: day(2024, 11, 28),
            },
            tax: TaxDeclaration {
                taxpayer_number: "CI-TX-002045".to_string(),
                declared_headcount: 40,
                revenue: Some(310_000_000.0),
                last_updated: day(2024, 12, 5),
            },
            wage_gap: Some(0.4),
            anomalies: vec![Anomaly {
                kind: AnomalyKind::Wage,
                description: "Declared wage mass inconsistent with sector averages".to_string(),
                severity: AnomalySeverity::Critical,
                detected_at: day(2024, 10, 3),
                status: AnomalyStatus::InProgress,
                expected_value: None,
                observed_value: None,
            }],
            headcount_history: Vec::new(),
            created_at: day(2023, 4, 10),
            updated_at: day(2024, 12, 15),
            last_control_date: Some(day(2024, 10, 3)),
        },
        // Mild headcount divergence only.
        Employer {
            id: "emp-004".to_string(),
            name: "Industrie Textile Ivoirienne".to_string(),
            sector: "Industrie".to_string(),
            region: "Abidjan".to_string(),
            city: "Abidjan".to_string(),
            coordinates: GeoPoint::new(5.3097, -3.9789),
            status: EmployerStatus::Active,
            risk_score: 0.0,
            risk_level: RiskLevel::Low,
            cnps: CnpsDeclaration {
                affiliated: true,
                affiliation_number: Some("CNPS003310".to_string()),
                declared_headcount: 100,
                last_updated: day(2024, 12, 18),
            },
            tax: TaxDeclaration {
                taxpayer_number: "CI-TX-003310".to_string(),
                declared_headcount: 120,
                revenue: Some(2_400_000_000.0),
                last_updated: day(2024, 12, 19),
            },
            wage_gap: Some(0.15),
            anomalies: Vec::new(),
            headcount_history: Vec::new(),
            created_at: day(2023, 9, 5),
            updated_at: day(2024, 12, 19),
            last_control_date: None,
        },
        // Unregistered declarer in the north, suspended by the
        // administration.
        Employer {
            id: "emp-005".to_string(),
            name: "Commerce Général du Nord".to_string(),
            sector: "Commerce".to_string(),
            region: "Savanes".to_string(),
            city: "Korhogo".to_string(),
            coordinates: GeoPoint::new(9.4580, -5.6296),
            status: EmployerStatus::Suspended,
            risk_score: 0.0,
            risk_level: RiskLevel::Low,
            cnps: CnpsDeclaration {
                affiliated: false,
                affiliation_number: None,
                declared_headcount: 0,
                last_updated: day(2024, 9, 14),
            },
            tax: TaxDeclaration {
                taxpayer_number: "CI-TX-004477".to_string(),
                declared_headcount: 12,
                revenue: None,
                last_updated: day(2024, 11, 30),
            },
            wage_gap: None,
            anomalies: Vec::new(),
            headcount_history: Vec::new(),
            created_at: day(2024, 2, 12),
            updated_at: day(2024, 11, 30),
            last_control_date: None,
        },
        // Clean record sharing coordinates with emp-001 (same building).
        Employer {
            id: "emp-006".to_string(),
            name: "Hôtel des Lagunes".to_string(),
            sector: "Hôtellerie".to_string(),
            region: "Abidjan".to_string(),
            city: "Abidjan".to_string(),
            coordinates: GeoPoint::new(5.3600, -4.0083),
            status: EmployerStatus::Active,
            risk_score: 0.0,
            risk_level: RiskLevel::Low,
            cnps: CnpsDeclaration {
                affiliated: true,
                affiliation_number: Some("CNPS005120".to_string()),
                declared_headcount: 25,
                last_updated: day(2024, 12, 10),
            },
            tax: TaxDeclaration {
                taxpayer_number: "CI-TX-005120".to_string(),
                declared_headcount: 25,
                revenue: Some(480_000_000.0),
                last_updated: day(2024, 12, 12),
            },
            wage_gap: Some(0.1),
            anomalies: Vec::new(),
            headcount_history: Vec::new(),
            created_at: day(2023, 1, 15),
            updated_at: day(2024, 12, 12),
            last_control_date: Some(day(2024, 3, 22)),
        },
    ];

    for employer in &mut employers {
        employer.headcount_history =
            generate_history(&employer.id, employer.cnps.declared_headcount.max(employer.tax.declared_headcount));
    }
    risk::rescore_all(&mut employers);
    employers
}
