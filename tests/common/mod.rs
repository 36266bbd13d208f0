//! Shared fixture builders for integration tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};

use vigie::employer::{CnpsDeclaration, Employer, EmployerStatus, TaxDeclaration};
use vigie::geo::GeoPoint;
use vigie::risk::RiskLevel;

pub fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// A clean, affiliated employer with agreeing declarations. Tests mutate
/// the returned record to set up their scenario, then refresh its risk.
pub fn employer(id: &str, name: &str, sector: &str, region: &str) -> Employer {
    Employer {
        id: id.to_string(),
        name: name.to_string(),
        sector: sector.to_string(),
        region: region.to_string(),
        city: region.to_string(),
        coordinates: GeoPoint::new(5.3600, -4.0083),
        status: EmployerStatus::Active,
        risk_score: 0.0,
        risk_level: RiskLevel::Low,
        cnps: CnpsDeclaration {
            affiliated: true,
            affiliation_number: Some(format!("CNPS-{id}")),
            declared_headcount: 20,
            last_updated: day(2024, 12, 1),
        },
        tax: TaxDeclaration {
            taxpayer_number: format!("CI-TX-{id}"),
            declared_headcount: 20,
            revenue: None,
            last_updated: day(2024, 12, 1),
        },
        wage_gap: None,
        anomalies: Vec::new(),
        headcount_history: Vec::new(),
        created_at: day(2023, 1, 1),
        updated_at: day(2024, 12, 1),
        last_control_date: None,
    }
}
