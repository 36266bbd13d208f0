//! Geographic primitives for location-based search.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographical point with latitude and longitude in decimal degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl GeoPoint {
    /// Create a new geographical point.
    pub fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }

    /// Calculate the great-circle (haversine) distance to another point in
    /// kilometers.
    ///
    /// Non-finite components are coerced to 0.0 before the math runs, so a
    /// record with a missing or corrupt coordinate never propagates NaN
    /// into distance comparisons.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let (lat1, lng1) = (finite_or_zero(self.lat), finite_or_zero(self.lng));
        let (lat2, lng2) = (finite_or_zero(other.lat), finite_or_zero(other.lng));

        let lat1_rad = lat1.to_radians();
        let lat2_rad = lat2.to_radians();
        let delta_lat = (lat2 - lat1).to_radians();
        let delta_lng = (lng2 - lng1).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_zero_at_same_point() {
        let abidjan = GeoPoint::new(5.3600, -4.0083);
        assert_eq!(abidjan.distance_km(&abidjan), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let abidjan = GeoPoint::new(5.3600, -4.0083);
        let bouake = GeoPoint::new(7.6906, -5.0303);

        let there = abidjan.distance_km(&bouake);
        let back = bouake.distance_km(&abidjan);
        assert_eq!(there, back);
    }

    #[test]
    fn test_known_distance() {
        let nyc = GeoPoint::new(40.7128, -74.0060);
        let la = GeoPoint::new(34.0522, -118.2437);

        let distance = nyc.distance_km(&la);
        // Distance between NYC and LA is approximately 3,944 km
        assert!((distance - 3944.0).abs() < 100.0);
    }

    #[test]
    fn test_non_finite_components_do_not_propagate_nan() {
        let broken = GeoPoint::new(f64::NAN, f64::INFINITY);
        let origin = GeoPoint::new(0.0, 0.0);

        let distance = broken.distance_km(&origin);
        assert!(distance.is_finite());
        assert_eq!(distance, 0.0);
    }
}
