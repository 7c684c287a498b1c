//! Geographic coordinates and great-circle distance math.
//!
//! This is the single distance implementation in the system: the matching
//! query, the listing detail view, and the display formatter all go
//! through [`GeoPoint::distance_km`].

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers per degree of latitude (and of longitude at the equator).
const KM_PER_DEGREE: f64 = 111.0;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

impl GeoPoint {
    /// Create a new point, validating coordinate ranges.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
            Some(Self { lat, lng })
        } else {
            None
        }
    }

    /// Great-circle distance to another point via the haversine formula,
    /// in kilometers.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos()
                * other.lat.to_radians().cos()
                * (d_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }

    /// Bounding box around this point covering the given radius.
    ///
    /// Used as a cheap SQL prefilter before the exact haversine check.
    /// The box is slightly larger than the circle it encloses, so callers
    /// must still apply `distance_km` to each candidate.
    pub fn bounding_box(&self, radius_km: f64) -> GeoBounds {
        let lat_delta = radius_km / KM_PER_DEGREE;
        // Longitude degrees shrink with latitude; guard against the poles.
        let lng_scale = self.lat.to_radians().cos().max(0.01);
        let lng_delta = radius_km / (KM_PER_DEGREE * lng_scale);

        GeoBounds {
            min_lat: (self.lat - lat_delta).max(-90.0),
            max_lat: (self.lat + lat_delta).min(90.0),
            min_lng: (self.lng - lng_delta).max(-180.0),
            max_lng: (self.lng + lng_delta).min(180.0),
        }
    }
}

/// A latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    /// Southern edge.
    pub min_lat: f64,
    /// Northern edge.
    pub max_lat: f64,
    /// Western edge.
    pub min_lng: f64,
    /// Eastern edge.
    pub max_lng: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_zero_for_same_point() {
        let p = GeoPoint::new(12.9716, 77.5946).unwrap();
        assert!(p.distance_km(&p) < 1e-9);
    }

    #[test]
    fn test_distance_known_cities() {
        // Bangalore to Chennai, roughly 290 km.
        let blr = GeoPoint::new(12.9716, 77.5946).unwrap();
        let maa = GeoPoint::new(13.0827, 80.2707).unwrap();
        let d = blr.distance_km(&maa);
        assert!((280.0..300.0).contains(&d), "got {d}");
    }

    #[test]
    fn test_distance_symmetric() {
        let a = GeoPoint::new(28.6139, 77.2090).unwrap();
        let b = GeoPoint::new(19.0760, 72.8777).unwrap();
        assert!((a.distance_km(&b) - b.distance_km(&a)).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_coordinates_rejected() {
        assert!(GeoPoint::new(91.0, 0.0).is_none());
        assert!(GeoPoint::new(0.0, -181.0).is_none());
    }

    #[test]
    fn test_bounding_box_contains_radius() {
        let p = GeoPoint::new(12.9716, 77.5946).unwrap();
        let bounds = p.bounding_box(50.0);
        // A point 40 km due north stays inside the box.
        let north = GeoPoint::new(p.lat + 40.0 / 111.0, p.lng).unwrap();
        assert!(north.lat <= bounds.max_lat);
        assert!(north.lat >= bounds.min_lat);
    }
}
