//! Geographic calculations

use crate::types::GeoPoint;

/// Earth radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle (Haversine) distance between two points in kilometers
pub fn haversine_distance(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let d_lat = (to.lat() - from.lat()).to_radians();
    let d_lon = (to.lon() - from.lon()).to_radians();

    let lat1 = from.lat().to_radians();
    let lat2 = to.lat().to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `a` a hair past 1.0 for antipodal points
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}
