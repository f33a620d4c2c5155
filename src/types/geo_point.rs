//! Geographic point type

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};

/// Latitude/longitude pair in decimal degrees.
///
/// Fields are private so a `GeoPoint` is always in range once it exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint", into = "RawGeoPoint")]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// Validate and create a point. NaN and infinities are out of range.
    pub fn new(lat: f64, lon: f64) -> PlannerResult<Self> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(PlannerError::InvalidCoordinate { lat, lon });
        }
        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// `[lng, lat]` pair (GeoJSON order)
    pub fn to_lng_lat(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawGeoPoint {
    lat: f64,
    #[serde(alias = "lng")]
    lon: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = PlannerError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.lat, raw.lon)
    }
}

impl From<GeoPoint> for RawGeoPoint {
    fn from(point: GeoPoint) -> Self {
        RawGeoPoint { lat: point.lat, lon: point.lon }
    }
}
