//! Serialized input rows (JSON / CSV)

use serde::{Deserialize, Serialize};

use super::{DeliveryRequest, GeoPoint, OperationType, ZoneClass};
use crate::defaults::{DEFAULT_MASS_KG, DEFAULT_OPERATION_TYPE, DEFAULT_PARCEL_COUNT, DEFAULT_ZONE_CLASS};
use crate::error::PlannerResult;

/// One stop as entered by the collecting form.
///
/// `zone` and `type` stay free text; they are resolved leniently
/// when converted into a [`DeliveryRequest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    pub lat: f64,
    #[serde(alias = "lng")]
    pub lon: f64,
    #[serde(default = "default_mass", alias = "massKg", alias = "mass_kg")]
    pub weight: f64,
    #[serde(default = "default_parcels", alias = "parcelCount", alias = "parcel_count")]
    pub parcels: u32,
    #[serde(default = "default_zone", alias = "zoneClass", alias = "zone_class")]
    pub zone: String,
    #[serde(rename = "type", default = "default_type", alias = "operationType", alias = "operation_type")]
    pub operation_type: String,
}

fn default_mass() -> f64 {
    DEFAULT_MASS_KG
}

fn default_parcels() -> u32 {
    DEFAULT_PARCEL_COUNT
}

fn default_zone() -> String {
    DEFAULT_ZONE_CLASS.to_string()
}

fn default_type() -> String {
    DEFAULT_OPERATION_TYPE.to_string()
}

impl RequestRecord {
    pub fn into_request(self) -> PlannerResult<DeliveryRequest> {
        let location = GeoPoint::new(self.lat, self.lon)?;
        DeliveryRequest::new(
            location,
            self.weight,
            self.parcels,
            ZoneClass::parse_lenient(&self.zone),
            OperationType::parse_lenient(&self.operation_type),
        )
    }
}

impl TryFrom<RequestRecord> for DeliveryRequest {
    type Error = crate::error::PlannerError;

    fn try_from(record: RequestRecord) -> Result<Self, Self::Error> {
        record.into_request()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;

    #[test]
    fn test_record_defaults_match_entry_form() {
        let record: RequestRecord = serde_json::from_str(r#"{"lat": 30.05, "lon": 31.23}"#).unwrap();
        assert_eq!(record.weight, 5.0);
        assert_eq!(record.parcels, 2);
        assert_eq!(record.zone, "A");
        assert_eq!(record.operation_type, "Delivery");
    }

    #[test]
    fn test_record_accepts_camel_case_aliases() {
        let record: RequestRecord = serde_json::from_str(
            r#"{"lat": 30.05, "lng": 31.23, "massKg": 1.5, "parcelCount": 4, "zoneClass": "c", "operationType": "Pickup"}"#,
        )
        .unwrap();

        let request = record.into_request().unwrap();
        assert_eq!(request.mass_kg(), 1.5);
        assert_eq!(request.parcel_count(), 4);
        assert_eq!(request.zone_class(), ZoneClass::C);
        assert_eq!(request.operation_type(), OperationType::Pickup);
    }

    #[test]
    fn test_record_unknown_categories_resolve_to_defaults() {
        let record: RequestRecord = serde_json::from_str(
            r#"{"lat": 30.05, "lon": 31.23, "zone": "Z", "type": "Express"}"#,
        )
        .unwrap();

        let request = record.into_request().unwrap();
        assert_eq!(request.zone_class(), ZoneClass::B);
        assert_eq!(request.operation_type(), OperationType::Delivery);
    }

    #[test]
    fn test_record_invalid_coordinate_rejected() {
        let record: RequestRecord = serde_json::from_str(r#"{"lat": 95.0, "lon": 31.23}"#).unwrap();
        assert!(matches!(
            record.into_request(),
            Err(PlannerError::InvalidCoordinate { .. })
        ));
    }
}
