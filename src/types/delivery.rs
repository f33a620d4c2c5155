//! Delivery request types

use std::fmt;

use serde::{Deserialize, Serialize};

use super::GeoPoint;
use crate::error::{PlannerError, PlannerResult};

/// Neighborhood difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum ZoneClass {
    A,
    B,
    C,
}

impl Default for ZoneClass {
    fn default() -> Self {
        ZoneClass::B
    }
}

impl ZoneClass {
    /// Case-insensitive parse. Anything unrecognized is tier B.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "A" => ZoneClass::A,
            "B" => ZoneClass::B,
            "C" => ZoneClass::C,
            _ => ZoneClass::default(),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ZoneClass::A => "A",
            ZoneClass::B => "B",
            ZoneClass::C => "C",
        }
    }
}

impl From<&str> for ZoneClass {
    fn from(value: &str) -> Self {
        ZoneClass::parse_lenient(value)
    }
}

impl From<String> for ZoneClass {
    fn from(value: String) -> Self {
        ZoneClass::parse_lenient(&value)
    }
}

impl fmt::Display for ZoneClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic category of a stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum OperationType {
    Delivery,
    Pickup,
    /// Delivery tied to a prior pickup
    Linked,
}

impl Default for OperationType {
    fn default() -> Self {
        OperationType::Delivery
    }
}

impl OperationType {
    /// Exact-name parse. Anything unrecognized is weighted as a delivery.
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "Delivery" => OperationType::Delivery,
            "Pickup" => OperationType::Pickup,
            "Linked" => OperationType::Linked,
            _ => OperationType::default(),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            OperationType::Delivery => "Delivery",
            OperationType::Pickup => "Pickup",
            OperationType::Linked => "Linked",
        }
    }
}

impl From<&str> for OperationType {
    fn from(value: &str) -> Self {
        OperationType::parse_lenient(value)
    }
}

impl From<String> for OperationType {
    fn from(value: String) -> Self {
        OperationType::parse_lenient(&value)
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stop to visit.
///
/// Created with its five input fields; `distance_km` and `priority_score`
/// stay `None` until the planner attaches them with [`DeliveryRequest::scored`].
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryRequest {
    location: GeoPoint,
    mass_kg: f64,
    parcel_count: u32,
    zone_class: ZoneClass,
    operation_type: OperationType,
    distance_km: Option<f64>,
    priority_score: Option<f64>,
}

impl DeliveryRequest {
    pub fn new(
        location: GeoPoint,
        mass_kg: f64,
        parcel_count: u32,
        zone_class: ZoneClass,
        operation_type: OperationType,
    ) -> PlannerResult<Self> {
        if !mass_kg.is_finite() || mass_kg < 0.0 {
            return Err(PlannerError::InvalidMass { mass: mass_kg });
        }
        Ok(Self {
            location,
            mass_kg,
            parcel_count,
            zone_class,
            operation_type,
            distance_km: None,
            priority_score: None,
        })
    }

    /// Attach the derived distance and score.
    pub fn scored(mut self, distance_km: f64, priority_score: f64) -> Self {
        self.distance_km = Some(distance_km);
        self.priority_score = Some(priority_score);
        self
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    pub fn mass_kg(&self) -> f64 {
        self.mass_kg
    }

    pub fn parcel_count(&self) -> u32 {
        self.parcel_count
    }

    pub fn zone_class(&self) -> ZoneClass {
        self.zone_class
    }

    pub fn operation_type(&self) -> OperationType {
        self.operation_type
    }

    pub fn distance_km(&self) -> Option<f64> {
        self.distance_km
    }

    pub fn priority_score(&self) -> Option<f64> {
        self.priority_score
    }

    pub fn is_scored(&self) -> bool {
        self.distance_km.is_some() && self.priority_score.is_some()
    }
}
