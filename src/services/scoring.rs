//! Priority scoring
//!
//! A request's score is a weighted sum of distance, mass and parcel count,
//! scaled by a zone difficulty factor and an operation type factor.
//! Lower scores are visited sooner.

use crate::types::{DeliveryRequest, OperationType, ZoneClass};

/// Linear weights of the base cost
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub distance: f64,
    pub mass: f64,
    pub parcels: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            distance: 1.0,
            mass: 0.5,
            parcels: 0.3,
        }
    }
}

pub fn zone_factor(zone: ZoneClass) -> f64 {
    match zone {
        ZoneClass::A => 1.0,
        ZoneClass::B => 1.5,
        ZoneClass::C => 2.0,
    }
}

pub fn type_factor(operation: OperationType) -> f64 {
    match operation {
        OperationType::Delivery => 1.0,
        OperationType::Pickup => 1.2,
        OperationType::Linked => 0.8,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriorityScorer {
    weights: ScoringWeights,
}

impl PriorityScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    pub fn score(
        &self,
        distance_km: f64,
        mass_kg: f64,
        parcel_count: u32,
        zone: ZoneClass,
        operation: OperationType,
    ) -> f64 {
        let base = distance_km * self.weights.distance
            + mass_kg * self.weights.mass
            + parcel_count as f64 * self.weights.parcels;

        base * zone_factor(zone) * type_factor(operation)
    }

    /// Score from free-text categories; unknown values take the default factor
    pub fn score_raw(
        &self,
        distance_km: f64,
        mass_kg: f64,
        parcel_count: u32,
        zone: &str,
        operation: &str,
    ) -> f64 {
        self.score(
            distance_km,
            mass_kg,
            parcel_count,
            ZoneClass::parse_lenient(zone),
            OperationType::parse_lenient(operation),
        )
    }

    /// Score `request` as if it were `distance_km` away
    pub fn score_request(&self, request: &DeliveryRequest, distance_km: f64) -> f64 {
        self.score(
            distance_km,
            request.mass_kg(),
            request.parcel_count(),
            request.zone_class(),
            request.operation_type(),
        )
    }
}

/// Score with the default weights
pub fn score(
    distance_km: f64,
    mass_kg: f64,
    parcel_count: u32,
    zone: ZoneClass,
    operation: OperationType,
) -> f64 {
    PriorityScorer::default().score(distance_km, mass_kg, parcel_count, zone, operation)
}
