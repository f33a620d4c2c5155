//! Renderer-facing output of a planned sequence

use serde::Serialize;
use serde_json::{json, Value};

use crate::services::sequencer::OrderedSequence;
use crate::types::{DeliveryRequest, GeoPoint, OperationType, ZoneClass};

/// One stop in visiting order
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopReport {
    pub position: usize,
    pub lat: f64,
    pub lon: f64,
    pub mass_kg: f64,
    pub parcel_count: u32,
    pub zone_class: ZoneClass,
    pub operation_type: OperationType,
    pub distance_km: f64,
    pub priority_score: f64,
}

impl StopReport {
    fn new(position: usize, stop: &DeliveryRequest) -> Self {
        Self {
            position,
            lat: stop.location().lat(),
            lon: stop.location().lon(),
            mass_kg: stop.mass_kg(),
            parcel_count: stop.parcel_count(),
            zone_class: stop.zone_class(),
            operation_type: stop.operation_type(),
            // Sequenced stops are always scored
            distance_km: stop.distance_km().unwrap_or_default(),
            priority_score: stop.priority_score().unwrap_or_default(),
        }
    }

    /// Marker popup text
    pub fn label(&self) -> String {
        format!("#{} - {} | Score: {:.2}", self.position, self.operation_type, self.priority_score)
    }

    pub fn marker_color(&self) -> &'static str {
        match self.operation_type {
            OperationType::Delivery => "blue",
            OperationType::Pickup | OperationType::Linked => "red",
        }
    }
}

/// Planned route as handed to the map renderer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport {
    pub origin: GeoPoint,
    pub evaluator: String,
    pub stops: Vec<StopReport>,
    /// `[lng, lat]` from the origin through every stop
    #[serde(skip)]
    pub route: Vec<[f64; 2]>,
}

impl PlanReport {
    pub fn new(origin: GeoPoint, evaluator: impl Into<String>, sequence: &OrderedSequence) -> Self {
        Self {
            origin,
            evaluator: evaluator.into(),
            stops: sequence
                .positioned()
                .map(|(position, stop)| StopReport::new(position, stop))
                .collect(),
            route: sequence.polyline(&origin),
        }
    }

    /// One line per stop, in visiting order
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for stop in &self.stops {
            out.push_str(&format!(
                "{}. ({:.6}, {:.6}) | distance: {:.2} km | score: {:.2} | {}\n",
                stop.position, stop.lat, stop.lon, stop.distance_km, stop.priority_score, stop.operation_type
            ));
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Start marker, one marker per stop, then the visiting-order line
    pub fn to_geojson(&self) -> Value {
        let mut features = Vec::with_capacity(self.stops.len() + 2);

        features.push(json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": self.origin.to_lng_lat() },
            "properties": { "role": "start", "label": "Start", "markerColor": "green" }
        }));

        for stop in &self.stops {
            features.push(json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [stop.lon, stop.lat] },
                "properties": {
                    "role": "stop",
                    "position": stop.position,
                    "label": stop.label(),
                    "markerColor": stop.marker_color(),
                    "distanceKm": stop.distance_km,
                    "priorityScore": stop.priority_score
                }
            }));
        }

        features.push(json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": self.route },
            "properties": { "role": "route" }
        }));

        json!({ "type": "FeatureCollection", "features": features })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::sequencer::sequence;

    fn origin() -> GeoPoint {
        GeoPoint::new(30.0444, 31.2357).unwrap()
    }

    fn stop(lat: f64, lon: f64, op: OperationType, distance: f64, score: f64) -> DeliveryRequest {
        DeliveryRequest::new(GeoPoint::new(lat, lon).unwrap(), 5.0, 2, ZoneClass::A, op)
            .unwrap()
            .scored(distance, score)
    }

    fn report() -> PlanReport {
        let ordered = sequence(vec![
            stop(30.07, 31.25, OperationType::Pickup, 3.2, 9.5),
            stop(30.05, 31.23, OperationType::Delivery, 1.1, 4.2),
        ])
        .unwrap();
        PlanReport::new(origin(), "Haversine", &ordered)
    }

    #[test]
    fn test_text_lists_stops_in_order() {
        let text = report().to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "1. (30.050000, 31.230000) | distance: 1.10 km | score: 4.20 | Delivery"
        );
        assert!(lines[1].starts_with("2. (30.070000, 31.250000)"));
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = report().to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["evaluator"], "Haversine");
        assert_eq!(value["origin"]["lat"], 30.0444);
        assert_eq!(value["stops"][0]["position"], 1);
        assert_eq!(value["stops"][0]["priorityScore"], 4.2);
        assert_eq!(value["stops"][1]["operationType"], "Pickup");
        assert_eq!(value["stops"][1]["zoneClass"], "A");
    }

    #[test]
    fn test_label_and_marker_color() {
        let report = report();
        assert_eq!(report.stops[1].label(), "#2 - Pickup | Score: 9.50");
        assert_eq!(report.stops[0].marker_color(), "blue");
        assert_eq!(report.stops[1].marker_color(), "red");
    }

    #[test]
    fn test_geojson_layout() {
        let geojson = report().to_geojson();
        let features = geojson["features"].as_array().unwrap();

        // start + 2 stops + route line
        assert_eq!(features.len(), 4);
        assert_eq!(features[0]["properties"]["role"], "start");
        assert_eq!(features[1]["properties"]["position"], 1);

        let line = features[3]["geometry"]["coordinates"].as_array().unwrap();
        assert_eq!(line.len(), 3);
        assert_eq!(line[0][0], 31.2357);
        assert_eq!(line[0][1], 30.0444);
    }

    #[test]
    fn test_empty_sequence_report() {
        let report = PlanReport::new(origin(), "Haversine", &OrderedSequence::default());
        assert!(report.to_text().is_empty());
        assert_eq!(report.to_geojson()["features"].as_array().unwrap().len(), 2);
    }
}
