//! Visiting-order sequencer
//!
//! Stable ascending sort by priority score. Requests must already carry
//! their distance and score; an unscored request is a caller bug and is
//! rejected before anything is sorted.

use crate::error::{PlannerError, PlannerResult};
use crate::types::{DeliveryRequest, GeoPoint};

/// Scored requests in visiting order (index 0 is visited first)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedSequence {
    stops: Vec<DeliveryRequest>,
}

impl OrderedSequence {
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn as_slice(&self) -> &[DeliveryRequest] {
        &self.stops
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DeliveryRequest> {
        self.stops.iter()
    }

    /// Stops with their 1-based display position
    pub fn positioned(&self) -> impl Iterator<Item = (usize, &DeliveryRequest)> {
        self.stops.iter().enumerate().map(|(i, stop)| (i + 1, stop))
    }

    /// Origin followed by each stop in visiting order, as `[lng, lat]`
    pub fn polyline(&self, origin: &GeoPoint) -> Vec<[f64; 2]> {
        std::iter::once(origin.to_lng_lat())
            .chain(self.stops.iter().map(|stop| stop.location().to_lng_lat()))
            .collect()
    }

    pub fn into_vec(self) -> Vec<DeliveryRequest> {
        self.stops
    }
}

impl IntoIterator for OrderedSequence {
    type Item = DeliveryRequest;
    type IntoIter = std::vec::IntoIter<DeliveryRequest>;

    fn into_iter(self) -> Self::IntoIter {
        self.stops.into_iter()
    }
}

impl<'a> IntoIterator for &'a OrderedSequence {
    type Item = &'a DeliveryRequest;
    type IntoIter = std::slice::Iter<'a, DeliveryRequest>;

    fn into_iter(self) -> Self::IntoIter {
        self.stops.iter()
    }
}

/// Order scored requests by ascending priority score.
///
/// Equal scores keep their input order. Fails with `MissingScore` naming
/// the first request without a distance or score.
pub fn sequence(requests: Vec<DeliveryRequest>) -> PlannerResult<OrderedSequence> {
    let mut keyed = Vec::with_capacity(requests.len());
    for (index, request) in requests.into_iter().enumerate() {
        match (request.distance_km(), request.priority_score()) {
            // -0.0 keys as 0.0 so equal scores stay tied under `total_cmp`
            (Some(_), Some(score)) => keyed.push((if score == 0.0 { 0.0 } else { score }, request)),
            _ => return Err(PlannerError::MissingScore { index }),
        }
    }

    // `sort_by` is stable
    keyed.sort_by(|(a, _), (b, _)| a.total_cmp(b));

    Ok(OrderedSequence {
        stops: keyed.into_iter().map(|(_, request)| request).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OperationType, ZoneClass};
    use proptest::prelude::*;

    fn request(lat: f64, mass: f64) -> DeliveryRequest {
        DeliveryRequest::new(
            GeoPoint::new(lat, 31.0).unwrap(),
            mass,
            1,
            ZoneClass::A,
            OperationType::Delivery,
        )
        .unwrap()
    }

    fn scored(lat: f64, score: f64) -> DeliveryRequest {
        request(lat, 1.0).scored(1.0, score)
    }

    #[test]
    fn test_sequence_empty() {
        let ordered = sequence(Vec::new()).unwrap();
        assert!(ordered.is_empty());
        assert_eq!(ordered.len(), 0);
    }

    #[test]
    fn test_sequence_single_unchanged() {
        let only = scored(30.0, 4.2);
        let ordered = sequence(vec![only.clone()]).unwrap();
        assert_eq!(ordered.as_slice(), &[only]);
    }

    #[test]
    fn test_sequence_ascending() {
        let ordered = sequence(vec![scored(30.0, 9.0), scored(30.1, 1.0), scored(30.2, 5.0)]).unwrap();
        let scores: Vec<f64> = ordered.iter().filter_map(|r| r.priority_score()).collect();
        assert_eq!(scores, vec![1.0, 5.0, 9.0]);
    }

    #[test]
    fn test_sequence_ties_keep_input_order() {
        let ordered = sequence(vec![
            scored(10.0, 2.0),
            scored(20.0, 1.0),
            scored(30.0, 2.0),
            scored(40.0, 1.0),
        ])
        .unwrap();

        let lats: Vec<f64> = ordered.iter().map(|r| r.location().lat()).collect();
        assert_eq!(lats, vec![20.0, 40.0, 10.0, 30.0]);
    }

    #[test]
    fn test_sequence_signed_zero_scores_are_ties() {
        let ordered = sequence(vec![scored(10.0, 0.0), scored(20.0, -0.0), scored(30.0, 0.0)]).unwrap();

        let lats: Vec<f64> = ordered.iter().map(|r| r.location().lat()).collect();
        assert_eq!(lats, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_sequence_rejects_unscored() {
        let result = sequence(vec![scored(30.0, 1.0), request(30.1, 1.0)]);
        assert_eq!(result, Err(PlannerError::MissingScore { index: 1 }));
    }

    #[test]
    fn test_positioned_is_one_based() {
        let ordered = sequence(vec![scored(30.0, 2.0), scored(31.0, 1.0)]).unwrap();
        let positions: Vec<(usize, f64)> = ordered
            .positioned()
            .map(|(n, r)| (n, r.location().lat()))
            .collect();
        assert_eq!(positions, vec![(1, 31.0), (2, 30.0)]);
    }

    #[test]
    fn test_polyline_starts_at_origin() {
        let origin = GeoPoint::new(30.0444, 31.2357).unwrap();
        let ordered = sequence(vec![scored(30.2, 2.0), scored(30.1, 1.0)]).unwrap();

        let line = ordered.polyline(&origin);
        assert_eq!(line, vec![[31.2357, 30.0444], [31.0, 30.1], [31.0, 30.2]]);
    }

    #[test]
    fn test_polyline_empty_sequence_is_origin_only() {
        let origin = GeoPoint::new(30.0444, 31.2357).unwrap();
        let line = OrderedSequence::default().polyline(&origin);
        assert_eq!(line, vec![[31.2357, 30.0444]]);
    }

    proptest! {
        #[test]
        fn prop_sequence_stable_for_equal_scores(scores in prop::collection::vec(0u8..4, 0..30)) {
            // Latitude encodes input position so input order is recoverable
            let requests: Vec<DeliveryRequest> = scores
                .iter()
                .enumerate()
                .map(|(i, s)| scored(i as f64, *s as f64))
                .collect();

            let ordered = sequence(requests).unwrap();
            prop_assert_eq!(ordered.len(), scores.len());

            let pairs: Vec<(f64, f64)> = ordered
                .iter()
                .map(|r| (r.priority_score().unwrap_or_default(), r.location().lat()))
                .collect();
            for window in pairs.windows(2) {
                prop_assert!(window[0].0 <= window[1].0);
                if window[0].0 == window[1].0 {
                    prop_assert!(window[0].1 < window[1].1);
                }
            }
        }
    }
}
