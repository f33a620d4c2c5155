//! Planning pipeline: distance -> score -> order
//!
//! The caller owns the request collection; nothing here keeps state
//! between runs.

use tracing::{debug, info, warn};

use crate::error::{PlannerError, PlannerResult};
use crate::services::routing::DistanceEvaluator;
use crate::services::scoring::PriorityScorer;
use crate::services::sequencer::{sequence, OrderedSequence};
use crate::types::{DeliveryRequest, GeoPoint};

/// What to do when the evaluator cannot produce a distance
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum UnavailablePolicy {
    /// Propagate `DistanceUnavailable` and stop the run
    #[default]
    Abort,
    /// Substitute this distance (km) and keep going
    Sentinel(f64),
}

impl UnavailablePolicy {
    /// Sentinel policy; `None` unless `km` is finite and non-negative
    pub fn sentinel(km: f64) -> Option<Self> {
        (km.is_finite() && km >= 0.0).then_some(UnavailablePolicy::Sentinel(km))
    }

    fn resolve(&self, evaluator: &str, index: usize, distance: PlannerResult<f64>) -> PlannerResult<f64> {
        // Evaluators are pluggable; anything but a finite non-negative km is no distance
        let distance = distance.and_then(|km| {
            if km.is_finite() && km >= 0.0 {
                Ok(km)
            } else {
                Err(PlannerError::unavailable(format!(
                    "{} returned invalid distance {} for request {}",
                    evaluator, km, index
                )))
            }
        });

        match (distance, self) {
            (Ok(km), _) => Ok(km),
            (Err(PlannerError::DistanceUnavailable { reason }), UnavailablePolicy::Sentinel(km)) => {
                warn!("Distance unavailable for request {} ({}); using sentinel {} km", index, reason, km);
                Ok(*km)
            }
            (Err(e), _) => Err(e),
        }
    }
}

/// Attach distance and score to every request, in input order
pub async fn score_requests(
    origin: &GeoPoint,
    requests: Vec<DeliveryRequest>,
    evaluator: &dyn DistanceEvaluator,
    scorer: &PriorityScorer,
    policy: UnavailablePolicy,
) -> PlannerResult<Vec<DeliveryRequest>> {
    let targets: Vec<GeoPoint> = requests.iter().map(|r| r.location()).collect();
    let distances = evaluator.distances_from(origin, &targets).await;

    if distances.len() != requests.len() {
        return Err(PlannerError::unavailable(format!(
            "{} returned {} distances for {} requests",
            evaluator.name(),
            distances.len(),
            requests.len()
        )));
    }

    requests
        .into_iter()
        .zip(distances)
        .enumerate()
        .map(|(index, (request, distance))| -> PlannerResult<DeliveryRequest> {
            let distance_km = policy.resolve(evaluator.name(), index, distance)?;
            let priority_score = scorer.score_request(&request, distance_km);
            debug!(
                "Request {} at ({:.6}, {:.6}): {:.2} km, score {:.2}",
                index,
                request.location().lat(),
                request.location().lon(),
                distance_km,
                priority_score
            );
            Ok(request.scored(distance_km, priority_score))
        })
        .collect()
}

/// Score `requests` against `origin` and return them in visiting order
pub async fn plan(
    origin: &GeoPoint,
    requests: Vec<DeliveryRequest>,
    evaluator: &dyn DistanceEvaluator,
    scorer: &PriorityScorer,
    policy: UnavailablePolicy,
) -> PlannerResult<OrderedSequence> {
    info!("Planning {} requests with {} distances", requests.len(), evaluator.name());

    let scored = score_requests(origin, requests, evaluator, scorer, policy).await?;
    sequence(scored)
}
