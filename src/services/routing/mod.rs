//! Distance evaluators
//!
//! Haversine (great-circle) by default, Valhalla road distance when configured.

mod valhalla;

pub use valhalla::{ValhallaConfig, ValhallaEvaluator};

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::DistanceBackend;
use crate::error::PlannerResult;
use crate::services::geo::haversine_distance;
use crate::types::GeoPoint;

/// Source of origin-to-stop distances.
///
/// Implementations return a finite, non-negative kilometer value or
/// `PlannerError::DistanceUnavailable`. They never retry.
#[async_trait]
pub trait DistanceEvaluator: Send + Sync {
    /// Distance from `origin` to `target` in kilometers
    async fn distance_km(&self, origin: &GeoPoint, target: &GeoPoint) -> PlannerResult<f64>;

    /// Distances from `origin` to every target, parallel to `targets`.
    ///
    /// The default evaluates one target at a time, in order.
    async fn distances_from(&self, origin: &GeoPoint, targets: &[GeoPoint]) -> Vec<PlannerResult<f64>> {
        let mut distances = Vec::with_capacity(targets.len());
        for target in targets {
            distances.push(self.distance_km(origin, target).await);
        }
        distances
    }

    /// Get evaluator name for logging
    fn name(&self) -> &str;
}

/// Great-circle distance evaluator
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineEvaluator;

impl HaversineEvaluator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DistanceEvaluator for HaversineEvaluator {
    async fn distance_km(&self, origin: &GeoPoint, target: &GeoPoint) -> PlannerResult<f64> {
        Ok(haversine_distance(origin, target))
    }

    fn name(&self) -> &str {
        "Haversine"
    }
}

/// Create the evaluator for `backend` without probing the network
pub fn create_evaluator(
    backend: DistanceBackend,
    valhalla: Option<ValhallaConfig>,
) -> Result<Box<dyn DistanceEvaluator>> {
    match (backend, valhalla) {
        (DistanceBackend::Valhalla, Some(cfg)) => Ok(Box::new(ValhallaEvaluator::new(cfg)?)),
        (DistanceBackend::Valhalla, None) => {
            anyhow::bail!("Valhalla backend requested but VALHALLA_URL is not set")
        }
        (DistanceBackend::Haversine, _) => Ok(Box::new(HaversineEvaluator::new())),
    }
}

/// Create evaluator with Valhalla health check and Haversine fallback
///
/// Falls back to Haversine if Valhalla is not requested, not configured,
/// or does not answer its status endpoint.
pub async fn create_evaluator_with_fallback(
    backend: DistanceBackend,
    valhalla: Option<ValhallaConfig>,
) -> Box<dyn DistanceEvaluator> {
    if backend == DistanceBackend::Valhalla {
        match valhalla {
            Some(cfg) => {
                let url = cfg.base_url.clone();
                match check_valhalla_health(&cfg).await {
                    Ok(()) => match ValhallaEvaluator::new(cfg) {
                        Ok(evaluator) => {
                            info!("Valhalla routing available at {}", url);
                            return Box::new(evaluator);
                        }
                        Err(e) => warn!("Failed to build Valhalla client: {:#}. Falling back to Haversine.", e),
                    },
                    Err(e) => {
                        warn!("Valhalla not available at {}: {:#}. Falling back to Haversine.", url, e);
                    }
                }
            }
            None => warn!("Valhalla backend requested but VALHALLA_URL is not set"),
        }
    }

    info!("Using Haversine distance evaluator");
    Box::new(HaversineEvaluator::new())
}

/// Check if Valhalla is healthy by making a simple status request
async fn check_valhalla_health(config: &ValhallaConfig) -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()?;

    let url = format!("{}/status", config.base_url);
    let response = client.get(&url).send().await?;

    if response.status().is_success() {
        Ok(())
    } else {
        anyhow::bail!("Valhalla returned status {}", response.status())
    }
}
