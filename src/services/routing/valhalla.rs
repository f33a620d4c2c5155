//! Valhalla road-distance evaluator
//!
//! Valhalla API documentation:
//! https://valhalla.github.io/valhalla/api/matrix/api-reference/

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::DistanceEvaluator;
use crate::defaults::DEFAULT_ROUTING_TIMEOUT_SECONDS;
use crate::error::{PlannerError, PlannerResult};
use crate::types::GeoPoint;

/// Valhalla client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ValhallaConfig {
    /// Base URL of Valhalla server (e.g., "http://localhost:8002")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ValhallaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8002".to_string(),
            timeout_seconds: DEFAULT_ROUTING_TIMEOUT_SECONDS,
        }
    }
}

impl ValhallaConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

/// Road distance from the Valhalla matrix service
pub struct ValhallaEvaluator {
    client: Client,
    config: ValhallaConfig,
}

impl ValhallaEvaluator {
    pub fn new(config: ValhallaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// One source (the origin), one target per stop
    fn build_matrix_request(&self, origin: &GeoPoint, targets: &[GeoPoint]) -> MatrixRequest {
        MatrixRequest {
            sources: vec![ValhallaLocation::from(origin)],
            targets: targets.iter().map(ValhallaLocation::from).collect(),
            costing: "auto".to_string(),
            units: "kilometers".to_string(),
        }
    }

    async fn fetch_matrix(&self, request: &MatrixRequest) -> PlannerResult<MatrixResponse> {
        let url = format!("{}/sources_to_targets", self.config.base_url);

        let response = self.client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| PlannerError::unavailable(format!("request to Valhalla failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PlannerError::unavailable(format!(
                "Valhalla returned error {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| PlannerError::unavailable(format!("failed to parse Valhalla response: {}", e)))
    }
}

/// Validate a matrix cell into a kilometer value
fn cell_distance(cell: Option<&MatrixCell>, target_idx: usize) -> PlannerResult<f64> {
    match cell.and_then(|c| c.distance) {
        Some(d) if d.is_finite() && d >= 0.0 => Ok(d),
        Some(d) => {
            warn!("Invalid distance {} for route 0 -> {}", d, target_idx);
            Err(PlannerError::unavailable(format!("invalid distance {} for target {}", d, target_idx)))
        }
        None => {
            warn!("No distance for route 0 -> {}", target_idx);
            Err(PlannerError::unavailable(format!("no route to target {}", target_idx)))
        }
    }
}

#[async_trait]
impl DistanceEvaluator for ValhallaEvaluator {
    async fn distance_km(&self, origin: &GeoPoint, target: &GeoPoint) -> PlannerResult<f64> {
        let request = self.build_matrix_request(origin, std::slice::from_ref(target));
        let response = self.fetch_matrix(&request).await?;
        let row = response.sources_to_targets.first();
        cell_distance(row.and_then(|r| r.first()), 0)
    }

    async fn distances_from(&self, origin: &GeoPoint, targets: &[GeoPoint]) -> Vec<PlannerResult<f64>> {
        if targets.is_empty() {
            return Vec::new();
        }

        debug!("Requesting distance row from Valhalla for {} targets", targets.len());

        let request = self.build_matrix_request(origin, targets);
        let response = match self.fetch_matrix(&request).await {
            Ok(response) => response,
            Err(e) => return vec![Err(e); targets.len()],
        };

        let row = response.sources_to_targets.first();
        (0..targets.len())
            .map(|j| cell_distance(row.and_then(|r| r.get(j)), j))
            .collect()
    }

    fn name(&self) -> &str {
        "Valhalla"
    }
}

// Valhalla API types

#[derive(Debug, Serialize)]
struct MatrixRequest {
    sources: Vec<ValhallaLocation>,
    targets: Vec<ValhallaLocation>,
    costing: String,
    units: String,
}

#[derive(Debug, Serialize, Clone)]
struct ValhallaLocation {
    lat: f64,
    lon: f64,
    /// Snap radius in meters; form-entered coordinates are often off-road
    #[serde(skip_serializing_if = "Option::is_none")]
    radius: Option<u32>,
}

impl From<&GeoPoint> for ValhallaLocation {
    fn from(point: &GeoPoint) -> Self {
        Self {
            lat: point.lat(),
            lon: point.lon(),
            radius: Some(500),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MatrixResponse {
    sources_to_targets: Vec<Vec<MatrixCell>>,
}

#[derive(Debug, Deserialize)]
struct MatrixCell {
    /// Distance in kilometers (when units="kilometers")
    distance: Option<f64>,
}
