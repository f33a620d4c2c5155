//! Configuration management

use std::str::FromStr;

use anyhow::{self, Context, Result};

use crate::defaults::{DEFAULT_ORIGIN_LAT, DEFAULT_ORIGIN_LON, DEFAULT_ROUTING_TIMEOUT_SECONDS};
use crate::services::planner::UnavailablePolicy;
use crate::services::routing::ValhallaConfig;
use crate::types::GeoPoint;

/// Which distance evaluator to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DistanceBackend {
    #[default]
    Haversine,
    Valhalla,
}

impl FromStr for DistanceBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "haversine" => Ok(DistanceBackend::Haversine),
            "valhalla" => Ok(DistanceBackend::Valhalla),
            other => anyhow::bail!("Unknown distance backend '{}' (expected haversine or valhalla)", other),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Default depot when no origin is given on the command line
    pub origin: GeoPoint,

    /// Distance evaluator selection
    pub distance_backend: DistanceBackend,

    /// Valhalla routing engine URL (optional, falls back to Haversine if unavailable)
    pub valhalla_url: Option<String>,

    /// HTTP timeout for the routing engine
    pub routing_timeout_seconds: u64,

    /// Reaction to unroutable stops
    pub unavailable_policy: UnavailablePolicy,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup (env, tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let origin_lat = match var("ORIGIN_LAT") {
            Some(v) => v.trim().parse::<f64>().context("ORIGIN_LAT must be a number")?,
            None => DEFAULT_ORIGIN_LAT,
        };
        let origin_lon = match var("ORIGIN_LON") {
            Some(v) => v.trim().parse::<f64>().context("ORIGIN_LON must be a number")?,
            None => DEFAULT_ORIGIN_LON,
        };
        let origin = GeoPoint::new(origin_lat, origin_lon).context("ORIGIN_LAT/ORIGIN_LON out of range")?;

        let distance_backend = match var("DISTANCE_BACKEND") {
            Some(v) => v.parse()?,
            None => DistanceBackend::default(),
        };

        let valhalla_url = var("VALHALLA_URL");

        let routing_timeout_seconds = match var("ROUTING_TIMEOUT_SECONDS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .context("ROUTING_TIMEOUT_SECONDS must be a whole number of seconds")?,
            None => DEFAULT_ROUTING_TIMEOUT_SECONDS,
        };

        let unavailable_policy = match var("UNAVAILABLE_SENTINEL_KM") {
            Some(v) => {
                let km = v.trim().parse::<f64>().context("UNAVAILABLE_SENTINEL_KM must be a number")?;
                UnavailablePolicy::sentinel(km)
                    .with_context(|| format!("UNAVAILABLE_SENTINEL_KM must be finite and non-negative (got {})", km))?
            }
            None => UnavailablePolicy::Abort,
        };

        if distance_backend == DistanceBackend::Valhalla && valhalla_url.is_none() {
            tracing::warn!("DISTANCE_BACKEND=valhalla but VALHALLA_URL is not set");
        }

        Ok(Self {
            origin,
            distance_backend,
            valhalla_url,
            routing_timeout_seconds,
            unavailable_policy,
        })
    }

    pub fn valhalla_config(&self) -> Option<ValhallaConfig> {
        self.valhalla_url
            .as_ref()
            .map(|url| ValhallaConfig::new(url.as_str()).with_timeout(self.routing_timeout_seconds))
    }
}
