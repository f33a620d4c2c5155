//! CLI argument parsing for the stop-sequencer binary.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use stop_sequencer::config::DistanceBackend;
use stop_sequencer::defaults::{DEFAULT_OPERATION_TYPE, DEFAULT_ZONE_CLASS};
use stop_sequencer::{GeoPoint, ScoringWeights};

#[derive(Parser)]
#[command(name = "stop-sequencer", about = "Order delivery and pickup stops by priority score")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Geojson,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score and order the stops in an input file
    Plan {
        /// JSON array or CSV file of stops
        #[arg(long, short)]
        input: PathBuf,
        /// Origin latitude (defaults to ORIGIN_LAT or the Cairo depot)
        #[arg(long, allow_hyphen_values = true)]
        origin_lat: Option<f64>,
        /// Origin longitude
        #[arg(long, allow_hyphen_values = true)]
        origin_lon: Option<f64>,
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Distance evaluator (defaults to DISTANCE_BACKEND)
        #[arg(long, value_enum)]
        routing: Option<DistanceBackend>,
        /// Fail instead of falling back to Haversine when Valhalla is down
        #[arg(long)]
        strict_routing: bool,
        /// Distance to substitute for unroutable stops instead of aborting
        #[arg(long)]
        sentinel_km: Option<f64>,
        #[arg(long)]
        distance_weight: Option<f64>,
        #[arg(long)]
        mass_weight: Option<f64>,
        #[arg(long)]
        parcel_weight: Option<f64>,
    },
    /// Print the priority score of a single stop
    Score {
        #[arg(long)]
        distance_km: f64,
        #[arg(long)]
        mass_kg: f64,
        #[arg(long)]
        parcels: u32,
        /// Zone class A, B or C (anything else scores as B)
        #[arg(long, default_value = DEFAULT_ZONE_CLASS)]
        zone: String,
        /// Delivery, Pickup or Linked (anything else scores as Delivery)
        #[arg(long = "type", default_value = DEFAULT_OPERATION_TYPE)]
        operation_type: String,
    },
    /// Print the great-circle distance between two points
    Distance {
        #[arg(long, allow_hyphen_values = true)]
        from_lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        from_lon: f64,
        #[arg(long, allow_hyphen_values = true)]
        to_lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        to_lon: f64,
    },
}

/// Origin from `--origin-lat`/`--origin-lon`, both or neither; `fallback` when neither
pub fn resolve_origin(lat: Option<f64>, lon: Option<f64>, fallback: GeoPoint) -> Result<GeoPoint> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => GeoPoint::new(lat, lon).context("Invalid origin"),
        (None, None) => Ok(fallback),
        _ => bail!("--origin-lat and --origin-lon must be given together"),
    }
}

/// Scoring weights with CLI overrides; each must be finite and non-negative
pub fn scoring_weights(distance: Option<f64>, mass: Option<f64>, parcels: Option<f64>) -> Result<ScoringWeights> {
    let defaults = ScoringWeights::default();
    let weights = ScoringWeights {
        distance: distance.unwrap_or(defaults.distance),
        mass: mass.unwrap_or(defaults.mass),
        parcels: parcels.unwrap_or(defaults.parcels),
    };
    for (name, w) in [("distance", weights.distance), ("mass", weights.mass), ("parcel", weights.parcels)] {
        if !w.is_finite() || w < 0.0 {
            bail!("--{}-weight must be finite and non-negative (got {})", name, w);
        }
    }
    Ok(weights)
}
