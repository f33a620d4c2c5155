//! Stop Sequencer - command-line planner
//!
//! Reads stops from a file, orders them by priority score and prints the
//! visiting sequence for a dispatcher or a map renderer.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{resolve_origin, scoring_weights, Cli, Command, OutputFormat};
use stop_sequencer::config::{Config, DistanceBackend};
use stop_sequencer::services::geo::haversine_distance;
use stop_sequencer::services::loader::load_requests;
use stop_sequencer::services::report::PlanReport;
use stop_sequencer::services::routing::{create_evaluator, create_evaluator_with_fallback};
use stop_sequencer::{plan, GeoPoint, PriorityScorer, UnavailablePolicy};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env before logging so LOGS_DIR / RUST_LOG can come from it
    dotenvy::dotenv().ok();
    let _guard = init_logging();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        return Err(e);
    }

    Ok(())
}

/// stderr always; daily-rotated file too when LOGS_DIR is set
fn init_logging() -> Option<WorkerGuard> {
    let (file_layer, guard) = match std::env::var("LOGS_DIR") {
        Ok(logs_dir) if !logs_dir.is_empty() => {
            std::fs::create_dir_all(&logs_dir).ok();
            let file_appender = RollingFileAppender::new(Rotation::DAILY, &logs_dir, "stop-sequencer.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    // LOG_FORMAT=json switches stderr to one JSON object per event
    let json = std::env::var("LOG_FORMAT").map(|v| v.eq_ignore_ascii_case("json")).unwrap_or(false);
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,stop_sequencer=debug".into()),
        ))
        .with(json_layer)
        .with(text_layer)
        .with(file_layer)
        .init();

    guard
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Plan {
            input,
            origin_lat,
            origin_lon,
            format,
            routing,
            strict_routing,
            sentinel_km,
            distance_weight,
            mass_weight,
            parcel_weight,
        } => {
            let config = Config::from_env()?;
            info!("Configuration loaded");

            let origin = resolve_origin(origin_lat, origin_lon, config.origin)?;

            let backend = routing.unwrap_or(config.distance_backend);
            let evaluator = if strict_routing {
                create_evaluator(backend, config.valhalla_config())?
            } else {
                create_evaluator_with_fallback(backend, config.valhalla_config()).await
            };
            if backend == DistanceBackend::Valhalla && evaluator.name() != "Valhalla" {
                info!("Requested Valhalla distances; running with {}", evaluator.name());
            }

            let policy = match sentinel_km {
                Some(km) => UnavailablePolicy::sentinel(km)
                    .with_context(|| format!("--sentinel-km must be finite and non-negative (got {})", km))?,
                None => config.unavailable_policy,
            };

            let weights = scoring_weights(distance_weight, mass_weight, parcel_weight)?;
            let scorer = PriorityScorer::new(weights);

            let requests = load_requests(&input)?;
            info!("Loaded {} requests from {}", requests.len(), input.display());

            let ordered = plan(&origin, requests, evaluator.as_ref(), &scorer, policy)
                .await
                .context("Planning failed")?;

            let report = PlanReport::new(origin, evaluator.name(), &ordered);
            match format {
                OutputFormat::Text => print!("{}", report.to_text()),
                OutputFormat::Json => println!("{}", report.to_json()?),
                OutputFormat::Geojson => println!("{}", serde_json::to_string_pretty(&report.to_geojson())?),
            }
            Ok(())
        }
        Command::Score {
            distance_km,
            mass_kg,
            parcels,
            zone,
            operation_type,
        } => {
            if !distance_km.is_finite() || distance_km < 0.0 {
                anyhow::bail!("--distance-km must be finite and non-negative (got {})", distance_km);
            }
            if !mass_kg.is_finite() || mass_kg < 0.0 {
                anyhow::bail!("--mass-kg must be finite and non-negative (got {})", mass_kg);
            }

            let score = PriorityScorer::default().score_raw(distance_km, mass_kg, parcels, &zone, &operation_type);
            println!("{:.2}", score);
            Ok(())
        }
        Command::Distance {
            from_lat,
            from_lon,
            to_lat,
            to_lon,
        } => {
            let from = GeoPoint::new(from_lat, from_lon).context("Invalid --from point")?;
            let to = GeoPoint::new(to_lat, to_lon).context("Invalid --to point")?;
            println!("{:.3}", haversine_distance(&from, &to));
            Ok(())
        }
    }
}
