//! Planner error taxonomy

use thiserror::Error;

/// Errors raised by the scoring-and-sequencing core.
///
/// Unrecognized zone or operation values are never errors; they resolve
/// to their default factor where they are parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    #[error("invalid coordinate ({lat}, {lon}): latitude must be in [-90, 90] and longitude in [-180, 180]")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("invalid mass {mass} kg: must be a finite, non-negative number")]
    InvalidMass { mass: f64 },

    #[error("distance unavailable: {reason}")]
    DistanceUnavailable { reason: String },

    #[error("request at index {index} has no computed distance/score")]
    MissingScore { index: usize },
}

impl PlannerError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        PlannerError::DistanceUnavailable { reason: reason.into() }
    }
}

pub type PlannerResult<T> = std::result::Result<T, PlannerError>;
