//! Stop Sequencer - priority scoring and visiting order for delivery stops
//!
//! Distance from the origin, a weighted priority score, and a stable sort
//! by that score. The binary in `main.rs` wraps this with file input and
//! renderer-facing output.

pub mod config;
pub mod defaults;
pub mod error;
pub mod services;
pub mod types;

pub use error::{PlannerError, PlannerResult};
pub use services::planner::{plan, UnavailablePolicy};
pub use services::routing::{DistanceEvaluator, HaversineEvaluator};
pub use services::scoring::{PriorityScorer, ScoringWeights};
pub use services::sequencer::{sequence, OrderedSequence};
pub use types::{DeliveryRequest, GeoPoint, OperationType, ZoneClass};
