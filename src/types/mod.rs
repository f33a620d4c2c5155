//! Type definitions

pub mod delivery;
pub mod geo_point;
pub mod record;

pub use delivery::*;
pub use geo_point::*;
pub use record::*;
