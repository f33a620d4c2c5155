//! Business logic services

pub mod geo;
pub mod loader;
pub mod planner;
pub mod report;
pub mod routing;
pub mod scoring;
pub mod sequencer;
