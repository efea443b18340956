//! Simulation runtime: thread orchestration and final reporting.

pub mod simulation;

pub use simulation::{FleetReport, Simulation};
