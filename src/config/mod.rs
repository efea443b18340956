//! Configuration models for the fleet and its timing knobs.

pub mod fleet;

pub use fleet::FleetConfig;
