//! Assembles a [`Simulation`] from configuration and collaborators.

use std::sync::Arc;

use crate::config::FleetConfig;
use crate::core::board::DispatchBoard;
use crate::core::error::FleetError;
use crate::core::events::EventSink;
use crate::core::occupancy::OccupancyTable;
use crate::runtime::Simulation;
use crate::util::jitter::{TravelJitter, UniformJitter};

/// Builder wiring configuration, occupancy, and optional collaborators into
/// a ready-to-run [`Simulation`].
pub struct SimulationBuilder {
    config: FleetConfig,
    occupancy: Vec<u32>,
    events: Option<Box<dyn EventSink>>,
    jitter: Option<Box<dyn TravelJitter>>,
}

impl SimulationBuilder {
    /// Start from a configuration.
    #[must_use]
    pub fn new(config: FleetConfig) -> Self {
        Self {
            config,
            occupancy: Vec::new(),
            events: None,
            jitter: None,
        }
    }

    /// Initial guest count per hotel.
    #[must_use]
    pub fn with_occupancy(mut self, occupancy: Vec<u32>) -> Self {
        self.occupancy = occupancy;
        self
    }

    /// Attach an event sink recording the dispatch lifecycle.
    #[must_use]
    pub fn with_events(mut self, sink: Box<dyn EventSink>) -> Self {
        self.events = Some(sink);
        self
    }

    /// Replace the default seeded sampler with a custom one.
    #[must_use]
    pub fn with_jitter(mut self, jitter: Box<dyn TravelJitter>) -> Self {
        self.jitter = Some(jitter);
        self
    }

    /// Validate the configuration and assemble the simulation.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::InvalidConfig`] when validation fails.
    pub fn build(self) -> Result<Simulation, FleetError> {
        self.config.validate().map_err(FleetError::InvalidConfig)?;

        let mut board = DispatchBoard::new(OccupancyTable::new(self.occupancy));
        if let Some(sink) = self.events {
            board = board.with_events(sink);
        }
        let jitter = self
            .jitter
            .unwrap_or_else(|| Box::new(UniformJitter::seeded(self.config.seed)));

        Ok(Simulation::from_parts(
            self.config,
            Arc::new(board),
            jitter,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_is_rejected() {
        let cfg = FleetConfig {
            drivers: 0,
            ..FleetConfig::default()
        };
        let err = SimulationBuilder::new(cfg).build().unwrap_err();
        assert!(matches!(err, FleetError::InvalidConfig(_)));
    }

    #[test]
    fn test_builds_with_defaults() {
        let sim = SimulationBuilder::new(FleetConfig::default())
            .with_occupancy(vec![3, 3])
            .build()
            .unwrap();
        let board = sim.board();
        let state = board.lock_state();
        assert_eq!(state.occupancy.hotel_count(), 2);
        assert!(state.pool.is_empty());
    }
}
