//! Error types for simulation components.

use thiserror::Error;

/// Errors produced while assembling or running a simulation.
#[derive(Debug, Error)]
pub enum FleetError {
    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A driver thread could not be spawned.
    #[error("failed to spawn driver thread: {0}")]
    Spawn(#[from] std::io::Error),
    /// A driver thread panicked during the run.
    #[error("driver {0} panicked during the run")]
    DriverPanicked(usize),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
