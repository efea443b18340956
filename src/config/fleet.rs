//! Fleet configuration structures.

use serde::{Deserialize, Serialize};

/// Simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetConfig {
    /// Number of driver threads.
    #[serde(default = "default_drivers")]
    pub drivers: usize,
    /// Seed for the travel-time sampler.
    #[serde(default)]
    pub seed: u64,
    /// Pause in milliseconds before re-evaluating an infeasible head request
    /// that cannot usefully be deferred.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// Upper bound in milliseconds on the dispatcher's drain-phase wait.
    #[serde(default = "default_drain_poll_ms")]
    pub drain_poll_ms: u64,
}

fn default_drivers() -> usize {
    num_cpus::get()
}

const fn default_retry_backoff_ms() -> u64 {
    1
}

const fn default_drain_poll_ms() -> u64 {
    10
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            drivers: default_drivers(),
            seed: 0,
            retry_backoff_ms: default_retry_backoff_ms(),
            drain_poll_ms: default_drain_poll_ms(),
        }
    }
}

impl FleetConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.drivers == 0 {
            return Err("drivers must be greater than 0".into());
        }
        if self.retry_backoff_ms == 0 {
            return Err("retry_backoff_ms must be greater than 0".into());
        }
        if self.drain_poll_ms == 0 {
            return Err("drain_poll_ms must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse fleet configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Returns a description of the parse or validation failure.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
