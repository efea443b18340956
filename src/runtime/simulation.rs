//! Simulation assembly, thread orchestration, and the final report.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::FleetConfig;
use crate::core::board::DispatchBoard;
use crate::core::dispatcher::Dispatcher;
use crate::core::driver::{Driver, DriverStats};
use crate::core::error::FleetError;
use crate::core::request::{Request, RequestSource};
use crate::util::jitter::TravelJitter;

/// Read-only outcome of a finished run.
///
/// Assembled only after every driver has joined, so nothing in here is ever
/// observed mid-mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetReport {
    /// Per-driver totals, indexed by driver id.
    pub drivers: Vec<DriverStats>,
    /// Final guest count per hotel.
    pub final_occupancy: Vec<u32>,
    /// Requests that could never be satisfied and were abandoned.
    pub starved: Vec<Request>,
}

impl FleetReport {
    /// Passengers carried across the whole fleet.
    #[must_use]
    pub fn total_passengers(&self) -> u64 {
        self.drivers.iter().map(|d| d.passengers).sum()
    }

    /// Accumulated transit time across the whole fleet.
    #[must_use]
    pub fn total_drive_time(&self) -> Duration {
        self.drivers.iter().map(|d| d.drive_time).sum()
    }
}

/// A configured simulation, ready to consume one request source.
pub struct Simulation {
    config: FleetConfig,
    board: Arc<DispatchBoard>,
    jitter: Box<dyn TravelJitter>,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("config", &self.config)
            .field("board", &"<DispatchBoard>")
            .field("jitter", &"<dyn TravelJitter>")
            .finish()
    }
}

impl Simulation {
    pub(crate) fn from_parts(
        config: FleetConfig,
        board: Arc<DispatchBoard>,
        jitter: Box<dyn TravelJitter>,
    ) -> Self {
        Self {
            config,
            board,
            jitter,
        }
    }

    /// Handle to the shared board, for observing state while a run is live.
    #[must_use]
    pub fn board(&self) -> Arc<DispatchBoard> {
        Arc::clone(&self.board)
    }

    /// Spawn the fleet, dispatch the source to exhaustion, join every driver,
    /// and assemble the report.
    ///
    /// The dispatcher runs on the calling thread; drivers run on dedicated
    /// named OS threads. The report is read only after all of them joined.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::Spawn`] if a driver thread cannot be created and
    /// [`FleetError::DriverPanicked`] if one dies mid-run.
    pub fn run<S: RequestSource>(self, source: S) -> Result<FleetReport, FleetError> {
        let retry_backoff = Duration::from_millis(self.config.retry_backoff_ms);
        let drain_poll = Duration::from_millis(self.config.drain_poll_ms);

        let mut handles = Vec::with_capacity(self.config.drivers);
        for id in 0..self.config.drivers {
            let driver = Driver::new(id, Arc::clone(&self.board), retry_backoff);
            let spawned = thread::Builder::new()
                .name(format!("driver-{id}"))
                .spawn(move || driver.run());
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    // Already-running drivers would otherwise wait forever on
                    // a shutdown that no dispatcher will ever raise.
                    self.abort_fleet(handles);
                    return Err(FleetError::Spawn(e));
                }
            }
        }
        info!(drivers = self.config.drivers, "fleet started");

        Dispatcher::new(Arc::clone(&self.board), source, self.jitter, drain_poll).run();

        let mut drivers = Vec::with_capacity(handles.len());
        for (id, handle) in handles.into_iter().enumerate() {
            let stats = handle.join().map_err(|_| FleetError::DriverPanicked(id))?;
            debug!(
                driver = id,
                passengers = stats.passengers,
                "driver joined"
            );
            drivers.push(stats);
        }

        let state = self.board.lock_state();
        let report = FleetReport {
            drivers,
            final_occupancy: state.occupancy.snapshot(),
            starved: state.starved.clone(),
        };
        info!(
            passengers = report.total_passengers(),
            starved = report.starved.len(),
            "simulation finished"
        );
        Ok(report)
    }

    /// Raise shutdown without a dispatcher and reap whatever spawned.
    fn abort_fleet(&self, handles: Vec<thread::JoinHandle<DriverStats>>) {
        {
            let mut state = self.board.lock_state();
            state.intake_closed = true;
            state.shutdown = true;
        }
        self.board.notify_all();
        for handle in handles {
            let _ = handle.join();
        }
    }
}
