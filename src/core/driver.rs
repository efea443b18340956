//! Driver loop: wait for work, evaluate the head request, execute or defer.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::MutexGuard;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::board::{BoardState, DispatchBoard};
use crate::core::events::FleetAction;
use crate::core::request::Request;

/// Totals accumulated by one driver over a run.
///
/// Owned exclusively by its driver while the simulation runs; handed back to
/// the runtime on join, so no two threads ever touch the same record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverStats {
    /// Driver index, `0..fleet_size`.
    pub driver: usize,
    /// Passengers carried across all completed transfers.
    pub passengers: u64,
    /// Accumulated transit time across all completed transfers.
    pub drive_time: Duration,
}

impl DriverStats {
    fn new(driver: usize) -> Self {
        Self {
            driver,
            passengers: 0,
            drive_time: Duration::ZERO,
        }
    }

    fn record(&mut self, request: &Request) {
        self.passengers += u64::from(request.passengers);
        self.drive_time += request.travel_time;
    }
}

/// One consumer of the shared request pool.
pub struct Driver {
    id: usize,
    board: Arc<DispatchBoard>,
    retry_backoff: Duration,
}

impl Driver {
    /// Create a driver bound to a board.
    ///
    /// `retry_backoff` is the pause taken, with the lock released, before
    /// re-evaluating a head request that is infeasible and cannot usefully be
    /// deferred.
    #[must_use]
    pub fn new(id: usize, board: Arc<DispatchBoard>, retry_backoff: Duration) -> Self {
        Self {
            id,
            board,
            retry_backoff,
        }
    }

    /// Consume requests until shutdown is observed with an empty pool.
    ///
    /// The loop exits only on an empty pool, so every pending request is
    /// either executed or explicitly reported as starved before this returns.
    pub fn run(self) -> DriverStats {
        let mut stats = DriverStats::new(self.id);
        loop {
            let mut state = self.board.lock_state();
            while state.pool.is_empty() && !state.shutdown {
                debug!(driver = self.id, "waiting for work");
                self.board.wait_for_work(&mut state);
            }

            let Some(head) = state.pool.peek_head().copied() else {
                // Pool drained and shutdown raised.
                break;
            };

            if state.occupancy.has_capacity(head.origin, head.passengers) {
                self.execute(state, &head, &mut stats);
            } else if state.pool.defer_head() {
                state.stalled_rotations += 1;
                self.board.record(FleetAction::Deferred { request: head.id });
                debug!(
                    driver = self.id,
                    request = %head.id,
                    origin = head.origin,
                    needed = head.passengers,
                    "insufficient occupancy at origin, deferred"
                );
                if state.stalled_rotations >= state.pool.len() {
                    // A full lap rotated with occupancy unchanged: every
                    // pending request is infeasible right now.
                    self.handle_stalled_pool(state);
                }
            } else {
                // Sole remaining request with nothing to defer behind.
                self.handle_stalled_pool(state);
            }
        }

        debug!(
            driver = self.id,
            passengers = stats.passengers,
            "driver exiting"
        );
        stats
    }

    /// Run one feasible transfer: reserve at the origin, travel with the lock
    /// released, then release at the destination.
    fn execute(
        &self,
        mut state: MutexGuard<'_, BoardState>,
        request: &Request,
        stats: &mut DriverStats,
    ) {
        state.occupancy.reserve(request.origin, request.passengers);
        let _ = state.pool.remove_head();
        state.in_flight += request.passengers;
        state.stalled_rotations = 0;
        stats.record(request);
        self.board.record(FleetAction::Dispatched {
            request: request.id,
            driver: self.id,
        });
        debug!(
            driver = self.id,
            request = %request.id,
            passengers = request.passengers,
            origin = request.origin,
            destination = request.destination,
            travel = ?request.travel_time,
            "transfer departed"
        );
        drop(state);

        // In transit: no lock held, the passengers are counted at neither
        // hotel until arrival.
        thread::sleep(request.travel_time);

        let mut state = self.board.lock_state();
        state.occupancy.release(request.destination, request.passengers);
        state.in_flight -= request.passengers;
        state.stalled_rotations = 0;
        drop(state);

        // Occupancy changed: deferred heads may be feasible now, and the
        // dispatcher's drain wait wants to re-check the pool.
        self.board.notify_all();
        self.board.record(FleetAction::Completed {
            request: request.id,
            driver: self.id,
        });
    }

    /// Every pending request is currently infeasible. Either wait for the
    /// world to change, or prove it never will and report the remainder.
    fn handle_stalled_pool(&self, mut state: MutexGuard<'_, BoardState>) {
        if state.progress_possible() {
            // More input may arrive or a transfer in transit will release
            // units. Retry later; never spin while holding the lock.
            state.stalled_rotations = 0;
            drop(state);
            thread::sleep(self.retry_backoff);
            return;
        }

        // Intake is closed and nothing is in flight: occupancy is final, so
        // the remaining requests can never be satisfied.
        let stranded = state.pool.drain();
        for request in &stranded {
            warn!(
                driver = self.id,
                request = %request.id,
                origin = request.origin,
                needed = request.passengers,
                "request can never be satisfied, reporting as starved"
            );
            self.board.record(FleetAction::Starved {
                request: request.id,
            });
        }
        state.starved.extend(stranded);
        state.stalled_rotations = 0;
        drop(state);

        // Pool is now empty: wake the dispatcher so it can raise shutdown,
        // and any waiting drivers so they can observe it.
        self.board.notify_all();
    }
}
