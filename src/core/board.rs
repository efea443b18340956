//! The synchronization gate shared by the dispatcher and every driver.

use std::time::Duration;

use parking_lot::{Condvar, Mutex, MutexGuard};

use crate::core::events::{EventSink, FleetAction, FleetEvent};
use crate::core::occupancy::OccupancyTable;
use crate::core::pool::RequestPool;
use crate::core::request::Request;

/// Everything guarded by the board lock.
///
/// The pool, the occupancy table, and both protocol flags form one critical
/// section: none of them is read or written without the lock. The only
/// deliberate gap is simulated transit, when a transfer's units live solely in
/// the executing driver's stack frame and the `in_flight` gauge.
pub struct BoardState {
    /// Pending transfer requests.
    pub pool: RequestPool,
    /// Per-hotel available guests.
    pub occupancy: OccupancyTable,
    /// Set once when the request source reports end-of-stream.
    pub intake_closed: bool,
    /// Raised exactly once, after intake closed with an empty pool.
    pub shutdown: bool,
    /// Passenger-units currently in transit, counted at neither hotel.
    pub in_flight: u32,
    /// Consecutive head deferrals since the last departure, release, or
    /// enqueue. A value reaching the pool length means a full lap was rotated
    /// against unchanged occupancy.
    pub stalled_rotations: usize,
    /// Requests removed as permanently unsatisfiable.
    pub starved: Vec<Request>,
}

impl BoardState {
    fn new(occupancy: OccupancyTable) -> Self {
        Self {
            pool: RequestPool::new(),
            occupancy,
            intake_closed: false,
            shutdown: false,
            in_flight: 0,
            stalled_rotations: 0,
            starved: Vec::new(),
        }
    }

    /// Total passenger-units the simulation currently accounts for: guests at
    /// hotels plus units in transit. Constant across a run.
    #[must_use]
    pub fn units_accounted(&self) -> u64 {
        self.occupancy.total_units() + u64::from(self.in_flight)
    }

    /// Whether occupancy can still change: more requests may arrive, or a
    /// transfer in transit will release units on arrival. Once neither holds,
    /// a request the current table cannot satisfy never becomes satisfiable.
    #[must_use]
    pub const fn progress_possible(&self) -> bool {
        !self.intake_closed || self.in_flight > 0
    }
}

/// The single mutex + condvar gate coordinating the dispatcher and drivers.
///
/// The condvar carries one meaning, "state changed, re-check your predicate",
/// and is always broadcast. Waiters decide for themselves whether the wake
/// brought new work, shutdown, or neither.
pub struct DispatchBoard {
    state: Mutex<BoardState>,
    work_signal: Condvar,
    events: Option<Mutex<Box<dyn EventSink>>>,
}

impl DispatchBoard {
    /// Create a board over an initial occupancy table.
    #[must_use]
    pub fn new(occupancy: OccupancyTable) -> Self {
        Self {
            state: Mutex::new(BoardState::new(occupancy)),
            work_signal: Condvar::new(),
            events: None,
        }
    }

    /// Attach an event sink.
    #[must_use]
    pub fn with_events(mut self, sink: Box<dyn EventSink>) -> Self {
        self.events = Some(Mutex::new(sink));
        self
    }

    /// Acquire the board lock.
    pub fn lock_state(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock()
    }

    /// Block until the next broadcast. Releases the lock while waiting and
    /// reacquires it before returning; callers re-check their predicate.
    pub fn wait_for_work(&self, state: &mut MutexGuard<'_, BoardState>) {
        self.work_signal.wait(state);
    }

    /// Like [`DispatchBoard::wait_for_work`] with an upper bound, for waiters
    /// that also want to re-poll on their own schedule. Returns `true` if the
    /// wait timed out rather than being signalled.
    pub fn wait_for_progress(
        &self,
        state: &mut MutexGuard<'_, BoardState>,
        timeout: Duration,
    ) -> bool {
        self.work_signal.wait_for(state, timeout).timed_out()
    }

    /// Wake every waiter.
    pub fn notify_all(&self) {
        self.work_signal.notify_all();
    }

    /// Record an action to the attached sink, if any.
    ///
    /// The sink mutex is a leaf lock: it is never held while acquiring the
    /// state lock, so recording under the state lock cannot deadlock.
    pub fn record(&self, action: FleetAction) {
        if let Some(sink) = &self.events {
            sink.lock().record(FleetEvent::now(action));
        }
    }
}
