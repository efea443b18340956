//! Dispatcher loop: the single producer feeding the shared pool.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::core::board::DispatchBoard;
use crate::core::events::FleetAction;
use crate::core::request::{Request, RequestSource};
use crate::util::jitter::TravelJitter;

/// The single producer: admits records from a [`RequestSource`], stamps each
/// with a sampled travel time, and runs the cooperative shutdown protocol.
pub struct Dispatcher<S: RequestSource> {
    board: Arc<DispatchBoard>,
    source: S,
    jitter: Box<dyn TravelJitter>,
    drain_poll: Duration,
}

impl<S: RequestSource> Dispatcher<S> {
    /// Create a dispatcher over a board and a request source.
    ///
    /// `drain_poll` bounds how long the dispatcher parks while waiting for
    /// drivers to drain the pool after the source is exhausted.
    #[must_use]
    pub fn new(
        board: Arc<DispatchBoard>,
        source: S,
        jitter: Box<dyn TravelJitter>,
        drain_poll: Duration,
    ) -> Self {
        Self {
            board,
            source,
            jitter,
            drain_poll,
        }
    }

    /// Feed the pool until the source is exhausted and the pool has drained,
    /// then raise shutdown and return.
    pub fn run(mut self) {
        info!("dispatcher started");
        loop {
            // Read outside the lock. There is exactly one producer, so the
            // admission order is unchanged, and a source that blocks (a live
            // feed) cannot stall the drivers while it waits.
            let spec = self.source.next_request();

            let mut state = self.board.lock_state();
            if let Some(spec) = spec {
                let travel_ms = self
                    .jitter
                    .sample_ms(spec.min_travel_ms, spec.max_travel_ms);
                let request = Request::new(
                    spec.origin,
                    spec.destination,
                    spec.passengers,
                    Duration::from_millis(travel_ms),
                );
                state.pool.enqueue(request);
                state.stalled_rotations = 0;
                self.board.record(FleetAction::Enqueued {
                    request: request.id,
                    origin: request.origin,
                    destination: request.destination,
                    passengers: request.passengers,
                });
                debug!(
                    request = %request.id,
                    origin = request.origin,
                    destination = request.destination,
                    passengers = request.passengers,
                    travel_ms = travel_ms,
                    pending = state.pool.len(),
                    "request admitted"
                );
            } else {
                if !state.intake_closed {
                    state.intake_closed = true;
                    info!("request intake closed");
                    self.board.record(FleetAction::IntakeClosed);
                }
                if state.pool.is_empty() && !state.shutdown {
                    state.shutdown = true;
                    info!("no pending work remains, shutdown raised");
                    self.board.record(FleetAction::ShutdownRaised);
                }
            }

            // Broadcast every cycle, whether or not work was added: waiters
            // blocked on an empty pool must re-check the shutdown flag too.
            self.board.notify_all();

            if state.shutdown {
                break;
            }
            if state.intake_closed {
                // Pool still draining. Park until a driver reports progress
                // instead of re-polling the exhausted source in a hot loop.
                self.board.wait_for_progress(&mut state, self.drain_poll);
            }
        }
        info!("dispatcher finished");
    }
}
