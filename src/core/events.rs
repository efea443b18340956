//! Dispatch lifecycle event log.
//!
//! Provides an in-memory sink for tests and diagnostics; runs that don't
//! attach a sink pay nothing beyond an `Option` check.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::core::request::HotelId;
use crate::util::clock::now_ms;

/// One step in the life of the fleet or a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FleetAction {
    /// The dispatcher admitted a request into the pool.
    Enqueued {
        /// Request id.
        request: Uuid,
        /// Origin hotel.
        origin: HotelId,
        /// Destination hotel.
        destination: HotelId,
        /// Passengers to move.
        passengers: u32,
    },
    /// A driver reserved occupancy and departed with the request.
    Dispatched {
        /// Request id.
        request: Uuid,
        /// Executing driver.
        driver: usize,
    },
    /// A driver delivered the passengers to the destination.
    Completed {
        /// Request id.
        request: Uuid,
        /// Executing driver.
        driver: usize,
    },
    /// An infeasible head request was rotated to the tail.
    Deferred {
        /// Request id.
        request: Uuid,
    },
    /// A request was removed as permanently unsatisfiable.
    Starved {
        /// Request id.
        request: Uuid,
    },
    /// The request source reported end-of-stream.
    IntakeClosed,
    /// The shutdown flag was raised.
    ShutdownRaised,
}

/// A recorded event with its wall-clock timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetEvent {
    /// Milliseconds since the Unix epoch.
    pub at_ms: u128,
    /// What happened.
    pub action: FleetAction,
}

impl FleetEvent {
    /// Stamp an action with the current time.
    #[must_use]
    pub fn now(action: FleetAction) -> Self {
        Self {
            at_ms: now_ms(),
            action,
        }
    }
}

/// Event sink abstraction.
pub trait EventSink: Send {
    /// Record one event.
    fn record(&mut self, event: FleetEvent);
}

/// In-memory event sink with a bounded buffer.
///
/// Clones share storage, so a test can keep one handle and pass the other to
/// the board, then read back what the run recorded.
#[derive(Clone)]
pub struct InMemoryEventSink {
    events: Arc<Mutex<VecDeque<FleetEvent>>>,
    max_events: usize,
}

impl InMemoryEventSink {
    /// Create a sink retaining at most `max_events` (oldest dropped first).
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Arc::new(Mutex::new(VecDeque::with_capacity(max_events.min(1024)))),
            max_events,
        }
    }

    /// Snapshot of the recorded events, in order.
    #[must_use]
    pub fn events(&self) -> Vec<FleetEvent> {
        self.events.lock().iter().cloned().collect()
    }

    /// Snapshot of only the actions, in order.
    #[must_use]
    pub fn actions(&self) -> Vec<FleetAction> {
        self.events.lock().iter().map(|e| e.action.clone()).collect()
    }
}

impl EventSink for InMemoryEventSink {
    fn record(&mut self, event: FleetEvent) {
        let mut events = self.events.lock();
        if events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_storage() {
        let sink = InMemoryEventSink::new(8);
        let mut writer = sink.clone();
        writer.record(FleetEvent::now(FleetAction::IntakeClosed));

        let actions = sink.actions();
        assert_eq!(actions, vec![FleetAction::IntakeClosed]);
    }

    #[test]
    fn test_bounded_buffer_drops_oldest() {
        let mut sink = InMemoryEventSink::new(2);
        sink.record(FleetEvent::now(FleetAction::IntakeClosed));
        sink.record(FleetEvent::now(FleetAction::ShutdownRaised));
        sink.record(FleetEvent::now(FleetAction::IntakeClosed));

        let actions = sink.actions();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0], FleetAction::ShutdownRaised);
    }
}
