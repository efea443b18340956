//! Transfer request model and the producer-side source seam.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Index of a hotel in the occupancy table, `0..hotel_count`.
pub type HotelId = usize;

/// One transfer record as read from an external source.
///
/// Travel time is given as a half-open range; the dispatcher samples a
/// concrete duration from it when the request is admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Hotel the passengers depart from.
    pub origin: HotelId,
    /// Hotel the passengers are delivered to.
    pub destination: HotelId,
    /// Number of passengers to move.
    pub passengers: u32,
    /// Lower bound of the travel time, milliseconds.
    pub min_travel_ms: u64,
    /// Upper bound (exclusive) of the travel time, milliseconds.
    pub max_travel_ms: u64,
}

/// A transfer task admitted into the pool.
///
/// Immutable once created. Owned by whichever structure currently holds it:
/// the pool, or a driver's stack frame while the transfer is in transit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Identifier for log and event correlation.
    pub id: Uuid,
    /// Hotel the passengers depart from.
    pub origin: HotelId,
    /// Hotel the passengers are delivered to.
    pub destination: HotelId,
    /// Number of passengers to move.
    pub passengers: u32,
    /// Sampled transit duration.
    pub travel_time: Duration,
}

impl Request {
    /// Build a request with a fresh id and an already-sampled travel time.
    #[must_use]
    pub fn new(
        origin: HotelId,
        destination: HotelId,
        passengers: u32,
        travel_time: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            destination,
            passengers,
            travel_time,
        }
    }
}

/// Sequential stream of transfer records feeding the dispatcher.
///
/// `next_request` may block (a live feed waiting for input). `None` means
/// end-of-stream and must be fused: once a source reports exhaustion it must
/// keep reporting it, since the dispatcher polls again while the pool drains.
pub trait RequestSource: Send {
    /// Pull the next record, or `None` once the stream is exhausted.
    fn next_request(&mut self) -> Option<RequestSpec>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique() {
        let a = Request::new(0, 1, 3, Duration::from_millis(5));
        let b = Request::new(0, 1, 3, Duration::from_millis(5));
        assert_ne!(a.id, b.id);
        assert_eq!(a.passengers, b.passengers);
    }

    #[test]
    fn test_spec_roundtrips_through_serde() {
        let spec = RequestSpec {
            origin: 2,
            destination: 0,
            passengers: 7,
            min_travel_ms: 10,
            max_travel_ms: 40,
        };
        let json = serde_json::to_string(&spec).unwrap();
        let back: RequestSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, back);
    }
}
