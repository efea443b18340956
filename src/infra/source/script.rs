//! Scripted request source replaying a fixed record list.

use crate::core::request::{RequestSource, RequestSpec};
use crate::infra::scenario::Scenario;

/// Replays a pre-parsed list of records, then reports end-of-stream.
pub struct ScriptedSource {
    specs: std::vec::IntoIter<RequestSpec>,
}

impl ScriptedSource {
    /// Create a source over a record list.
    #[must_use]
    pub fn new(specs: Vec<RequestSpec>) -> Self {
        Self {
            specs: specs.into_iter(),
        }
    }
}

impl From<Scenario> for ScriptedSource {
    fn from(scenario: Scenario) -> Self {
        Self::new(scenario.requests)
    }
}

impl RequestSource for ScriptedSource {
    fn next_request(&mut self) -> Option<RequestSpec> {
        self.specs.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(passengers: u32) -> RequestSpec {
        RequestSpec {
            origin: 0,
            destination: 0,
            passengers,
            min_travel_ms: 1,
            max_travel_ms: 2,
        }
    }

    #[test]
    fn test_replays_in_order_then_fuses() {
        let mut source = ScriptedSource::new(vec![spec(1), spec(2)]);
        assert_eq!(source.next_request().unwrap().passengers, 1);
        assert_eq!(source.next_request().unwrap().passengers, 2);
        assert!(source.next_request().is_none());
        assert!(source.next_request().is_none());
    }
}
