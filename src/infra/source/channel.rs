//! Live request feed over a crossbeam channel.

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::core::request::{RequestSource, RequestSpec};

/// Feeds the dispatcher from a channel.
///
/// `next_request` blocks until a record arrives; dropping every sender is the
/// end-of-stream signal, after which the source stays exhausted.
pub struct ChannelSource {
    rx: Receiver<RequestSpec>,
}

impl ChannelSource {
    /// Wrap an existing receiver.
    #[must_use]
    pub fn new(rx: Receiver<RequestSpec>) -> Self {
        Self { rx }
    }

    /// Create an unbounded feed and its source end.
    #[must_use]
    pub fn unbounded() -> (Sender<RequestSpec>, Self) {
        let (tx, rx) = unbounded();
        (tx, Self::new(rx))
    }
}

impl RequestSource for ChannelSource {
    fn next_request(&mut self) -> Option<RequestSpec> {
        self.rx.recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drains_then_reports_end_of_stream() {
        let (tx, mut source) = ChannelSource::unbounded();
        tx.send(RequestSpec {
            origin: 0,
            destination: 1,
            passengers: 2,
            min_travel_ms: 1,
            max_travel_ms: 2,
        })
        .unwrap();
        drop(tx);

        assert_eq!(source.next_request().unwrap().passengers, 2);
        assert!(source.next_request().is_none());
        assert!(source.next_request().is_none());
    }
}
