//! Live-feed simulation over the channel-backed request source.

use std::thread;
use std::time::Duration;

use fleet_dispatch::builders::SimulationBuilder;
use fleet_dispatch::config::FleetConfig;
use fleet_dispatch::core::RequestSpec;
use fleet_dispatch::infra::source::ChannelSource;
use fleet_dispatch::util::FixedJitter;

#[test]
fn test_live_feed_completes_after_sender_drops() {
    let (tx, source) = ChannelSource::unbounded();

    let sim = SimulationBuilder::new(FleetConfig {
        drivers: 2,
        seed: 0,
        retry_backoff_ms: 1,
        drain_poll_ms: 5,
    })
    .with_occupancy(vec![6, 6])
    .with_jitter(Box::new(FixedJitter))
    .build()
    .unwrap();

    let handle = thread::spawn(move || sim.run(source).unwrap());

    // Drivers idle between sends; end-of-stream is the dropped sender.
    for _ in 0..3 {
        tx.send(RequestSpec {
            origin: 0,
            destination: 1,
            passengers: 2,
            min_travel_ms: 1,
            max_travel_ms: 1,
        })
        .unwrap();
        thread::sleep(Duration::from_millis(2));
    }
    drop(tx);

    let report = handle.join().unwrap();
    assert_eq!(report.total_passengers(), 6);
    assert_eq!(report.final_occupancy, vec![0, 12]);
    assert!(report.starved.is_empty());
}
