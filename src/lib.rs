//! # Fleet Dispatch
//!
//! A capacity-gated shuttle-fleet simulator built around a shared request pool.
//!
//! This library models a fleet of transport drivers that continuously pull
//! transfer requests from a shared work pool and execute them against a finite
//! occupancy resource at each request's origin hotel. One dispatcher produces
//! requests; N driver threads consume them. All shared state (the pool, the
//! occupancy table, and the shutdown flag) forms a single critical section
//! guarded by one mutex, with one condition variable signalling "new work or
//! shutdown".
//!
//! ## Core Problem Solved
//!
//! Transfer workloads are capacity-constrained in a way plain work queues are
//! not:
//!
//! - **Finite origin occupancy**: a transfer can only depart if its origin
//!   hotel still holds enough guests
//! - **Head-of-line blocking**: one congested request must not stall requests
//!   that are currently satisfiable
//! - **Cooperative shutdown**: drivers must drain the pool before exiting,
//!   and must never hang on a request that can no longer be satisfied
//!
//! ## Key Features
//!
//! - **Deferral dispatch**: an infeasible head request rotates to the tail so
//!   the next satisfiable request proceeds: feasibility-priority without
//!   sorting
//! - **Single-gate coordination**: one `parking_lot` mutex + condvar guard the
//!   pool, the occupancy table, and the shutdown flag; every waiter re-checks
//!   its predicate on wake
//! - **Starvation detection**: requests that provably can never be satisfied
//!   are reported instead of hanging the fleet
//! - **Pluggable request sources**: scripted scenario replay or a live
//!   channel feed behind one trait
//! - **Seeded travel jitter**: reproducible uniform travel-time sampling
//!
//! ## Running a Simulation
//!
//! ```rust,ignore
//! use fleet_dispatch::builders::SimulationBuilder;
//! use fleet_dispatch::config::FleetConfig;
//! use fleet_dispatch::infra::scenario;
//! use fleet_dispatch::infra::source::ScriptedSource;
//!
//! let scenario = scenario::parse_str(&std::fs::read_to_string("fleet.txt")?)?;
//! let report = SimulationBuilder::new(FleetConfig::default())
//!     .with_occupancy(scenario.occupancy.clone())
//!     .build()?
//!     .run(ScriptedSource::new(scenario.requests))?;
//!
//! for stats in &report.drivers {
//!     println!("driver {} carried {} passengers", stats.driver, stats.passengers);
//! }
//! ```
//!
//! For complete examples, see:
//! - `tests/dispatch_algorithm_test.rs` - Full integration tests
//! - `README.md` - Comprehensive documentation

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core dispatch abstractions: pool, occupancy, board, dispatcher, drivers.
pub mod core;
/// Configuration models for the fleet and its timing knobs.
pub mod config;
/// Builders to construct simulations from configuration.
pub mod builders;
/// Infrastructure adapters: scenario parsing and request-source backends.
pub mod infra;
/// Simulation runtime: thread orchestration and final reporting.
pub mod runtime;
/// Shared utilities.
pub mod util;
