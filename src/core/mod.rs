//! Core dispatch abstractions and occupancy accounting.

pub mod board;
pub mod dispatcher;
pub mod driver;
pub mod error;
pub mod events;
pub mod occupancy;
pub mod pool;
pub mod request;

pub use board::{BoardState, DispatchBoard};
pub use dispatcher::Dispatcher;
pub use driver::{Driver, DriverStats};
pub use error::{AppResult, FleetError};
pub use events::{EventSink, FleetAction, FleetEvent, InMemoryEventSink};
pub use occupancy::OccupancyTable;
pub use pool::RequestPool;
pub use request::{HotelId, Request, RequestSource, RequestSpec};
