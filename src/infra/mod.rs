//! Infrastructure adapters: scenario input and request-source backends.

pub mod scenario;
pub mod source;

pub use scenario::{Scenario, ScenarioError};
pub use source::{ChannelSource, ScriptedSource};
