//! Request-source backends behind the core [`crate::core::RequestSource`] trait.

mod channel;
mod script;

pub use channel::ChannelSource;
pub use script::ScriptedSource;
