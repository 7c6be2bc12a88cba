//! API layer - the host bridge entry points.

pub mod bridge;
pub mod dispatcher;

pub use bridge::HostBridge;
pub use dispatcher::{Dispatched, Dispatcher};
