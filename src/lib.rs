//! Workspace root crate.
//!
//! This crate re-exports the main building blocks so integration tests can depend on a single crate.

pub use controller::*;
pub use safety::{evaluate, Alarm, AlarmConfig, AlarmFlags};
pub use sim::*;
