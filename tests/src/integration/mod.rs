//! Integration tests across the communicator and the bridge.

pub mod fixtures;
pub mod flows;
pub mod scenarios;
