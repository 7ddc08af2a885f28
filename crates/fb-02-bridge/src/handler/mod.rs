//! Handler Layer
//!
//! Processing of events arriving on the host message channel.

pub mod inbound;

pub use inbound::{InboundOutcome, InboundPipeline};
