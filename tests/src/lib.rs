//! # Frame Bridge Test Suite
//!
//! Cross-crate scenarios that need more than one bridge, or a bridge together
//! with a standalone communicator.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs    # Recording peers and bridge builders
//!     ├── scenarios.rs   # Origin gate, codec, fan-out, routing, lifecycle
//!     └── flows.rs       # Multi-bridge exchanges (acks, sealing, signing)
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p fb-tests
//! cargo test -p fb-tests integration::flows::
//! ```

#![allow(dead_code)]

pub mod integration;
