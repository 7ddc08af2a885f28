//! Adapters Layer
//!
//! - `in_memory`: browsing contexts that implement the host ports in-process
//! - `listener_guard`: scoped listener attachment

pub mod in_memory;
pub mod listener_guard;

pub use in_memory::{BrowsingContext, WindowProxy};
pub use listener_guard::ListenerGuard;
