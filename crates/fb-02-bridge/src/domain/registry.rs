//! Handler registry: one handler per message type, last write wins.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Callback invoked with a decoded payload.
pub type Handler = Arc<dyn Fn(&Value) + Send + Sync>;

#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Handler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. Returns true if a previous handler was replaced.
    pub fn insert(&mut self, message_type: impl Into<String>, handler: Handler) -> bool {
        self.handlers.insert(message_type.into(), handler).is_some()
    }

    pub fn remove(&mut self, message_type: &str) -> bool {
        self.handlers.remove(message_type).is_some()
    }

    /// Cloned handle, so the caller can invoke it after releasing any lock.
    pub fn get(&self, message_type: &str) -> Option<Handler> {
        self.handlers.get(message_type).cloned()
    }

    pub fn contains(&self, message_type: &str) -> bool {
        self.handlers.contains_key(message_type)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&String> = self.handlers.keys().collect();
        types.sort();
        f.debug_struct("HandlerRegistry")
            .field("types", &types)
            .finish()
    }
}
