//! Event value type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One emitted event: a kind string plus an opaque payload.
///
/// Kinds are dotted lowercase strings chosen by the host
/// (e.g. `"actor.join"`, `"component.enabled"`). The payload is domain
/// data the core does not interpret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event kind; routing key for subscriptions.
    pub kind: String,

    /// Opaque domain payload.
    pub payload: Value,
}

impl Event {
    /// Creates an event with a payload.
    #[must_use]
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    /// Creates a payload-less event.
    #[must_use]
    pub fn signal(kind: impl Into<String>) -> Self {
        Self::new(kind, Value::Null)
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "event:{}", self.kind)
    }
}
