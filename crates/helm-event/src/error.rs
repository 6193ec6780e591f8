//! Event layer errors.

use helm_types::ErrorCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Event layer error.
///
/// | Variant | Code | Recoverable |
/// |---------|------|-------------|
/// | [`SubscriberFailed`](EventError::SubscriberFailed) | `EVENT_SUBSCRIBER_FAILED` | Yes |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum EventError {
    /// A subscriber's handler returned a failure.
    ///
    /// Isolated per subscriber: the bus logs it and continues with the
    /// remaining subscribers. **Recoverable** - the next emission runs
    /// the subscriber again.
    #[error("subscriber failed: {0}")]
    SubscriberFailed(String),
}

impl EventError {
    /// Convenience constructor for handler bodies.
    #[must_use]
    pub fn failed(detail: impl Into<String>) -> Self {
        Self::SubscriberFailed(detail.into())
    }
}

impl ErrorCode for EventError {
    fn code(&self) -> &'static str {
        match self {
            Self::SubscriberFailed(_) => "EVENT_SUBSCRIBER_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helm_types::assert_error_codes;

    #[test]
    fn all_error_codes_valid() {
        assert_error_codes(&[EventError::failed("x")], "EVENT_");
    }

    #[test]
    fn subscriber_failed_message() {
        let err = EventError::failed("io closed");
        assert_eq!(err.to_string(), "subscriber failed: io closed");
        assert!(err.is_recoverable());
    }
}
