//! Test doubles shared by downstream crate tests.
//!
//! [`RecordingActor`] is a configurable [`Actor`] that records every
//! message sent to it, so tests can assert on actor-visible output.

use crate::Actor;
use parking_lot::Mutex;

/// Configurable actor that records delivered messages.
///
/// # Example
///
/// ```
/// use helm_types::Actor;
/// use helm_types::testing::RecordingActor;
///
/// let actor = RecordingActor::named("alice").as_operator();
/// actor.send_message("hello");
///
/// assert!(actor.is_operator());
/// assert_eq!(actor.messages(), vec!["hello".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingActor {
    identity: String,
    display_name: String,
    operator: bool,
    console: bool,
    scope: Option<String>,
    messages: Mutex<Vec<String>>,
}

impl RecordingActor {
    /// Creates an ordinary actor with the given identity.
    #[must_use]
    pub fn named(identity: impl Into<String>) -> Self {
        let identity = identity.into();
        Self {
            display_name: identity.clone(),
            identity,
            ..Self::default()
        }
    }

    /// Creates a console-equivalent actor.
    ///
    /// Console actors use the reserved identity `*Console*` and carry the
    /// operator flag, matching the host convention.
    #[must_use]
    pub fn console() -> Self {
        Self {
            identity: "*Console*".into(),
            display_name: "Console".into(),
            operator: true,
            console: true,
            ..Self::default()
        }
    }

    /// Sets a display name distinct from the identity.
    #[must_use]
    pub fn displayed_as(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Sets the operator flag.
    #[must_use]
    pub fn as_operator(mut self) -> Self {
        self.operator = true;
        self
    }

    /// Sets the current scope.
    #[must_use]
    pub fn in_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Returns every message delivered so far, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// Returns the last delivered message, if any.
    #[must_use]
    pub fn last_message(&self) -> Option<String> {
        self.messages.lock().last().cloned()
    }
}

impl Actor for RecordingActor {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn is_operator(&self) -> bool {
        self.operator
    }

    fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    fn is_console(&self) -> bool {
        self.console
    }

    fn send_message(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}
