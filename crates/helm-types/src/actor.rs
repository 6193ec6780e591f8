//! Actor (command issuer) abstraction.
//!
//! An [`Actor`] represents the entity issuing a command: a connected
//! participant, or the non-interactive console. The core requires nothing
//! else from its host - world state, transport, and session handling stay
//! on the host side of this trait.
//!
//! # Design Rationale
//!
//! The actor lives in `helm-types` (not `helm-auth`) because:
//!
//! 1. **Identity, not permission**: an actor carries who is acting, never
//!    what they may do - permission logic stays in `helm-auth`
//! 2. **No circular dependency**: Command -> Auth -> Types stays acyclic
//! 3. **Host boundary**: hosts implement exactly this trait and nothing more

use serde::{Deserialize, Serialize};

/// The entity issuing a command.
///
/// Implemented by the host for each kind of command source. The core
/// passes actors through dispatch and permission checks as `&dyn Actor`.
///
/// # Contract
///
/// | Method | Requirement |
/// |--------|-------------|
/// | `identity` | Stable and unique; **never** a display name |
/// | `display_name` | Human-facing; may differ from identity |
/// | `is_operator` | Privileged/operator-equivalent flag |
/// | `scope` | Optional contextual qualifier (e.g. a world) |
/// | `is_console` | Non-interactive console-equivalent actor |
/// | `send_message` | Deliver one line of text back to the actor |
///
/// # Example
///
/// ```
/// use helm_types::Actor;
///
/// struct Console;
///
/// impl Actor for Console {
///     fn identity(&self) -> &str {
///         "*Console*"
///     }
///
///     fn is_operator(&self) -> bool {
///         true
///     }
///
///     fn is_console(&self) -> bool {
///         true
///     }
///
///     fn send_message(&self, message: &str) {
///         println!("{message}");
///     }
/// }
///
/// let console = Console;
/// assert_eq!(console.display_name(), "*Console*");
/// assert!(console.scope().is_none());
/// ```
pub trait Actor {
    /// Returns the stable unique identity of this actor.
    ///
    /// Used for permission queries and audit logging. This must never
    /// return a display name - display names are mutable and ambiguous.
    fn identity(&self) -> &str;

    /// Returns the human-facing display name.
    ///
    /// Defaults to the identity.
    fn display_name(&self) -> &str {
        self.identity()
    }

    /// Returns `true` if the actor carries the privileged/operator flag.
    ///
    /// Whether this flag actually grants permissions is decided by the
    /// authority chain, not here.
    fn is_operator(&self) -> bool;

    /// Returns the actor's current scope, if it carries one.
    ///
    /// A scope is an optional contextual qualifier (a "world" or
    /// namespace) under which permissions are evaluated. Defaults to
    /// `None`.
    fn scope(&self) -> Option<&str> {
        None
    }

    /// Returns `true` if this is the non-interactive console actor.
    ///
    /// Defaults to `false`.
    fn is_console(&self) -> bool {
        false
    }

    /// Delivers a line of text back to the actor.
    fn send_message(&self, message: &str);
}

/// Ephemeral per-invocation snapshot of an actor.
///
/// Created from a live [`Actor`] at the start of an invocation and
/// discarded after. Useful for structured logging and for passing actor
/// facts across boundaries that must not hold the actor itself.
///
/// # Example
///
/// ```
/// use helm_types::{Actor, ActorSnapshot};
/// use helm_types::testing::RecordingActor;
///
/// let actor = RecordingActor::named("alice").in_scope("world_nether");
/// let snap = ActorSnapshot::of(&actor);
///
/// assert_eq!(snap.identity, "alice");
/// assert_eq!(snap.scope.as_deref(), Some("world_nether"));
/// assert!(!snap.operator);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    /// Stable unique identity.
    pub identity: String,

    /// Human-facing display name.
    pub display_name: String,

    /// Privileged/operator flag at snapshot time.
    pub operator: bool,

    /// Console-equivalence flag.
    pub console: bool,

    /// Scope at snapshot time, if any.
    pub scope: Option<String>,
}

impl ActorSnapshot {
    /// Captures a snapshot of the given actor.
    #[must_use]
    pub fn of(actor: &dyn Actor) -> Self {
        Self {
            identity: actor.identity().to_string(),
            display_name: actor.display_name().to_string(),
            operator: actor.is_operator(),
            console: actor.is_console(),
            scope: actor.scope().map(str::to_string),
        }
    }
}

impl std::fmt::Display for ActorSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.console {
            write!(f, "console:{}", self.identity)
        } else {
            write!(f, "actor:{}", self.identity)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingActor;

    #[test]
    fn snapshot_captures_identity_not_display_name() {
        let actor = RecordingActor::named("uuid-1234").displayed_as("Alice");
        let snap = ActorSnapshot::of(&actor);

        assert_eq!(snap.identity, "uuid-1234");
        assert_eq!(snap.display_name, "Alice");
    }

    #[test]
    fn snapshot_captures_flags() {
        let actor = RecordingActor::named("alice").as_operator();
        let snap = ActorSnapshot::of(&actor);

        assert!(snap.operator);
        assert!(!snap.console);
        assert!(snap.scope.is_none());
    }

    #[test]
    fn snapshot_display() {
        let actor = RecordingActor::named("alice");
        assert_eq!(format!("{}", ActorSnapshot::of(&actor)), "actor:alice");

        let console = RecordingActor::console();
        assert_eq!(
            format!("{}", ActorSnapshot::of(&console)),
            "console:*Console*"
        );
    }

    #[test]
    fn default_display_name_is_identity() {
        struct Bare;
        impl Actor for Bare {
            fn identity(&self) -> &str {
                "bare"
            }
            fn is_operator(&self) -> bool {
                false
            }
            fn send_message(&self, _message: &str) {}
        }

        let actor = Bare;
        assert_eq!(actor.display_name(), "bare");
        assert!(!actor.is_console());
        assert!(actor.scope().is_none());
    }
}
