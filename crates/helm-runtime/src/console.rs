//! The console actor.

use helm_types::Actor;
use tracing::info;

/// The host console as an actor.
///
/// Carries the reserved identity `*Console*`, passes every permission
/// check in the authority chain, and has no scope. Messages addressed to
/// it go to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleActor;

impl ConsoleActor {
    /// The reserved console identity. No ordinary actor may carry it.
    pub const IDENTITY: &'static str = "*Console*";
}

impl Actor for ConsoleActor {
    fn identity(&self) -> &str {
        Self::IDENTITY
    }

    fn display_name(&self) -> &str {
        "Console"
    }

    fn is_operator(&self) -> bool {
        true
    }

    fn is_console(&self) -> bool {
        true
    }

    fn send_message(&self, message: &str) {
        info!(target: "console", "{message}");
    }
}
