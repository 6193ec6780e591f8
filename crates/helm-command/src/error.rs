//! Command layer errors: the dispatch failure taxonomy and
//! registration-time errors.
//!
//! # Taxonomy
//!
//! Exactly one of these is produced per failed dispatch:
//!
//! | Variant | Code | Rendered as |
//! |---------|------|-------------|
//! | [`PermissionDenied`](CommandError::PermissionDenied) | `COMMAND_PERMISSION_DENIED` | "You don't have permission." |
//! | [`Usage`](CommandError::Usage) | `COMMAND_USAGE` | message + usage line |
//! | [`MissingNested`](CommandError::MissingNested) | `COMMAND_MISSING_NESTED` | valid sub-command listing |
//! | [`NumberExpected`](CommandError::NumberExpected) | `COMMAND_NUMBER_EXPECTED` | "Number expected, string received instead." |
//! | [`Execution`](CommandError::Execution) | `COMMAND_EXECUTION_FAILED` | generic message; detail logged |
//! | [`Message`](CommandError::Message) | `COMMAND_FAILED` | the handler's text, verbatim |

use helm_auth::AuthError;
use helm_types::ErrorCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One dispatch failure.
///
/// Handlers raise these; the dispatcher translates them into
/// actor-visible text at the boundary. Handler code is expected to
/// raise, not print-and-continue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum CommandError {
    /// The actor lacks the binding's required permission.
    #[error("permission denied")]
    PermissionDenied,

    /// Argument arity or flag mismatch.
    ///
    /// Carries the binding's declared usage text so the actor sees the
    /// corrected form. The handler body is never invoked.
    #[error("{message}")]
    Usage {
        /// What was wrong (e.g. "Too few arguments.").
        message: String,
        /// The binding's usage text.
        usage: String,
    },

    /// A command-group was invoked without a matching sub-command.
    ///
    /// Carries the valid choices at the level that failed to match.
    #[error("missing nested command")]
    MissingNested {
        /// Valid sub-command names at this level, sorted.
        choices: Vec<String>,
    },

    /// A numeric argument failed to parse.
    ///
    /// Reported distinctly from other handler failures so the actor
    /// gets a precise message instead of raw parser output.
    #[error("number expected, got '{token}'")]
    NumberExpected {
        /// The offending token.
        token: String,
    },

    /// A handler's internal failure, wrapped.
    ///
    /// The detail is logged in full at the boundary; the actor sees a
    /// generic message.
    #[error("execution failed: {detail}")]
    Execution {
        /// Underlying cause, for the log.
        detail: String,
    },

    /// A handler-supplied failure message, shown to the actor verbatim.
    #[error("{0}")]
    Message(String),
}

impl CommandError {
    /// Wraps an internal failure cause.
    #[must_use]
    pub fn execution(detail: impl std::fmt::Display) -> Self {
        Self::Execution {
            detail: detail.to_string(),
        }
    }
}

impl ErrorCode for CommandError {
    fn code(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "COMMAND_PERMISSION_DENIED",
            Self::Usage { .. } => "COMMAND_USAGE",
            Self::MissingNested { .. } => "COMMAND_MISSING_NESTED",
            Self::NumberExpected { .. } => "COMMAND_NUMBER_EXPECTED",
            Self::Execution { .. } => "COMMAND_EXECUTION_FAILED",
            Self::Message(_) => "COMMAND_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Usage-class errors are correctable by the actor; internal
        // execution failures may be transient.
        match self {
            Self::PermissionDenied => false,
            Self::Usage { .. } => true,
            Self::MissingNested { .. } => true,
            Self::NumberExpected { .. } => true,
            Self::Execution { .. } => true,
            Self::Message(_) => false,
        }
    }
}

impl From<AuthError> for CommandError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::PermissionDenied { .. } => Self::PermissionDenied,
        }
    }
}

/// Registration-time error: bad or duplicate binding.
///
/// Fail fast - collisions are caught when a component registers, not at
/// dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum RegistryError {
    /// A name or alias collides with an existing binding at this level.
    #[error("duplicate command registration: {name}")]
    DuplicateCommand {
        /// The colliding name or alias.
        name: String,
    },
}

impl ErrorCode for RegistryError {
    fn code(&self) -> &'static str {
        match self {
            Self::DuplicateCommand { .. } => "COMMAND_DUPLICATE",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// Flag-parse rejection: a flag token carried an undeclared flag char.
///
/// Internal to the dispatch pipeline; the dispatcher converts it into a
/// [`CommandError::Usage`] with the binding's usage text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownFlag(pub char);

#[cfg(test)]
mod tests {
    use super::*;
    use helm_types::assert_error_codes;

    fn all_variants() -> Vec<CommandError> {
        vec![
            CommandError::PermissionDenied,
            CommandError::Usage {
                message: "x".into(),
                usage: "/x".into(),
            },
            CommandError::MissingNested {
                choices: vec!["a".into()],
            },
            CommandError::NumberExpected { token: "x".into() },
            CommandError::execution("x"),
            CommandError::Message("x".into()),
        ]
    }

    #[test]
    fn all_error_codes_valid() {
        assert_error_codes(&all_variants(), "COMMAND_");
        assert_error_codes(
            &[RegistryError::DuplicateCommand { name: "x".into() }],
            "COMMAND_",
        );
    }

    #[test]
    fn auth_error_converts_to_permission_denied() {
        let err: CommandError = AuthError::PermissionDenied {
            permission: "helm.kick".into(),
        }
        .into();
        assert_eq!(err, CommandError::PermissionDenied);
    }

    #[test]
    fn permission_denied_not_recoverable() {
        assert!(!CommandError::PermissionDenied.is_recoverable());
        assert!(CommandError::NumberExpected { token: "x".into() }.is_recoverable());
    }

    #[test]
    fn usage_displays_message() {
        let err = CommandError::Usage {
            message: "Too few arguments.".into(),
            usage: "/kick <player>".into(),
        };
        assert_eq!(err.to_string(), "Too few arguments.");
    }
}
