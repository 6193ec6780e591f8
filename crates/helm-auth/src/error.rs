//! Auth layer errors.

use helm_types::ErrorCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Auth layer error.
///
/// | Variant | Code | Recoverable |
/// |---------|------|-------------|
/// | [`PermissionDenied`](AuthError::PermissionDenied) | `AUTH_PERMISSION_DENIED` | No |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum AuthError {
    /// The actor does not hold the required permission.
    ///
    /// Raised by the `check_*` variants at dispatch boundaries where a
    /// denial must abort the operation. **Not recoverable** - the actor
    /// needs the permission granted, not a retry.
    #[error("permission denied: {permission}")]
    PermissionDenied {
        /// The permission string that was denied.
        permission: String,
    },
}

impl ErrorCode for AuthError {
    fn code(&self) -> &'static str {
        match self {
            Self::PermissionDenied { .. } => "AUTH_PERMISSION_DENIED",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}
