//! Component layer errors.

use helm_command::RegistryError;
use helm_types::ErrorCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Component layer error.
///
/// | Variant | Code | Recoverable |
/// |---------|------|-------------|
/// | [`DuplicateComponent`](ComponentError::DuplicateComponent) | `COMPONENT_DUPLICATE` | No |
/// | [`UnknownComponent`](ComponentError::UnknownComponent) | `COMPONENT_UNKNOWN` | No |
/// | [`InstantiationFailed`](ComponentError::InstantiationFailed) | `COMPONENT_INSTANTIATION_FAILED` | Yes |
/// | [`EnableFailed`](ComponentError::EnableFailed) | `COMPONENT_ENABLE_FAILED` | Yes |
/// | [`DisableFailed`](ComponentError::DisableFailed) | `COMPONENT_DISABLE_FAILED` | Yes |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ComponentError {
    /// Two loaders contributed the same component name.
    ///
    /// A configuration error: fatal for the offending descriptor only,
    /// siblings keep loading.
    #[error("duplicate component: {name}")]
    DuplicateComponent {
        /// The colliding component name.
        name: String,
    },

    /// No component with the given name is known to the manager.
    #[error("unknown component: {name}")]
    UnknownComponent {
        /// The requested name.
        name: String,
    },

    /// The component's factory failed to produce an instance.
    #[error("instantiation failed: {detail}")]
    InstantiationFailed {
        /// Underlying cause.
        detail: String,
    },

    /// The component's `enable()` hook failed.
    ///
    /// The component transitions to `Failed` and is skipped at unload.
    #[error("enable failed: {detail}")]
    EnableFailed {
        /// Underlying cause.
        detail: String,
    },

    /// The component's `disable()` hook failed.
    #[error("disable failed: {detail}")]
    DisableFailed {
        /// Underlying cause.
        detail: String,
    },
}

impl ComponentError {
    /// Wraps an instantiation failure cause.
    #[must_use]
    pub fn instantiation(detail: impl std::fmt::Display) -> Self {
        Self::InstantiationFailed {
            detail: detail.to_string(),
        }
    }

    /// Wraps an enable failure cause.
    #[must_use]
    pub fn enable(detail: impl std::fmt::Display) -> Self {
        Self::EnableFailed {
            detail: detail.to_string(),
        }
    }

    /// Wraps a disable failure cause.
    #[must_use]
    pub fn disable(detail: impl std::fmt::Display) -> Self {
        Self::DisableFailed {
            detail: detail.to_string(),
        }
    }
}

impl ErrorCode for ComponentError {
    fn code(&self) -> &'static str {
        match self {
            Self::DuplicateComponent { .. } => "COMPONENT_DUPLICATE",
            Self::UnknownComponent { .. } => "COMPONENT_UNKNOWN",
            Self::InstantiationFailed { .. } => "COMPONENT_INSTANTIATION_FAILED",
            Self::EnableFailed { .. } => "COMPONENT_ENABLE_FAILED",
            Self::DisableFailed { .. } => "COMPONENT_DISABLE_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::DuplicateComponent { .. } | Self::UnknownComponent { .. } => false,
            Self::InstantiationFailed { .. }
            | Self::EnableFailed { .. }
            | Self::DisableFailed { .. } => true,
        }
    }
}

// A command registration collision inside `enable()` fails that
// component's enable.
impl From<RegistryError> for ComponentError {
    fn from(err: RegistryError) -> Self {
        Self::enable(err)
    }
}
