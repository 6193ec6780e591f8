//! Component lifecycle states.

use serde::{Deserialize, Serialize};

/// Lifecycle state of one component.
///
/// ```text
/// Discovered → Instantiated → Enabled ⇄ Disabled → Unloaded
///                   │             │
///                   └──► Failed ◄─┘        (absorbing)
/// ```
///
/// | Category | States | Can be enabled |
/// |----------|--------|----------------|
/// | Pending | `Discovered`, `Instantiated`, `Disabled` | `Instantiated`, `Disabled` |
/// | Active | `Enabled` | already is |
/// | Terminal | `Failed`, `Unloaded` | No |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ComponentState {
    /// Descriptor produced by a loader; no instance yet.
    #[default]
    Discovered,

    /// Instance constructed, not yet enabled.
    Instantiated,

    /// `enable()` completed; commands and subscriptions are live.
    Enabled,

    /// `disable()` completed; may be enabled again.
    Disabled,

    /// Instantiation or a lifecycle hook failed.
    ///
    /// Absorbing state: the component takes no further part in the run
    /// and is skipped at unload.
    Failed,

    /// Instance released at shutdown. Terminal.
    Unloaded,
}

impl ComponentState {
    /// Returns `true` if `enable()` may be called from this state.
    #[must_use]
    pub fn can_enable(&self) -> bool {
        matches!(self, Self::Instantiated | Self::Disabled)
    }

    /// Returns `true` for the absorbing/terminal states.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Failed | Self::Unloaded)
    }

    /// Returns `true` if the component is currently enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl std::fmt::Display for ComponentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Discovered => write!(f, "discovered"),
            Self::Instantiated => write!(f, "instantiated"),
            Self::Enabled => write!(f, "enabled"),
            Self::Disabled => write!(f, "disabled"),
            Self::Failed => write!(f, "failed"),
            Self::Unloaded => write!(f, "unloaded"),
        }
    }
}
