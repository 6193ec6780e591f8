//! The shared context bundle injected into handlers and components.
//!
//! # Design Rationale
//!
//! The original design reached collaborators through a global plugin
//! singleton and reflection-driven constructor injection. Here the
//! dispatcher hands every handler factory one fixed, statically-typed
//! [`CoreContext`]; there is no ambient state and no runtime type
//! inspection.
//!
//! The [`ConfigProvider`] trait lives in this crate because the command
//! layer *consumes* configuration; implementations (TOML files, in-memory
//! test maps) live in the runtime layer. This mirrors the workspace rule
//! of abstract traits low, concrete impls high.

use helm_auth::AuthorityChain;
use std::sync::Arc;

/// Typed configuration getters with explicit defaults.
///
/// The core never fails merely because a key is absent: every getter
/// takes or implies a default. Keys are dotted lowercase paths
/// (e.g. `"op-permissions"`, `"components.enabled"`).
pub trait ConfigProvider: Send + Sync {
    /// Returns the boolean at `key`, or `default` if absent.
    fn get_bool(&self, key: &str, default: bool) -> bool;

    /// Returns the string at `key`, or `None` if absent.
    fn get_string(&self, key: &str) -> Option<String>;

    /// Returns the integer at `key`, or `default` if absent.
    fn get_integer(&self, key: &str, default: i64) -> i64;

    /// Returns the integer list at `key`, or `default` if absent.
    fn get_int_list(&self, key: &str, default: &[i64]) -> Vec<i64>;

    /// Returns the string list at `key`, or empty if absent.
    fn get_string_list(&self, key: &str) -> Vec<String>;

    /// Returns the string at `key`, or `default` if absent.
    fn get_str_or(&self, key: &str, default: &str) -> String {
        self.get_string(key)
            .unwrap_or_else(|| default.to_string())
    }
}

/// The fixed collaborator bundle handed to every handler and component
/// factory.
///
/// Cheap to clone; both members are shared references. Constructed once
/// by the host facade and passed down explicitly.
#[derive(Clone)]
pub struct CoreContext {
    /// The permission resolution chain.
    pub authority: Arc<AuthorityChain>,

    /// The host's configuration provider.
    pub config: Arc<dyn ConfigProvider>,
}

impl CoreContext {
    /// Creates a context bundle.
    #[must_use]
    pub fn new(authority: Arc<AuthorityChain>, config: Arc<dyn ConfigProvider>) -> Self {
        Self { authority, config }
    }
}
