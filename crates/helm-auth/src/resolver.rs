//! External permission resolver interface.

/// External resolver consulted when no chain rule short-circuits.
///
/// This is the host's permission backend - a group/permission plugin, a
/// database, a flat file. The core queries it synchronously and treats
/// its boolean answer as authoritative.
///
/// # Arguments
///
/// * `scope` - optional contextual qualifier (e.g. a world name)
/// * `identity` - the actor's stable unique identity, never a display name
/// * `permission` - the dotted permission string (e.g. `"helm.kick"`)
pub trait PermissionResolver: Send + Sync {
    /// Returns whether `identity` holds `permission` under `scope`.
    fn has_permission(&self, scope: Option<&str>, identity: &str, permission: &str) -> bool;
}

/// Resolver that grants everything. Useful for tests and open hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl PermissionResolver for AllowAll {
    fn has_permission(&self, _scope: Option<&str>, _identity: &str, _permission: &str) -> bool {
        true
    }
}

/// Resolver that denies everything. The safe default for closed hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl PermissionResolver for DenyAll {
    fn has_permission(&self, _scope: Option<&str>, _identity: &str, _permission: &str) -> bool {
        false
    }
}
