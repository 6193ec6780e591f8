//! The ordered permission rule chain.

use crate::{AuthError, PermissionQuery, PermissionResolver};
use helm_types::Actor;
use std::sync::Arc;
use tracing::trace;

/// Ordered permission rule chain; first authoritative answer wins.
///
/// # Rules
///
/// | Order | Rule | Answer |
/// |-------|------|--------|
/// | 1 | actor is operator AND `honor_operator` | allow |
/// | 2 | actor is the console | allow |
/// | 3 | external [`PermissionResolver`] | authoritative |
///
/// The `honor_operator` flag comes from host configuration
/// (`op-permissions`). When it is off, the external resolver is
/// authoritative even for operators. The console is always allowed,
/// unconditionally.
///
/// # Two Check Styles
///
/// - `has_permission*` returns a boolean
/// - `check_permission*` returns `Err(AuthError::PermissionDenied)` on
///   denial - used at dispatch boundaries where failure must abort
///
/// The scope-less forms derive a best-effort scope from the actor when
/// the actor is currently in one; otherwise scoped resolution is skipped
/// and `None` is passed to the resolver.
pub struct AuthorityChain {
    honor_operator: bool,
    resolver: Arc<dyn PermissionResolver>,
}

impl AuthorityChain {
    /// Creates a chain over the given external resolver.
    #[must_use]
    pub fn new(honor_operator: bool, resolver: Arc<dyn PermissionResolver>) -> Self {
        Self {
            honor_operator,
            resolver,
        }
    }

    /// Returns whether the operator flag is honored for permissions.
    #[must_use]
    pub fn honors_operator(&self) -> bool {
        self.honor_operator
    }

    /// Returns whether `actor` holds `permission`.
    ///
    /// The scope is derived from the actor when it carries one.
    #[must_use]
    pub fn has_permission(&self, actor: &dyn Actor, permission: &str) -> bool {
        self.evaluate(actor, actor.scope(), permission)
    }

    /// Returns whether `actor` holds `permission` under an explicit scope.
    #[must_use]
    pub fn has_permission_in(
        &self,
        actor: &dyn Actor,
        scope: Option<&str>,
        permission: &str,
    ) -> bool {
        self.evaluate(actor, scope, permission)
    }

    /// Like [`has_permission`](Self::has_permission), but raises on denial.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::PermissionDenied`] if the chain denies.
    pub fn check_permission(&self, actor: &dyn Actor, permission: &str) -> Result<(), AuthError> {
        self.check_permission_in(actor, actor.scope(), permission)
    }

    /// Like [`has_permission_in`](Self::has_permission_in), but raises on denial.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::PermissionDenied`] if the chain denies.
    pub fn check_permission_in(
        &self,
        actor: &dyn Actor,
        scope: Option<&str>,
        permission: &str,
    ) -> Result<(), AuthError> {
        if self.evaluate(actor, scope, permission) {
            Ok(())
        } else {
            Err(AuthError::PermissionDenied {
                permission: permission.to_string(),
            })
        }
    }

    /// Runs the rule chain. Every call re-evaluates from the top;
    /// permission state may change between calls for the same actor.
    fn evaluate(&self, actor: &dyn Actor, scope: Option<&str>, permission: &str) -> bool {
        if actor.is_operator() && self.honor_operator {
            trace!(identity = actor.identity(), permission, "allowed: operator");
            return true;
        }

        if actor.is_console() {
            trace!(identity = actor.identity(), permission, "allowed: console");
            return true;
        }

        let query = PermissionQuery::of(actor, permission);
        let allowed = self
            .resolver
            .has_permission(scope, actor.identity(), permission);
        trace!(%query, allowed, "resolver answered");
        allowed
    }
}
