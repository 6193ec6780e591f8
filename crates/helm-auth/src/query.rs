//! Permission query value type.

use helm_types::Actor;
use serde::{Deserialize, Serialize};

/// Stateless value describing one permission question.
///
/// `{actor identity, scope (optional), permission string}` - created per
/// check, passed through the chain, and discarded. Queries carry no
/// answer and are never cached.
///
/// # Example
///
/// ```
/// use helm_auth::PermissionQuery;
/// use helm_types::testing::RecordingActor;
///
/// let actor = RecordingActor::named("alice").in_scope("world_nether");
/// let query = PermissionQuery::of(&actor, "helm.teleport");
///
/// assert_eq!(query.identity, "alice");
/// assert_eq!(query.scope.as_deref(), Some("world_nether"));
/// assert_eq!(query.permission, "helm.teleport");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionQuery {
    /// Stable unique identity of the acting entity.
    pub identity: String,

    /// Optional contextual qualifier.
    pub scope: Option<String>,

    /// Dotted permission string.
    pub permission: String,
}

impl PermissionQuery {
    /// Creates a query with an explicit scope.
    #[must_use]
    pub fn new(
        identity: impl Into<String>,
        scope: Option<String>,
        permission: impl Into<String>,
    ) -> Self {
        Self {
            identity: identity.into(),
            scope,
            permission: permission.into(),
        }
    }

    /// Creates a query from an actor, deriving the scope the actor is
    /// currently in (best effort - `None` when the actor carries none).
    #[must_use]
    pub fn of(actor: &dyn Actor, permission: impl Into<String>) -> Self {
        Self::new(
            actor.identity(),
            actor.scope().map(str::to_string),
            permission,
        )
    }
}

impl std::fmt::Display for PermissionQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "{}@{} ? {}", self.identity, scope, self.permission),
            None => write!(f, "{} ? {}", self.identity, self.permission),
        }
    }
}
