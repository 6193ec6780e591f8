//! Permission resolution for the helm command/component core.
//!
//! Answers "can actor X do Y (optionally in scope Z)" by consulting an
//! ordered chain of rules; the first authoritative answer wins.
//!
//! # Resolution Order
//!
//! ```text
//! 1. operator flag set AND operator-honoring enabled  -> allow
//! 2. console-equivalent actor                         -> allow
//! 3. external PermissionResolver(scope, identity, permission)
//!    -> its boolean answer is authoritative
//! ```
//!
//! # No Caching
//!
//! Permission state is externally mutable at any time, so every call
//! re-evaluates the full chain. Nothing in this crate memoizes.
//!
//! # Example
//!
//! ```
//! use helm_auth::{AuthorityChain, DenyAll};
//! use helm_types::testing::RecordingActor;
//! use std::sync::Arc;
//!
//! let chain = AuthorityChain::new(true, Arc::new(DenyAll));
//!
//! let op = RecordingActor::named("alice").as_operator();
//! assert!(chain.has_permission(&op, "helm.kick"));
//!
//! let plain = RecordingActor::named("bob");
//! assert!(!chain.has_permission(&plain, "helm.kick"));
//! ```

mod chain;
mod error;
mod query;
mod resolver;

pub use chain::AuthorityChain;
pub use error::AuthError;
pub use query::PermissionQuery;
pub use resolver::{AllowAll, DenyAll, PermissionResolver};
