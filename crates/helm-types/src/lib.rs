//! Core types for the helm command/component core.
//!
//! This crate is the leaf of the workspace: every other `helm-*` crate
//! depends on it, and it depends only on `serde` plus `parking_lot` for
//! the shared test doubles.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    helm workspace                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  helm-types     : Actor abstraction, ErrorCode   ◄── HERE   │
//! │  helm-auth      : Permission resolution chain               │
//! │  helm-event     : Ordered event subscriptions               │
//! │  helm-command   : Command registry and dispatcher           │
//! │  helm-component : Component lifecycle manager               │
//! │  helm-runtime   : Config provider, console, host facade     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Contents
//!
//! - [`Actor`] - the narrow abstraction over "who issued this command"
//! - [`ActorSnapshot`] - ephemeral per-invocation actor value
//! - [`ErrorCode`] - unified machine-readable error interface
//! - [`testing`] - test doubles shared by downstream crate tests

mod actor;
mod error;
pub mod testing;

pub use actor::{Actor, ActorSnapshot};
pub use error::{assert_error_code, assert_error_codes, ErrorCode};
