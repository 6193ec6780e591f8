//! Component lifecycle management for the helm core.
//!
//! A component is an independently enable/disable-able unit of
//! functionality that contributes commands and event subscriptions.
//! The [`ComponentManager`] owns the set of known components and drives
//! them through a fixed state machine:
//!
//! ```text
//! Discovered → Instantiated → Enabled ⇄ Disabled → Unloaded
//!                   │             │
//!                   └──► Failed ◄─┘        (absorbing)
//! ```
//!
//! # Partial-Failure Isolation
//!
//! One bad component never blocks the others: an instantiation or
//! `enable()` failure marks that component `Failed`, logs it, and the
//! remaining components proceed. A `Failed` component is skipped at
//! unload.
//!
//! # Lifecycle Phases
//!
//! Load, enable, and unload run sequentially during defined host phases
//! (startup/shutdown), never concurrently with dispatch. The host
//! serializes access; this is a documented precondition of the
//! single-threaded core, not something enforced here.
//!
//! # Example
//!
//! ```
//! use helm_component::{Component, ComponentError, ComponentManager, HostServices};
//! use helm_command::{CommandArgs, CommandError, CommandSpec};
//! use helm_types::Actor;
//!
//! struct Greeter;
//!
//! impl Component for Greeter {
//!     fn name(&self) -> &str {
//!         "greeter"
//!     }
//!
//!     fn enable(&mut self, host: &mut HostServices<'_>) -> Result<(), ComponentError> {
//!         host.register_command(
//!             CommandSpec::new("greet").arity(1, Some(1)),
//!             Box::new(|_ctx| {
//!                 Box::new(|args: &CommandArgs, actor: &dyn Actor| -> Result<(), CommandError> {
//!                     actor.send_message(&format!("Hello, {}!", args.string(0).unwrap_or("?")));
//!                     Ok(())
//!                 })
//!             }),
//!         )?;
//!         Ok(())
//!     }
//! }
//! ```

mod component;
mod error;
mod loader;
mod manager;
mod state;

pub use component::{Component, HostServices};
pub use error::ComponentError;
pub use loader::{ComponentDescriptor, ComponentFactory, ComponentLoader, ConfigListedLoader};
pub use manager::{ComponentManager, LifecycleReport};
pub use state::ComponentState;
