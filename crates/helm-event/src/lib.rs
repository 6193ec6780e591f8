//! Event subscriptions for the helm command/component core.
//!
//! Components register subscriptions during `enable()`; the host emits
//! events as they happen. One explicit ordered list per event kind:
//!
//! - **Deterministic order**: subscribers run in registration order
//! - **Failure isolation**: one subscriber's failure is logged and does
//!   not block later subscribers (mirrors the component partial-failure
//!   policy)
//!
//! Event payloads are opaque [`serde_json::Value`]s - the core passes
//! domain data through without interpreting it.
//!
//! # Example
//!
//! ```
//! use helm_event::{Event, EventBus};
//!
//! let mut bus = EventBus::new();
//! bus.subscribe("actor.join", "greeter", |event| {
//!     let name = event.payload["name"].as_str().unwrap_or("?");
//!     println!("welcome, {name}");
//!     Ok(())
//! });
//!
//! let outcome = bus.emit(&Event::new(
//!     "actor.join",
//!     serde_json::json!({ "name": "alice" }),
//! ));
//! assert_eq!(outcome.delivered, 1);
//! assert!(outcome.failures.is_empty());
//! ```

mod bus;
mod error;
mod event;

pub use bus::{EmitOutcome, EventBus, SubscriptionId};
pub use error::EventError;
pub use event::Event;
