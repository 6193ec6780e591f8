//! The event bus: per-kind ordered subscription lists.

use crate::{Event, EventError};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Handle identifying one subscription, returned by [`EventBus::subscribe`].
///
/// Held by whoever owns the subscription's lifetime (typically the
/// component manager) and passed back to [`EventBus::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// One registered subscription.
struct Subscription {
    id: SubscriptionId,
    name: String,
    handler: Box<dyn FnMut(&Event) -> Result<(), EventError>>,
}

/// Result of one [`EventBus::emit`] call.
#[derive(Debug, Default)]
pub struct EmitOutcome {
    /// How many subscribers ran (including failed ones).
    pub delivered: usize,

    /// Subscriber name plus failure, for each subscriber that failed.
    pub failures: Vec<(String, EventError)>,
}

impl EmitOutcome {
    /// Returns `true` if every subscriber completed normally.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Ordered event subscription lists, one per event kind.
///
/// Subscriptions are registered during component `enable()` and iterated
/// in registration order on every emit. Mutation happens only during
/// lifecycle/registration phases; the host serializes access (documented
/// precondition of the single-threaded core).
#[derive(Default)]
pub struct EventBus {
    subscriptions: HashMap<String, Vec<Subscription>>,
    next_id: u64,
}

impl EventBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `name` to events of `kind`.
    ///
    /// Subscribers of the same kind run in the order they subscribed.
    /// Names are informational (logging, failure reports) and need not
    /// be unique; the returned [`SubscriptionId`] is the handle for
    /// [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe(
        &mut self,
        kind: impl Into<String>,
        name: impl Into<String>,
        handler: impl FnMut(&Event) -> Result<(), EventError> + 'static,
    ) -> SubscriptionId {
        let kind = kind.into();
        let name = name.into();
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        debug!(kind, subscriber = name, "subscribed");
        self.subscriptions.entry(kind).or_default().push(Subscription {
            id,
            name,
            handler: Box::new(handler),
        });
        id
    }

    /// Removes the subscription behind `id`.
    ///
    /// Returns `false` if the handle no longer matches anything. The
    /// remaining subscribers keep their relative order.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let mut emptied = None;
        for (kind, subscribers) in &mut self.subscriptions {
            if let Some(position) = subscribers.iter().position(|s| s.id == id) {
                let removed = subscribers.remove(position);
                debug!(subscriber = removed.name, "unsubscribed");
                if subscribers.is_empty() {
                    emptied = Some(kind.clone());
                    break;
                }
                return true;
            }
        }
        if let Some(kind) = emptied {
            self.subscriptions.remove(&kind);
            return true;
        }
        false
    }

    /// Emits an event to every subscriber of its kind, in order.
    ///
    /// A failing subscriber is logged and recorded in the outcome; later
    /// subscribers still run.
    pub fn emit(&mut self, event: &Event) -> EmitOutcome {
        let mut outcome = EmitOutcome::default();

        let Some(subscribers) = self.subscriptions.get_mut(&event.kind) else {
            return outcome;
        };

        for sub in subscribers.iter_mut() {
            outcome.delivered += 1;
            if let Err(err) = (sub.handler)(event) {
                warn!(
                    kind = event.kind,
                    subscriber = sub.name,
                    error = %err,
                    "event subscriber failed"
                );
                outcome.failures.push((sub.name.clone(), err));
            }
        }

        outcome
    }

    /// Returns the number of subscribers for `kind`.
    #[must_use]
    pub fn subscriber_count(&self, kind: &str) -> usize {
        self.subscriptions.get(kind).map_or(0, Vec::len)
    }

    /// Returns every kind with at least one subscriber, sorted.
    #[must_use]
    pub fn kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = self.subscriptions.keys().cloned().collect();
        kinds.sort();
        kinds
    }
}
