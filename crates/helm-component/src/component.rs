//! Component trait and the services handed to lifecycle hooks.

use crate::ComponentError;
use helm_command::{CommandRegistry, CommandSpec, CoreContext, HandlerFactory, RegistryError};
use helm_event::{Event, EventBus, EventError, SubscriptionId};

/// What one component registered through its [`HostServices`] handle.
///
/// Kept by the manager for the component's enabled lifetime and replayed
/// in reverse on disable, so a re-enable starts from a clean registry
/// and bus.
#[derive(Default)]
pub(crate) struct RegistrationRecord {
    commands: Vec<String>,
    subscriptions: Vec<SubscriptionId>,
}

impl RegistrationRecord {
    pub(crate) fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.subscriptions.is_empty()
    }
}

/// The host's shared services, handed to `enable()`.
///
/// Exists only for the duration of one lifecycle phase; components must
/// not retain references out of it. Everything registered through this
/// handle is tracked and released again when the component is disabled
/// or unloaded, which is what allows a disabled component to be enabled
/// a second time without colliding with its own leftovers.
pub struct HostServices<'a> {
    commands: &'a mut CommandRegistry,
    events: &'a mut EventBus,

    /// The fixed collaborator bundle (authority chain, configuration).
    pub context: &'a CoreContext,

    record: RegistrationRecord,
}

impl<'a> HostServices<'a> {
    /// Wraps the host's shared structures for one lifecycle phase.
    #[must_use]
    pub fn new(
        commands: &'a mut CommandRegistry,
        events: &'a mut EventBus,
        context: &'a CoreContext,
    ) -> Self {
        Self {
            commands,
            events,
            context,
            record: RegistrationRecord::default(),
        }
    }

    /// Registers a leaf command on the shared registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateCommand`] on a name or alias
    /// collision.
    pub fn register_command(
        &mut self,
        spec: CommandSpec,
        factory: HandlerFactory,
    ) -> Result<(), RegistryError> {
        let name = spec.name.clone();
        self.commands.register(spec, factory)?;
        self.record.commands.push(name);
        Ok(())
    }

    /// Registers a command-group whose sub-commands are built by `build`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] from the group itself or from any
    /// registration `build` performs.
    pub fn register_command_group(
        &mut self,
        spec: CommandSpec,
        build: impl FnOnce(&mut CommandRegistry) -> Result<(), RegistryError>,
    ) -> Result<(), RegistryError> {
        let name = spec.name.clone();
        self.commands.register_group(spec, build)?;
        self.record.commands.push(name);
        Ok(())
    }

    /// Subscribes to events of `kind` on the shared bus.
    pub fn subscribe(
        &mut self,
        kind: impl Into<String>,
        name: impl Into<String>,
        handler: impl FnMut(&Event) -> Result<(), EventError> + 'static,
    ) {
        let id = self.events.subscribe(kind, name, handler);
        self.record.subscriptions.push(id);
    }

    /// Hands the accumulated record to the manager, resetting this
    /// handle for the next component.
    pub(crate) fn take_record(&mut self) -> RegistrationRecord {
        std::mem::take(&mut self.record)
    }

    /// Undoes every registration in `record`, newest first.
    pub(crate) fn release(&mut self, record: &RegistrationRecord) {
        for name in record.commands.iter().rev() {
            self.commands.remove(name);
        }
        for &id in record.subscriptions.iter().rev() {
            self.events.unsubscribe(id);
        }
    }
}

/// An independently enable/disable-able unit of functionality.
///
/// # Contract
///
/// - `enable()` may register commands and event subscriptions through
///   the [`HostServices`] handle; a returned error marks the component
///   `Failed` without affecting siblings
/// - registrations live exactly as long as the component is enabled;
///   the manager releases them on disable, so `enable()` after a
///   disable registers from scratch
/// - `disable()` releases whatever else `enable()` acquired and must be
///   safe to call even if `enable()` never completed successfully
/// - both hooks are invoked only by the [`ComponentManager`]; components
///   never drive their own lifecycle
///
/// [`ComponentManager`]: crate::ComponentManager
pub trait Component {
    /// The component's unique name.
    fn name(&self) -> &str;

    /// Called when the component is enabled.
    ///
    /// # Errors
    ///
    /// Return `Err` to mark this component `Failed`; siblings continue
    /// unaffected. Registrations made before the failure are rolled
    /// back by the manager.
    fn enable(&mut self, host: &mut HostServices<'_>) -> Result<(), ComponentError>;

    /// Called when the component is disabled.
    ///
    /// Commands and subscriptions are released by the manager; this hook
    /// covers everything else. Default implementation does nothing.
    ///
    /// # Errors
    ///
    /// Return `Err` if resource release failed; the failure is logged
    /// and the component is marked `Failed`.
    fn disable(&mut self) -> Result<(), ComponentError> {
        Ok(())
    }
}
