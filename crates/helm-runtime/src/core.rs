//! The host core facade.
//!
//! Owns the shared structures (command registry, event bus, component
//! manager, authority chain) and drives the host phases in order:
//! construct, `start()` (load + enable components), interactive dispatch
//! via [`HostCore::handle_line`], `shutdown()`. Everything runs on the
//! caller's thread; the facade serializes all access by construction.

use crate::ConsoleActor;
use helm_auth::{AuthorityChain, PermissionResolver};
use helm_command::{
    render_error, CommandRegistry, ConfigProvider, CoreContext, Dispatch, Dispatcher,
};
use helm_component::{ComponentError, ComponentLoader, ComponentManager, HostServices, LifecycleReport};
use helm_event::{EmitOutcome, Event, EventBus};
use helm_types::Actor;
use std::sync::Arc;
use tracing::info;

/// Outcome of [`HostCore::start`]: one report per phase.
#[derive(Debug, Default)]
pub struct StartupReport {
    /// Discovery and instantiation results.
    pub load: LifecycleReport,

    /// Enable-phase results.
    pub enable: LifecycleReport,
}

impl StartupReport {
    /// Returns `true` if every component loaded and enabled.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.load.is_clean() && self.enable.is_clean()
    }
}

/// The assembled host: shared structures plus lifecycle driving.
pub struct HostCore {
    context: CoreContext,
    commands: CommandRegistry,
    events: EventBus,
    components: ComponentManager,
}

impl HostCore {
    /// Assembles a core from configuration and a permission resolver.
    ///
    /// Operator honoring comes from the `op-permissions` config key
    /// (default `true`).
    #[must_use]
    pub fn new(config: Arc<dyn ConfigProvider>, resolver: Arc<dyn PermissionResolver>) -> Self {
        let honor_operator = config.get_bool("op-permissions", true);
        let authority = Arc::new(AuthorityChain::new(honor_operator, resolver));
        Self {
            context: CoreContext::new(authority, config),
            commands: CommandRegistry::new(),
            events: EventBus::new(),
            components: ComponentManager::new(),
        }
    }

    /// The shared context bundle.
    #[must_use]
    pub fn context(&self) -> &CoreContext {
        &self.context
    }

    /// The shared command registry, for host-level registrations made
    /// outside any component.
    pub fn commands_mut(&mut self) -> &mut CommandRegistry {
        &mut self.commands
    }

    /// The component manager.
    #[must_use]
    pub fn components(&self) -> &ComponentManager {
        &self.components
    }

    /// Adds a component discovery strategy. Call before [`start`].
    ///
    /// [`start`]: HostCore::start
    pub fn register_loader(&mut self, loader: impl ComponentLoader + 'static) {
        self.components.register_loader(loader);
    }

    /// Loads and enables all components.
    ///
    /// Per-component failures are isolated and reported; the core comes
    /// up with whatever subset succeeded.
    pub fn start(&mut self) -> StartupReport {
        let load = self.components.load_components(&self.context);
        let mut services = HostServices::new(&mut self.commands, &mut self.events, &self.context);
        let enable = self.components.enable_components(&mut services);
        info!(
            enabled = enable.succeeded,
            failed = load.failures.len() + enable.failures.len(),
            commands = self.commands.len(),
            "host core started"
        );
        StartupReport { load, enable }
    }

    /// Disables and unloads all components, reverse registration order.
    ///
    /// Their command bindings and event subscriptions leave the shared
    /// structures with them.
    pub fn shutdown(&mut self) -> LifecycleReport {
        let mut services = HostServices::new(&mut self.commands, &mut self.events, &self.context);
        self.components.unload_components(&mut services)
    }

    /// Enables one component by name.
    ///
    /// # Errors
    ///
    /// Propagates the manager's [`ComponentError`].
    pub fn enable_component(&mut self, name: &str) -> Result<(), ComponentError> {
        let mut services = HostServices::new(&mut self.commands, &mut self.events, &self.context);
        self.components.enable(name, &mut services)
    }

    /// Disables one component by name, releasing its registrations.
    ///
    /// # Errors
    ///
    /// Propagates the manager's [`ComponentError`].
    pub fn disable_component(&mut self, name: &str) -> Result<(), ComponentError> {
        let mut services = HostServices::new(&mut self.commands, &mut self.events, &self.context);
        self.components.disable(name, &mut services)
    }

    /// Emits an event to all subscribers of its kind.
    pub fn emit(&mut self, event: &Event) -> EmitOutcome {
        self.events.emit(event)
    }

    /// Handles one line of input from an actor.
    ///
    /// Tokenizes on whitespace (an optional leading `/` on the command
    /// is accepted), dispatches, and renders the outcome back to the
    /// actor. This is the single boundary where dispatch failures become
    /// actor-visible text; nothing propagates out.
    pub fn handle_line(&self, line: &str, actor: &dyn Actor) {
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            return;
        };
        let command = first.strip_prefix('/').unwrap_or(first);
        let args: Vec<String> = tokens.map(str::to_string).collect();

        let dispatcher = Dispatcher::new(&self.commands, &self.context);
        match dispatcher.dispatch(command, &args, actor) {
            Ok(Dispatch::Handled) => {}
            Ok(Dispatch::Unknown) => {
                actor.send_message(&format!("Unknown command: {command}"));
            }
            Err(err) => render_error(&err, actor),
        }
    }

    /// Handles one line typed at the host console.
    pub fn handle_console_line(&self, line: &str) {
        self.handle_line(line, &ConsoleActor);
    }
}
