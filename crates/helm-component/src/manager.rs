//! The component manager: discovery, lifecycle, partial-failure isolation.

use crate::component::RegistrationRecord;
use crate::{
    Component, ComponentDescriptor, ComponentError, ComponentLoader, ComponentState, HostServices,
};
use helm_command::CoreContext;
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

/// One tracked component and its runtime state.
struct Entry {
    descriptor: ComponentDescriptor,
    state: ComponentState,
    instance: Option<Box<dyn Component>>,
    record: RegistrationRecord,
}

/// Summary of one lifecycle phase (load, enable, unload).
#[derive(Debug, Default)]
pub struct LifecycleReport {
    /// Components the phase succeeded for.
    pub succeeded: usize,

    /// Component name plus failure, for each component that failed.
    pub failures: Vec<(String, ComponentError)>,
}

impl LifecycleReport {
    /// Returns `true` if no component failed in this phase.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Owns the set of known components and their runtime state.
///
/// Components move through discovery, instantiation, enable, disable,
/// and unload in registration order (reverse order for unload). All
/// phase methods isolate per-component failures: a bad component is
/// marked [`ComponentState::Failed`], logged, and its siblings proceed.
///
/// Everything a component registers through [`HostServices`] during
/// `enable()` is recorded here and released again when the component is
/// disabled or unloaded, so a disable/enable round trip never collides
/// with the component's own earlier registrations.
#[derive(Default)]
pub struct ComponentManager {
    loaders: Vec<Box<dyn ComponentLoader>>,
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl ComponentManager {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a discovery strategy.
    ///
    /// Multiple loaders may contribute descriptors; they run in the
    /// order they were registered.
    pub fn register_loader(&mut self, loader: impl ComponentLoader + 'static) {
        self.loaders.push(Box::new(loader));
    }

    /// Runs all loaders and instantiates the discovered components.
    ///
    /// Duplicate names across loaders are rejected as configuration
    /// errors (the first registration wins). A component whose factory
    /// fails is recorded as `Failed` and excluded from the rest of the
    /// run; siblings are unaffected.
    pub fn load_components(&mut self, ctx: &CoreContext) -> LifecycleReport {
        let mut report = LifecycleReport::default();

        let mut discovered = Vec::new();
        for loader in &self.loaders {
            match loader.load() {
                Ok(descriptors) => discovered.extend(descriptors),
                Err(err) => {
                    error!(error = %err, "component loader failed");
                    report.failures.push(("<loader>".to_string(), err));
                }
            }
        }

        for descriptor in discovered {
            let name = descriptor.name.clone();

            if self.index.contains_key(&name) {
                let err = ComponentError::DuplicateComponent { name: name.clone() };
                error!(component = name, "duplicate component registration rejected");
                report.failures.push((name, err));
                continue;
            }

            let mut entry = Entry {
                descriptor,
                state: ComponentState::Discovered,
                instance: None,
                record: RegistrationRecord::default(),
            };

            match entry.descriptor.instantiate(ctx) {
                Ok(instance) => {
                    debug!(component = name, "component instantiated");
                    entry.instance = Some(instance);
                    entry.state = ComponentState::Instantiated;
                    report.succeeded += 1;
                }
                Err(err) => {
                    error!(component = name, error = %err, "component instantiation failed");
                    entry.state = ComponentState::Failed;
                    report.failures.push((name.clone(), err));
                }
            }

            let index = self.entries.len();
            self.entries.push(entry);
            self.index.insert(name, index);
        }

        report
    }

    /// Enables every instantiated, auto-enabled component in
    /// registration order.
    ///
    /// A failing `enable()` marks that component `Failed`; later
    /// components still attempt to enable.
    pub fn enable_components(&mut self, services: &mut HostServices<'_>) -> LifecycleReport {
        let mut report = LifecycleReport::default();

        for i in 0..self.entries.len() {
            if !self.entries[i].descriptor.enabled {
                continue;
            }
            if !self.entries[i].state.can_enable() {
                continue;
            }
            match Self::enable_entry(&mut self.entries[i], services) {
                Ok(()) => report.succeeded += 1,
                Err(err) => {
                    let name = self.entries[i].descriptor.name.clone();
                    report.failures.push((name, err));
                }
            }
        }

        report
    }

    /// Disables every enabled component in reverse registration order,
    /// releasing their command and event registrations.
    ///
    /// Instances are kept; disabled components may be enabled again.
    pub fn disable_components(&mut self, services: &mut HostServices<'_>) -> LifecycleReport {
        let mut report = LifecycleReport::default();

        for entry in self.entries.iter_mut().rev() {
            if !entry.state.is_enabled() {
                continue;
            }
            match Self::disable_entry(entry, services) {
                Ok(()) => report.succeeded += 1,
                Err(err) => {
                    report.failures.push((entry.descriptor.name.clone(), err));
                }
            }
        }

        report
    }

    /// Disables every enabled component in reverse registration order
    /// and releases all instances.
    ///
    /// Safe to call after a partially-successful enable phase: `Failed`
    /// components are skipped, everything else is released.
    pub fn unload_components(&mut self, services: &mut HostServices<'_>) -> LifecycleReport {
        let mut report = LifecycleReport::default();

        for entry in self.entries.iter_mut().rev() {
            if entry.state.is_enabled() {
                match Self::disable_entry(entry, services) {
                    Ok(()) => report.succeeded += 1,
                    Err(err) => {
                        report.failures.push((entry.descriptor.name.clone(), err));
                    }
                }
            }
            if !matches!(entry.state, ComponentState::Failed) {
                entry.state = ComponentState::Unloaded;
            }
            entry.instance = None;
        }

        info!(
            unloaded = report.succeeded,
            failed = report.failures.len(),
            "components unloaded"
        );
        report
    }

    /// Enables one component by name.
    ///
    /// Idempotent: enabling an already-enabled component is a no-op,
    /// not an error.
    ///
    /// # Errors
    ///
    /// - [`ComponentError::UnknownComponent`] for an unknown name
    /// - [`ComponentError::EnableFailed`] if the hook fails or the
    ///   component is in a terminal state
    pub fn enable(
        &mut self,
        name: &str,
        services: &mut HostServices<'_>,
    ) -> Result<(), ComponentError> {
        let index = self.lookup(name)?;
        let entry = &mut self.entries[index];

        if entry.state.is_enabled() {
            return Ok(());
        }
        if !entry.state.can_enable() {
            return Err(ComponentError::enable(format!(
                "component '{name}' is {}",
                entry.state
            )));
        }

        Self::enable_entry(entry, services)
    }

    /// Disables one component by name, releasing its registrations.
    ///
    /// Idempotent: disabling an already-disabled (or never-enabled)
    /// component is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// - [`ComponentError::UnknownComponent`] for an unknown name
    /// - [`ComponentError::DisableFailed`] if the hook fails
    pub fn disable(
        &mut self,
        name: &str,
        services: &mut HostServices<'_>,
    ) -> Result<(), ComponentError> {
        let index = self.lookup(name)?;
        let entry = &mut self.entries[index];

        if !entry.state.is_enabled() {
            return Ok(());
        }

        Self::disable_entry(entry, services)
    }

    /// Returns the state of one component.
    #[must_use]
    pub fn state(&self, name: &str) -> Option<ComponentState> {
        self.index.get(name).map(|&i| self.entries[i].state)
    }

    /// Returns `(name, state)` for every component, in registration order.
    #[must_use]
    pub fn states(&self) -> Vec<(String, ComponentState)> {
        self.entries
            .iter()
            .map(|e| (e.descriptor.name.clone(), e.state))
            .collect()
    }

    fn lookup(&self, name: &str) -> Result<usize, ComponentError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| ComponentError::UnknownComponent {
                name: name.to_string(),
            })
    }

    fn enable_entry(
        entry: &mut Entry,
        services: &mut HostServices<'_>,
    ) -> Result<(), ComponentError> {
        let name = entry.descriptor.name.clone();
        let Some(instance) = entry.instance.as_mut() else {
            return Err(ComponentError::enable(format!(
                "component '{name}' has no instance"
            )));
        };

        match instance.enable(services) {
            Ok(()) => {
                info!(component = name, "component enabled");
                entry.record = services.take_record();
                entry.state = ComponentState::Enabled;
                Ok(())
            }
            Err(err) => {
                error!(component = name, error = %err, "component enable failed");
                // Roll back whatever the hook managed to register.
                let partial = services.take_record();
                services.release(&partial);
                entry.state = ComponentState::Failed;
                Err(err)
            }
        }
    }

    fn disable_entry(
        entry: &mut Entry,
        services: &mut HostServices<'_>,
    ) -> Result<(), ComponentError> {
        let name = entry.descriptor.name.clone();

        // Registrations come out even if the hook below fails; a Failed
        // component must not keep live bindings in the shared registry.
        let record = std::mem::take(&mut entry.record);
        services.release(&record);

        let Some(instance) = entry.instance.as_mut() else {
            return Err(ComponentError::disable(format!(
                "component '{name}' has no instance"
            )));
        };

        match instance.disable() {
            Ok(()) => {
                debug!(component = name, "component disabled");
                entry.state = ComponentState::Disabled;
                Ok(())
            }
            Err(err) => {
                warn!(component = name, error = %err, "component disable failed");
                entry.state = ComponentState::Failed;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ComponentFactory;
    use helm_auth::{AllowAll, AuthorityChain};
    use helm_command::{
        CommandArgs, CommandError, CommandRegistry, CommandSpec, ConfigProvider, HandlerFactory,
    };
    use helm_event::EventBus;
    use helm_types::Actor;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    struct NullConfig;

    impl ConfigProvider for NullConfig {
        fn get_bool(&self, _key: &str, default: bool) -> bool {
            default
        }
        fn get_string(&self, _key: &str) -> Option<String> {
            None
        }
        fn get_integer(&self, _key: &str, default: i64) -> i64 {
            default
        }
        fn get_int_list(&self, _key: &str, default: &[i64]) -> Vec<i64> {
            default.to_vec()
        }
        fn get_string_list(&self, _key: &str) -> Vec<String> {
            Vec::new()
        }
    }

    fn context() -> CoreContext {
        CoreContext::new(
            Arc::new(AuthorityChain::new(true, Arc::new(AllowAll))),
            Arc::new(NullConfig),
        )
    }

    fn noop_factory() -> HandlerFactory {
        Box::new(|_ctx| {
            Box::new(|_args: &CommandArgs, _actor: &dyn Actor| -> Result<(), CommandError> {
                Ok(())
            })
        })
    }

    /// Journaling component: appends lifecycle events to a shared log.
    struct Journaled {
        name: String,
        log: Rc<RefCell<Vec<String>>>,
        fail_enable: bool,
    }

    impl Component for Journaled {
        fn name(&self) -> &str {
            &self.name
        }

        fn enable(&mut self, _host: &mut HostServices<'_>) -> Result<(), ComponentError> {
            if self.fail_enable {
                return Err(ComponentError::enable("intentional"));
            }
            self.log.borrow_mut().push(format!("enable:{}", self.name));
            Ok(())
        }

        fn disable(&mut self) -> Result<(), ComponentError> {
            self.log.borrow_mut().push(format!("disable:{}", self.name));
            Ok(())
        }
    }

    fn journaled_factory(
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
        fail_enable: bool,
    ) -> ComponentFactory {
        Arc::new(move |_ctx| {
            Ok(Box::new(Journaled {
                name: name.to_string(),
                log: log.clone(),
                fail_enable,
            }))
        })
    }

    /// Component that registers one command named after itself.
    struct Commanding {
        command: String,
    }

    impl Component for Commanding {
        fn name(&self) -> &str {
            &self.command
        }

        fn enable(&mut self, host: &mut HostServices<'_>) -> Result<(), ComponentError> {
            host.register_command(CommandSpec::new(self.command.clone()), noop_factory())?;
            Ok(())
        }
    }

    fn commanding_factory(command: &'static str) -> ComponentFactory {
        Arc::new(move |_ctx| {
            Ok(Box::new(Commanding {
                command: command.to_string(),
            }))
        })
    }

    fn loader_of(descriptors: Vec<ComponentDescriptor>) -> impl ComponentLoader {
        struct Once(RefCell<Option<Vec<ComponentDescriptor>>>);
        impl ComponentLoader for Once {
            fn load(&self) -> Result<Vec<ComponentDescriptor>, ComponentError> {
                Ok(self.0.borrow_mut().take().unwrap_or_default())
            }
        }
        Once(RefCell::new(Some(descriptors)))
    }

    #[test]
    fn load_enable_unload_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let ctx = context();
        let mut commands = CommandRegistry::new();
        let mut events = EventBus::new();
        let mut manager = ComponentManager::new();

        manager.register_loader(loader_of(vec![
            ComponentDescriptor::new("a", journaled_factory("a", log.clone(), false)),
            ComponentDescriptor::new("b", journaled_factory("b", log.clone(), false)),
        ]));

        let report = manager.load_components(&ctx);
        assert!(report.is_clean());
        assert_eq!(report.succeeded, 2);

        let mut services = HostServices::new(&mut commands, &mut events, &ctx);
        let report = manager.enable_components(&mut services);
        assert!(report.is_clean());

        let report = manager.unload_components(&mut services);
        assert!(report.is_clean());

        // Enable in registration order, disable in reverse.
        assert_eq!(
            log.borrow().as_slice(),
            &["enable:a", "enable:b", "disable:b", "disable:a"]
        );
        assert_eq!(manager.state("a"), Some(ComponentState::Unloaded));
    }

    #[test]
    fn duplicate_across_loaders_rejected() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let ctx = context();
        let mut manager = ComponentManager::new();

        manager.register_loader(loader_of(vec![ComponentDescriptor::new(
            "a",
            journaled_factory("a", log.clone(), false),
        )]));
        manager.register_loader(loader_of(vec![ComponentDescriptor::new(
            "a",
            journaled_factory("a", log.clone(), false),
        )]));

        let report = manager.load_components(&ctx);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0].1,
            ComponentError::DuplicateComponent { .. }
        ));
        // The first registration survives.
        assert_eq!(manager.state("a"), Some(ComponentState::Instantiated));
    }

    #[test]
    fn instantiation_failure_isolated() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let ctx = context();
        let mut manager = ComponentManager::new();

        let broken: ComponentFactory =
            Arc::new(|_ctx| Err(ComponentError::instantiation("missing backend")));

        manager.register_loader(loader_of(vec![
            ComponentDescriptor::new("good", journaled_factory("good", log.clone(), false)),
            ComponentDescriptor::new("broken", broken),
            ComponentDescriptor::new("also-good", journaled_factory("also-good", log.clone(), false)),
        ]));

        let report = manager.load_components(&ctx);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(manager.state("broken"), Some(ComponentState::Failed));
        assert_eq!(manager.state("good"), Some(ComponentState::Instantiated));
    }

    #[test]
    fn enable_failure_isolated_and_skipped_at_unload() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let ctx = context();
        let mut commands = CommandRegistry::new();
        let mut events = EventBus::new();
        let mut manager = ComponentManager::new();

        manager.register_loader(loader_of(vec![
            ComponentDescriptor::new("a", journaled_factory("a", log.clone(), false)),
            ComponentDescriptor::new("b", journaled_factory("b", log.clone(), true)),
            ComponentDescriptor::new("c", journaled_factory("c", log.clone(), false)),
        ]));

        manager.load_components(&ctx);
        let mut services = HostServices::new(&mut commands, &mut events, &ctx);
        let report = manager.enable_components(&mut services);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, "b");

        // A stayed enabled, C still attempted.
        assert_eq!(manager.state("a"), Some(ComponentState::Enabled));
        assert_eq!(manager.state("b"), Some(ComponentState::Failed));
        assert_eq!(manager.state("c"), Some(ComponentState::Enabled));

        let report = manager.unload_components(&mut services);
        assert!(report.is_clean());

        // B's disable never ran; Failed is absorbing.
        assert_eq!(
            log.borrow().as_slice(),
            &["enable:a", "enable:c", "disable:c", "disable:a"]
        );
        assert_eq!(manager.state("b"), Some(ComponentState::Failed));
    }

    #[test]
    fn enable_disable_idempotent() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let ctx = context();
        let mut commands = CommandRegistry::new();
        let mut events = EventBus::new();
        let mut manager = ComponentManager::new();

        manager.register_loader(loader_of(vec![ComponentDescriptor::new(
            "a",
            journaled_factory("a", log.clone(), false),
        )]));
        manager.load_components(&ctx);

        let mut services = HostServices::new(&mut commands, &mut events, &ctx);
        manager.enable("a", &mut services).unwrap();
        // Second enable is a no-op.
        manager.enable("a", &mut services).unwrap();
        assert_eq!(log.borrow().iter().filter(|e| *e == "enable:a").count(), 1);

        manager.disable("a", &mut services).unwrap();
        manager.disable("a", &mut services).unwrap();
        assert_eq!(log.borrow().iter().filter(|e| *e == "disable:a").count(), 1);
        assert_eq!(manager.state("a"), Some(ComponentState::Disabled));

        // Re-enable after disable works.
        manager.enable("a", &mut services).unwrap();
        assert_eq!(manager.state("a"), Some(ComponentState::Enabled));
    }

    #[test]
    fn disable_components_keeps_instances() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let ctx = context();
        let mut commands = CommandRegistry::new();
        let mut events = EventBus::new();
        let mut manager = ComponentManager::new();

        manager.register_loader(loader_of(vec![
            ComponentDescriptor::new("a", journaled_factory("a", log.clone(), false)),
            ComponentDescriptor::new("b", journaled_factory("b", log.clone(), false)),
        ]));
        manager.load_components(&ctx);

        let mut services = HostServices::new(&mut commands, &mut events, &ctx);
        manager.enable_components(&mut services);

        let report = manager.disable_components(&mut services);
        assert!(report.is_clean());
        assert_eq!(report.succeeded, 2);
        assert_eq!(
            log.borrow().as_slice(),
            &["enable:a", "enable:b", "disable:b", "disable:a"]
        );

        // Instances survive a bulk disable; the set can come back up.
        manager.enable_components(&mut services);
        assert_eq!(manager.state("a"), Some(ComponentState::Enabled));
        assert_eq!(manager.state("b"), Some(ComponentState::Enabled));
    }

    #[test]
    fn disable_releases_commands_and_reenable_reregisters() {
        let ctx = context();
        let mut commands = CommandRegistry::new();
        let mut events = EventBus::new();
        let mut manager = ComponentManager::new();

        manager.register_loader(loader_of(vec![ComponentDescriptor::new(
            "pinger",
            commanding_factory("ping"),
        )]));
        manager.load_components(&ctx);

        let mut services = HostServices::new(&mut commands, &mut events, &ctx);
        manager.enable("pinger", &mut services).unwrap();
        manager.disable("pinger", &mut services).unwrap();
        drop(services);

        // The binding left with its component.
        assert!(commands.is_empty());

        // Re-enable registers from scratch instead of colliding.
        let mut services = HostServices::new(&mut commands, &mut events, &ctx);
        manager.enable("pinger", &mut services).unwrap();
        drop(services);
        assert_eq!(manager.state("pinger"), Some(ComponentState::Enabled));
        assert_eq!(commands.names(), vec!["ping"]);
    }

    #[test]
    fn failed_enable_rolls_back_partial_registrations() {
        struct HalfRegistered;

        impl Component for HalfRegistered {
            fn name(&self) -> &str {
                "half"
            }

            fn enable(&mut self, host: &mut HostServices<'_>) -> Result<(), ComponentError> {
                host.register_command(CommandSpec::new("ping"), noop_factory())?;
                Err(ComponentError::enable("second resource unavailable"))
            }
        }

        let ctx = context();
        let mut commands = CommandRegistry::new();
        let mut events = EventBus::new();
        let mut manager = ComponentManager::new();

        let factory: ComponentFactory = Arc::new(|_ctx| Ok(Box::new(HalfRegistered)));
        manager.register_loader(loader_of(vec![ComponentDescriptor::new("half", factory)]));
        manager.load_components(&ctx);

        let mut services = HostServices::new(&mut commands, &mut events, &ctx);
        manager.enable("half", &mut services).unwrap_err();
        drop(services);

        assert_eq!(manager.state("half"), Some(ComponentState::Failed));
        assert!(commands.is_empty());
    }

    #[test]
    fn unknown_component_errors() {
        let ctx = context();
        let mut commands = CommandRegistry::new();
        let mut events = EventBus::new();
        let mut manager = ComponentManager::new();

        let mut services = HostServices::new(&mut commands, &mut events, &ctx);
        let err = manager.disable("ghost", &mut services).unwrap_err();
        assert_eq!(err, ComponentError::UnknownComponent { name: "ghost".into() });
    }

    #[test]
    fn manual_descriptor_skipped_by_enable_phase() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let ctx = context();
        let mut commands = CommandRegistry::new();
        let mut events = EventBus::new();
        let mut manager = ComponentManager::new();

        manager.register_loader(loader_of(vec![ComponentDescriptor::new(
            "manual",
            journaled_factory("manual", log.clone(), false),
        )
        .manual()]));
        manager.load_components(&ctx);

        let mut services = HostServices::new(&mut commands, &mut events, &ctx);
        let report = manager.enable_components(&mut services);
        assert_eq!(report.succeeded, 0);
        // Explicit enable still works.
        manager.enable("manual", &mut services).unwrap();
        assert_eq!(manager.state("manual"), Some(ComponentState::Enabled));
    }
}
