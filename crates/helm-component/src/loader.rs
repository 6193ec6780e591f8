//! Component discovery: descriptors and loader strategies.

use crate::{Component, ComponentError};
use helm_command::CoreContext;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Constructs a component instance from the fixed context bundle.
///
/// Shared (`Arc`) so a loader can hand the same factory to every
/// descriptor it produces across reloads.
pub type ComponentFactory =
    Arc<dyn Fn(&CoreContext) -> Result<Box<dyn Component>, ComponentError>>;

/// Identifies one pluggable unit before it is instantiated.
///
/// Produced by loaders, owned exclusively by the manager, never shared.
pub struct ComponentDescriptor {
    /// Unique component name.
    pub name: String,

    /// Whether the component should be enabled during the enable phase.
    ///
    /// A descriptor with `enabled: false` is instantiated but left for
    /// an explicit `enable(name)` call.
    pub enabled: bool,

    factory: ComponentFactory,
}

impl ComponentDescriptor {
    /// Creates a descriptor that enables during the enable phase.
    #[must_use]
    pub fn new(name: impl Into<String>, factory: ComponentFactory) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            factory,
        }
    }

    /// Marks the descriptor as not auto-enabled.
    #[must_use]
    pub fn manual(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Instantiates the component, injecting the shared context.
    ///
    /// # Errors
    ///
    /// Propagates the factory's [`ComponentError`].
    pub fn instantiate(&self, ctx: &CoreContext) -> Result<Box<dyn Component>, ComponentError> {
        (self.factory)(ctx)
    }
}

/// A discovery strategy contributing component descriptors.
///
/// Multiple loaders may be registered; the manager merges their output
/// and rejects duplicate names across loaders.
pub trait ComponentLoader {
    /// Produces the descriptors this strategy discovers.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError`] if discovery itself fails (not for
    /// individual bad components - those fail at instantiation).
    fn load(&self) -> Result<Vec<ComponentDescriptor>, ComponentError>;
}

/// Loader that reads component names from configuration.
///
/// Resolves each name in the `components.enabled` string list against a
/// table of registered factories. Unknown names are logged and skipped -
/// a stale config entry must not block startup.
///
/// # Example
///
/// ```
/// use helm_component::{ComponentLoader, ConfigListedLoader};
/// # use helm_component::{Component, ComponentError, HostServices};
/// use std::sync::Arc;
/// # struct Echo;
/// # impl Component for Echo {
/// #     fn name(&self) -> &str { "echo" }
/// #     fn enable(&mut self, _h: &mut HostServices<'_>) -> Result<(), ComponentError> { Ok(()) }
/// # }
///
/// let loader = ConfigListedLoader::new(vec!["echo".into()])
///     .factory("echo", Arc::new(|_ctx| Ok(Box::new(Echo))));
///
/// let descriptors = loader.load().unwrap();
/// assert_eq!(descriptors.len(), 1);
/// assert_eq!(descriptors[0].name, "echo");
/// ```
pub struct ConfigListedLoader {
    listed: Vec<String>,
    factories: HashMap<String, ComponentFactory>,
}

impl ConfigListedLoader {
    /// Creates a loader over a pre-read name list.
    ///
    /// The caller typically fills `listed` from
    /// `config.get_string_list("components.enabled")`.
    #[must_use]
    pub fn new(listed: Vec<String>) -> Self {
        Self {
            listed,
            factories: HashMap::new(),
        }
    }

    /// Registers the factory for a component name.
    #[must_use]
    pub fn factory(mut self, name: impl Into<String>, factory: ComponentFactory) -> Self {
        self.factories.insert(name.into(), factory);
        self
    }
}

impl ComponentLoader for ConfigListedLoader {
    fn load(&self) -> Result<Vec<ComponentDescriptor>, ComponentError> {
        let mut descriptors = Vec::new();
        for name in &self.listed {
            match self.factories.get(name) {
                Some(factory) => {
                    descriptors.push(ComponentDescriptor::new(name.clone(), factory.clone()));
                }
                None => {
                    warn!(component = name, "no factory for listed component, skipping");
                }
            }
        }
        Ok(descriptors)
    }
}
