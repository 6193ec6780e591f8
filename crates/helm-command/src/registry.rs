//! Command registry: bindings, aliases, nested groups.

use crate::{CommandArgs, CommandError, CommandSpec, CoreContext, RegistryError};
use helm_types::Actor;
use std::collections::HashMap;
use tracing::debug;

/// A callable command handler.
///
/// Receives the parsed arguments and the issuing actor; completes
/// normally (optionally sending actor-visible output) or raises one
/// [`CommandError`].
pub trait CommandHandler {
    /// Executes the command.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] taxonomy entry on failure.
    fn run(&self, args: &CommandArgs, actor: &dyn Actor) -> Result<(), CommandError>;
}

// Closures are handlers; most built-in commands are written this way.
impl<F> CommandHandler for F
where
    F: Fn(&CommandArgs, &dyn Actor) -> Result<(), CommandError>,
{
    fn run(&self, args: &CommandArgs, actor: &dyn Actor) -> Result<(), CommandError> {
        self(args, actor)
    }
}

/// Constructs a handler instance from the fixed context bundle.
///
/// The explicit replacement for reflection-based constructor injection:
/// each binding carries the function that builds its handler, and the
/// dispatcher calls it with the shared [`CoreContext`] per invocation.
pub type HandlerFactory = Box<dyn Fn(&CoreContext) -> Box<dyn CommandHandler>>;

/// One registered binding: a leaf handler or a nested command-group.
pub(crate) enum Binding {
    Leaf {
        spec: CommandSpec,
        factory: HandlerFactory,
    },
    Group {
        spec: CommandSpec,
        registry: CommandRegistry,
    },
}

impl Binding {
    pub(crate) fn spec(&self) -> &CommandSpec {
        match self {
            Self::Leaf { spec, .. } | Self::Group { spec, .. } => spec,
        }
    }
}

/// Maps command names and aliases to bindings.
///
/// Registration happens during component `enable()`; bindings are
/// immutable afterward and owned by the registry. Lookup is by exact
/// name first, then alias. Collisions on either are a registration-time
/// error - fail fast, never at dispatch time.
#[derive(Default)]
pub struct CommandRegistry {
    bindings: Vec<Binding>,
    by_name: HashMap<String, usize>,
    by_alias: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a leaf command.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateCommand`] if the name or any
    /// alias collides with an existing binding at this level.
    pub fn register(
        &mut self,
        spec: CommandSpec,
        factory: HandlerFactory,
    ) -> Result<(), RegistryError> {
        self.insert(Binding::Leaf { spec, factory })
    }

    /// Registers a command-group whose sub-commands are built by `build`.
    ///
    /// Group specs usually carry no arity; arity applies to leaves.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] from the group itself or from any
    /// registration `build` performs.
    pub fn register_group(
        &mut self,
        spec: CommandSpec,
        build: impl FnOnce(&mut CommandRegistry) -> Result<(), RegistryError>,
    ) -> Result<(), RegistryError> {
        let mut registry = CommandRegistry::new();
        build(&mut registry)?;
        self.insert(Binding::Group { spec, registry })
    }

    /// Removes a binding by primary name, with its aliases.
    ///
    /// Returns `false` if no binding carries that name. Used when a
    /// component is disabled: its bindings leave the registry so a later
    /// re-enable can register them again without colliding.
    pub fn remove(&mut self, name: &str) -> bool {
        let key = name.to_lowercase();
        let Some(index) = self.by_name.remove(&key) else {
            return false;
        };

        let binding = self.bindings.remove(index);
        for alias in &binding.spec().aliases {
            self.by_alias.remove(&alias.to_lowercase());
        }

        // Bindings after the removed one shifted down by one.
        for slot in self.by_name.values_mut().chain(self.by_alias.values_mut()) {
            if *slot > index {
                *slot -= 1;
            }
        }

        debug!(command = binding.spec().name, "removed command");
        true
    }

    /// Resolves a command by exact name, then by alias.
    pub(crate) fn resolve(&self, name: &str) -> Option<&Binding> {
        let key = name.to_lowercase();
        self.by_name
            .get(&key)
            .or_else(|| self.by_alias.get(&key))
            .map(|&i| &self.bindings[i])
    }

    /// Returns the primary names of every binding, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.iter().map(|b| b.spec().name.clone()).collect();
        names.sort();
        names
    }

    /// Returns `(name, description)` for every binding, sorted by name.
    #[must_use]
    pub fn descriptions(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .bindings
            .iter()
            .map(|b| (b.spec().name.clone(), b.spec().description.clone()))
            .collect();
        entries.sort();
        entries
    }

    /// Number of bindings at this level.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if no bindings are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn insert(&mut self, binding: Binding) -> Result<(), RegistryError> {
        let spec = binding.spec();
        let name = spec.name.to_lowercase();
        let aliases: Vec<String> = spec.aliases.iter().map(|a| a.to_lowercase()).collect();

        self.reject_collision(&name)?;
        for alias in &aliases {
            self.reject_collision(alias)?;
        }

        debug!(command = spec.name, aliases = ?spec.aliases, "registered command");

        let index = self.bindings.len();
        self.by_name.insert(name, index);
        for alias in aliases {
            self.by_alias.insert(alias, index);
        }
        self.bindings.push(binding);
        Ok(())
    }

    fn reject_collision(&self, key: &str) -> Result<(), RegistryError> {
        if self.by_name.contains_key(key) || self.by_alias.contains_key(key) {
            return Err(RegistryError::DuplicateCommand {
                name: key.to_string(),
            });
        }
        Ok(())
    }
}
