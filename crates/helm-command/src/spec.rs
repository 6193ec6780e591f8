//! Declarative command metadata.

use serde::{Deserialize, Serialize};

/// Immutable record describing one command binding.
///
/// Created once at registration time; read-only afterward. The registry
/// owns all specs.
///
/// # Fields
///
/// | Field | Meaning |
/// |-------|---------|
/// | `name` | Primary name, lookup key |
/// | `aliases` | Alternate names, checked after exact names |
/// | `permission` | Required permission string, if any |
/// | `usage` | Usage text shown on arity/flag errors |
/// | `description` | One-line help text |
/// | `min_args`, `max_args` | Positional-argument arity (`None` = unbounded) |
/// | `flags` | Declared single-letter flags (e.g. `"so"` accepts `-s`, `-o`) |
///
/// # Example
///
/// ```
/// use helm_command::CommandSpec;
///
/// let spec = CommandSpec::new("kick")
///     .alias("boot")
///     .permission("helm.kick")
///     .usage("/kick <player>")
///     .describe("Remove a player from the session")
///     .arity(1, Some(1));
///
/// assert_eq!(spec.name, "kick");
/// assert_eq!(spec.min_args, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Primary command name.
    pub name: String,

    /// Alternate names.
    pub aliases: Vec<String>,

    /// Required permission string, checked before the handler runs.
    pub permission: Option<String>,

    /// Usage text, rendered on usage errors.
    pub usage: String,

    /// One-line description.
    pub description: String,

    /// Minimum positional arguments.
    pub min_args: usize,

    /// Maximum positional arguments; `None` means unbounded.
    pub max_args: Option<usize>,

    /// Declared single-letter flags.
    pub flags: String,
}

impl CommandSpec {
    /// Creates a spec with the given primary name and open arity.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            usage: format!("/{name}"),
            name,
            aliases: Vec::new(),
            permission: None,
            description: String::new(),
            min_args: 0,
            max_args: None,
            flags: String::new(),
        }
    }

    /// Adds an alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Sets the required permission string.
    #[must_use]
    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    /// Sets the usage text.
    #[must_use]
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the positional-argument arity.
    #[must_use]
    pub fn arity(mut self, min: usize, max: Option<usize>) -> Self {
        self.min_args = min;
        self.max_args = max;
        self
    }

    /// Declares accepted single-letter flags.
    #[must_use]
    pub fn flags(mut self, flags: impl Into<String>) -> Self {
        self.flags = flags.into();
        self
    }

    /// Returns whether `count` positional arguments satisfy the arity.
    #[must_use]
    pub fn accepts_arity(&self, count: usize) -> bool {
        count >= self.min_args && self.max_args.map_or(true, |max| count <= max)
    }
}
