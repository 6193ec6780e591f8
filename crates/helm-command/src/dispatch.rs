//! The dispatcher: lookup, permission check, validation, invocation.

use crate::registry::Binding;
use crate::{
    CommandArgs, CommandError, CommandRegistry, CommandSpec, CoreContext, UnknownFlag,
};
use helm_types::{Actor, ActorSnapshot};
use tracing::{debug, error};

/// Result of a successful dispatch call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A binding matched and its handler completed normally.
    Handled,

    /// No binding matched the top-level name.
    ///
    /// Not a failure - the host may have other command sources.
    Unknown,
}

/// Binds invocations to handlers and executes them safely.
///
/// Borrows the registry and context for the duration of one dispatch
/// phase; the host owns both and serializes access (single-threaded,
/// run-to-completion model - no concurrent dispatches exist).
pub struct Dispatcher<'a> {
    registry: &'a CommandRegistry,
    context: &'a CoreContext,
}

impl<'a> Dispatcher<'a> {
    /// Creates a dispatcher over a registry and context bundle.
    #[must_use]
    pub fn new(registry: &'a CommandRegistry, context: &'a CoreContext) -> Self {
        Self { registry, context }
    }

    /// Dispatches one invocation.
    ///
    /// Looks up the binding (exact name, then alias); absent bindings
    /// yield [`Dispatch::Unknown`], never an error. For a match, the
    /// pipeline is: permission check (exactly once, strictly before the
    /// handler, never cached) -> flag/arity validation -> handler
    /// construction -> invocation. Nested groups recurse one token per
    /// path segment.
    ///
    /// # Errors
    ///
    /// Exactly one [`CommandError`] taxonomy entry per failed dispatch.
    pub fn dispatch(
        &self,
        command: &str,
        args: &[String],
        actor: &dyn Actor,
    ) -> Result<Dispatch, CommandError> {
        let Some(binding) = self.registry.resolve(command) else {
            debug!(command, actor = %ActorSnapshot::of(actor), "unknown command");
            return Ok(Dispatch::Unknown);
        };

        debug!(command, actor = %ActorSnapshot::of(actor), "dispatching");
        self.execute(binding, args, actor)?;
        Ok(Dispatch::Handled)
    }

    fn execute(
        &self,
        binding: &Binding,
        args: &[String],
        actor: &dyn Actor,
    ) -> Result<(), CommandError> {
        // Each binding's permission is checked once, before anything else
        // runs at this level. Results are never cached; permissions may
        // change between calls for the same actor.
        if let Some(permission) = &binding.spec().permission {
            self.context.authority.check_permission(actor, permission)?;
        }

        match binding {
            Binding::Leaf { spec, factory } => {
                let parsed = parse_args(spec, args)?;
                if !spec.accepts_arity(parsed.len()) {
                    let message = if parsed.len() < spec.min_args {
                        "Too few arguments."
                    } else {
                        "Too many arguments."
                    };
                    return Err(CommandError::Usage {
                        message: message.into(),
                        usage: spec.usage.clone(),
                    });
                }

                let handler = factory(self.context);
                handler.run(&parsed, actor)
            }
            Binding::Group { registry, .. } => {
                let Some((head, rest)) = args.split_first() else {
                    return Err(CommandError::MissingNested {
                        choices: registry.names(),
                    });
                };
                match registry.resolve(head) {
                    Some(child) => self.execute(child, rest, actor),
                    None => Err(CommandError::MissingNested {
                        choices: registry.names(),
                    }),
                }
            }
        }
    }
}

fn parse_args(spec: &CommandSpec, args: &[String]) -> Result<CommandArgs, CommandError> {
    CommandArgs::parse(args, &spec.flags).map_err(|UnknownFlag(c)| CommandError::Usage {
        message: format!("Unknown flag: -{c}"),
        usage: spec.usage.clone(),
    })
}

/// Renders a dispatch failure to the actor.
///
/// This is the single boundary where the taxonomy becomes actor-visible
/// text. Internal execution detail goes to the log, not to the actor.
pub fn render_error(err: &CommandError, actor: &dyn Actor) {
    match err {
        CommandError::PermissionDenied => {
            actor.send_message("You don't have permission.");
        }
        CommandError::Usage { message, usage } => {
            actor.send_message(message);
            actor.send_message(usage);
        }
        CommandError::MissingNested { choices } => {
            actor.send_message(&format!("Sub-command required: {}", choices.join(", ")));
        }
        CommandError::NumberExpected { .. } => {
            actor.send_message("Number expected, string received instead.");
        }
        CommandError::Execution { detail } => {
            error!(detail, "command execution failed");
            actor.send_message("An error has occurred. See console.");
        }
        CommandError::Message(message) => {
            actor.send_message(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::{permissive_context, strict_context};
    use crate::HandlerFactory;
    use helm_types::testing::RecordingActor;
    use std::cell::Cell;
    use std::rc::Rc;

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| (*s).to_string()).collect()
    }

    fn noop_factory() -> HandlerFactory {
        Box::new(|_ctx| {
            Box::new(|_args: &CommandArgs, _actor: &dyn Actor| -> Result<(), CommandError> {
                Ok(())
            })
        })
    }

    /// Factory whose handler records that it ran.
    fn tracking_factory(ran: Rc<Cell<bool>>) -> HandlerFactory {
        Box::new(move |_ctx| {
            let ran = ran.clone();
            Box::new(
                move |_args: &CommandArgs, _actor: &dyn Actor| -> Result<(), CommandError> {
                    ran.set(true);
                    Ok(())
                },
            )
        })
    }

    #[test]
    fn unknown_command_is_not_an_error() {
        let registry = CommandRegistry::new();
        let ctx = permissive_context();
        let dispatcher = Dispatcher::new(&registry, &ctx);
        let actor = RecordingActor::named("alice");

        let outcome = dispatcher.dispatch("nosuch", &[], &actor).unwrap();
        assert_eq!(outcome, Dispatch::Unknown);
    }

    #[test]
    fn handled_command_runs_handler() {
        let ran = Rc::new(Cell::new(false));
        let mut registry = CommandRegistry::new();
        registry
            .register(CommandSpec::new("ping"), tracking_factory(ran.clone()))
            .unwrap();

        let ctx = permissive_context();
        let dispatcher = Dispatcher::new(&registry, &ctx);
        let actor = RecordingActor::named("alice");

        let outcome = dispatcher.dispatch("ping", &[], &actor).unwrap();
        assert_eq!(outcome, Dispatch::Handled);
        assert!(ran.get());
    }

    #[test]
    fn permission_checked_before_handler() {
        let ran = Rc::new(Cell::new(false));
        let mut registry = CommandRegistry::new();
        registry
            .register(
                CommandSpec::new("kick")
                    .permission("helm.kick")
                    .arity(1, Some(1)),
                tracking_factory(ran.clone()),
            )
            .unwrap();

        let ctx = strict_context();
        let dispatcher = Dispatcher::new(&registry, &ctx);
        let actor = RecordingActor::named("bob");

        let err = dispatcher
            .dispatch("kick", &strings(&["Alice"]), &actor)
            .unwrap_err();
        assert_eq!(err, CommandError::PermissionDenied);
        assert!(!ran.get());
    }

    #[test]
    fn operator_passes_with_honoring_on() {
        let mut registry = CommandRegistry::new();
        registry
            .register(
                CommandSpec::new("kick")
                    .permission("helm.kick")
                    .arity(1, Some(1)),
                Box::new(|_ctx| {
                    Box::new(
                        |args: &CommandArgs, _actor: &dyn Actor| -> Result<(), CommandError> {
                            assert_eq!(args.string(0), Some("Alice"));
                            Ok(())
                        },
                    )
                }),
            )
            .unwrap();

        let ctx = strict_context();
        let dispatcher = Dispatcher::new(&registry, &ctx);
        let operator = RecordingActor::named("bob").as_operator();

        let outcome = dispatcher
            .dispatch("kick", &strings(&["Alice"]), &operator)
            .unwrap();
        assert_eq!(outcome, Dispatch::Handled);
    }

    #[test]
    fn arity_violation_never_invokes_handler() {
        let ran = Rc::new(Cell::new(false));
        let mut registry = CommandRegistry::new();
        registry
            .register(
                CommandSpec::new("kick")
                    .usage("/kick <player>")
                    .arity(1, Some(1)),
                tracking_factory(ran.clone()),
            )
            .unwrap();

        let ctx = permissive_context();
        let dispatcher = Dispatcher::new(&registry, &ctx);
        let actor = RecordingActor::named("alice");

        let err = dispatcher.dispatch("kick", &[], &actor).unwrap_err();
        assert_eq!(
            err,
            CommandError::Usage {
                message: "Too few arguments.".into(),
                usage: "/kick <player>".into(),
            }
        );

        let err = dispatcher
            .dispatch("kick", &strings(&["a", "b"]), &actor)
            .unwrap_err();
        assert_eq!(
            err,
            CommandError::Usage {
                message: "Too many arguments.".into(),
                usage: "/kick <player>".into(),
            }
        );
        assert!(!ran.get());
    }

    #[test]
    fn unknown_flag_is_usage_error() {
        let mut registry = CommandRegistry::new();
        registry
            .register(CommandSpec::new("kick").flags("s"), noop_factory())
            .unwrap();

        let ctx = permissive_context();
        let dispatcher = Dispatcher::new(&registry, &ctx);
        let actor = RecordingActor::named("alice");

        let err = dispatcher
            .dispatch("kick", &strings(&["-q", "Alice"]), &actor)
            .unwrap_err();
        assert!(matches!(err, CommandError::Usage { ref message, .. } if message == "Unknown flag: -q"));
    }

    #[test]
    fn nested_dispatch_reaches_leaf() {
        let ran = Rc::new(Cell::new(false));
        let mut registry = CommandRegistry::new();
        registry
            .register_group(CommandSpec::new("plugin"), |group| {
                group.register(CommandSpec::new("list"), tracking_factory(ran.clone()))?;
                group.register(CommandSpec::new("reload"), noop_factory())
            })
            .unwrap();

        let ctx = permissive_context();
        let dispatcher = Dispatcher::new(&registry, &ctx);
        let actor = RecordingActor::named("alice");

        let outcome = dispatcher
            .dispatch("plugin", &strings(&["list"]), &actor)
            .unwrap();
        assert_eq!(outcome, Dispatch::Handled);
        assert!(ran.get());
    }

    #[test]
    fn missing_nested_lists_choices() {
        let mut registry = CommandRegistry::new();
        registry
            .register_group(CommandSpec::new("plugin"), |group| {
                group.register(CommandSpec::new("list"), noop_factory())?;
                group.register(CommandSpec::new("reload"), noop_factory())
            })
            .unwrap();

        let ctx = permissive_context();
        let dispatcher = Dispatcher::new(&registry, &ctx);
        let actor = RecordingActor::named("alice");

        // Unknown sub-command.
        let err = dispatcher
            .dispatch("plugin", &strings(&["bogus"]), &actor)
            .unwrap_err();
        assert_eq!(
            err,
            CommandError::MissingNested {
                choices: vec!["list".into(), "reload".into()],
            }
        );

        // No sub-command at all.
        let err = dispatcher.dispatch("plugin", &[], &actor).unwrap_err();
        assert!(matches!(err, CommandError::MissingNested { .. }));
    }

    #[test]
    fn group_permission_guards_subcommands() {
        let ran = Rc::new(Cell::new(false));
        let mut registry = CommandRegistry::new();
        registry
            .register_group(CommandSpec::new("admin").permission("helm.admin"), |group| {
                group.register(CommandSpec::new("reload"), tracking_factory(ran.clone()))
            })
            .unwrap();

        let ctx = strict_context();
        let dispatcher = Dispatcher::new(&registry, &ctx);
        let actor = RecordingActor::named("bob");

        let err = dispatcher
            .dispatch("admin", &strings(&["reload"]), &actor)
            .unwrap_err();
        assert_eq!(err, CommandError::PermissionDenied);
        assert!(!ran.get());
    }

    #[test]
    fn handler_number_failure_surfaces_distinctly() {
        let mut registry = CommandRegistry::new();
        registry
            .register(
                CommandSpec::new("time").arity(1, Some(1)),
                Box::new(|_ctx| {
                    Box::new(
                        |args: &CommandArgs, _actor: &dyn Actor| -> Result<(), CommandError> {
                            let _ticks = args.integer(0)?;
                            Ok(())
                        },
                    )
                }),
            )
            .unwrap();

        let ctx = permissive_context();
        let dispatcher = Dispatcher::new(&registry, &ctx);
        let actor = RecordingActor::named("alice");

        let err = dispatcher
            .dispatch("time", &strings(&["dawn"]), &actor)
            .unwrap_err();
        assert_eq!(err, CommandError::NumberExpected { token: "dawn".into() });
    }

    #[test]
    fn render_error_messages() {
        let actor = RecordingActor::named("alice");

        render_error(&CommandError::PermissionDenied, &actor);
        render_error(
            &CommandError::Usage {
                message: "Too few arguments.".into(),
                usage: "/kick <player>".into(),
            },
            &actor,
        );
        render_error(
            &CommandError::MissingNested {
                choices: vec!["list".into(), "reload".into()],
            },
            &actor,
        );
        render_error(&CommandError::NumberExpected { token: "x".into() }, &actor);
        render_error(&CommandError::execution("stack trace here"), &actor);
        render_error(&CommandError::Message("That player is offline.".into()), &actor);

        assert_eq!(
            actor.messages(),
            vec![
                "You don't have permission.",
                "Too few arguments.",
                "/kick <player>",
                "Sub-command required: list, reload",
                "Number expected, string received instead.",
                "An error has occurred. See console.",
                "That player is offline.",
            ]
        );
    }

    #[test]
    fn execution_detail_not_shown_to_actor() {
        let actor = RecordingActor::named("alice");
        render_error(&CommandError::execution("secret internal state"), &actor);

        for message in actor.messages() {
            assert!(!message.contains("secret internal state"));
        }
    }
}
