//! Built-in demonstration components.
//!
//! Each one is deliberately small; together they exercise the pieces a
//! host component touches: command registration, configuration access,
//! permission guards, macro expansion.

use helm_command::{CommandArgs, CommandError, CommandSpec, CoreContext};
use helm_component::{Component, ComponentError, ComponentFactory, ConfigListedLoader, HostServices};
use helm_runtime::MacroExpander;
use helm_types::Actor;
use std::sync::Arc;

/// `echo <text...>`: repeats its arguments back.
struct Echo;

impl Component for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn enable(&mut self, host: &mut HostServices<'_>) -> Result<(), ComponentError> {
        host.register_command(
            CommandSpec::new("echo")
                .describe("Repeat the given text")
                .usage("/echo <text...>")
                .arity(1, None),
            Box::new(|_ctx| {
                Box::new(
                    |args: &CommandArgs, actor: &dyn Actor| -> Result<(), CommandError> {
                        actor.send_message(&args.joined(0));
                        Ok(())
                    },
                )
            }),
        )?;
        Ok(())
    }
}

/// `motd`: prints the configured message of the day.
struct Motd;

impl Component for Motd {
    fn name(&self) -> &str {
        "motd"
    }

    fn enable(&mut self, host: &mut HostServices<'_>) -> Result<(), ComponentError> {
        host.register_command(
            CommandSpec::new("motd")
                .describe("Show the message of the day")
                .arity(0, Some(0)),
            Box::new(|ctx: &CoreContext| {
                let motd = ctx.config.get_str_or("motd", "No message of the day set.");
                Box::new(
                    move |_args: &CommandArgs, actor: &dyn Actor| -> Result<(), CommandError> {
                        actor.send_message(&motd);
                        Ok(())
                    },
                )
            }),
        )?;
        Ok(())
    }
}

/// `say <template...>`: broadcasts a macro-expanded message.
///
/// Guarded by `helm.say`, so with a denying resolver it demonstrates the
/// operator path of the authority chain.
struct Say;

impl Component for Say {
    fn name(&self) -> &str {
        "say"
    }

    fn enable(&mut self, host: &mut HostServices<'_>) -> Result<(), ComponentError> {
        host.register_command(
            CommandSpec::new("say")
                .describe("Broadcast a message, expanding %name%-style macros")
                .usage("/say <message...>")
                .permission("helm.say")
                .arity(1, None),
            Box::new(|ctx: &CoreContext| {
                let expander = MacroExpander::from_config(ctx.config.as_ref());
                Box::new(
                    move |args: &CommandArgs, actor: &dyn Actor| -> Result<(), CommandError> {
                        let message = expander
                            .expand(actor, &args.joined(0))
                            .map_err(|err| CommandError::Message(err.to_string()))?;
                        actor.send_message(&message);
                        Ok(())
                    },
                )
            }),
        )?;
        Ok(())
    }
}

/// All built-in component names, in enable order.
pub const BUILTINS: &[&str] = &["echo", "motd", "say"];

/// Builds the loader for the built-in set.
///
/// `listed` usually comes from the `components.enabled` config key; an
/// empty list enables every built-in.
pub fn builtin_loader(listed: Vec<String>) -> ConfigListedLoader {
    let listed = if listed.is_empty() {
        BUILTINS.iter().map(|s| (*s).to_string()).collect()
    } else {
        listed
    };

    ConfigListedLoader::new(listed)
        .factory("echo", factory(|| Box::new(Echo)))
        .factory("motd", factory(|| Box::new(Motd)))
        .factory("say", factory(|| Box::new(Say)))
}

fn factory(
    build: impl Fn() -> Box<dyn Component> + 'static,
) -> ComponentFactory {
    Arc::new(move |_ctx| Ok(build()))
}
