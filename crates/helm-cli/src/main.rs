//! helm - interactive shell for the command/component core.
//!
//! Boots a [`HostCore`] from an optional TOML config file, enables the
//! built-in component set, and feeds it lines from a rustyline prompt
//! (or a single command given on the command line).
//!
//! The demo resolver denies everything, so permission-guarded commands
//! require `--operator` (or `op-permissions = false` in the config to
//! see the denial path even as an operator).

mod components;

use anyhow::{Context, Result};
use clap::Parser;
use helm_auth::DenyAll;
use helm_command::ConfigProvider;
use helm_runtime::{HostCore, MemoryConfig, TomlConfig};
use helm_types::Actor;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// helm - interactive shell for the command/component core
#[derive(Parser, Debug)]
#[command(name = "helm")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Actor name for the session
    #[arg(short, long, default_value = "local")]
    name: String,

    /// Give the session actor the operator flag
    #[arg(short, long)]
    operator: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Command to execute instead of starting the prompt
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

/// The local terminal session as an actor.
struct SessionActor {
    name: String,
    operator: bool,
}

impl Actor for SessionActor {
    fn identity(&self) -> &str {
        &self.name
    }

    fn is_operator(&self) -> bool {
        self.operator
    }

    fn send_message(&self, message: &str) {
        println!("{message}");
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .init();

    let config: Arc<dyn ConfigProvider> = match &args.config {
        Some(path) => Arc::new(
            TomlConfig::from_path(path)
                .with_context(|| format!("loading config {}", path.display()))?,
        ),
        None => Arc::new(MemoryConfig::new()),
    };

    let listed = config.get_string_list("components.enabled");
    let mut core = HostCore::new(config, Arc::new(DenyAll));
    core.register_loader(components::builtin_loader(listed));

    let report = core.start();
    for (name, err) in report.load.failures.iter().chain(&report.enable.failures) {
        eprintln!("component {name}: {err}");
    }

    let actor = SessionActor {
        name: args.name.clone(),
        operator: args.operator,
    };
    info!(actor = actor.name, operator = actor.operator, "session started");

    if !args.command.is_empty() {
        core.handle_line(&args.command.join(" "), &actor);
        core.shutdown();
        return Ok(());
    }

    println!("helm v{} - type a command, or 'exit' to quit", env!("CARGO_PKG_VERSION"));
    run_prompt(&core, &actor)?;

    core.shutdown();
    Ok(())
}

fn run_prompt(core: &HostCore, actor: &SessionActor) -> Result<()> {
    let mut editor = DefaultEditor::new()?;

    loop {
        match editor.readline("helm> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    break;
                }
                editor.add_history_entry(line)?;
                core.handle_line(line, actor);
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
