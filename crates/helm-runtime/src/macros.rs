//! Macro expansion for message templates.
//!
//! Substitutes `%token%` placeholders in broadcast/kick-style message
//! templates: `%name%` and `%id%` come from the acting actor, further
//! variables from the host. `%cmd:...%` splices in the output of a shell
//! command; it is disabled unless `macros.allow-shell` is set, and runs
//! with a bounded wait so a hung command cannot stall the host.

use helm_command::ConfigProvider;
use helm_types::{Actor, ErrorCode};
use std::collections::HashMap;
use std::io::Read;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::warn;

const DEFAULT_SHELL_TIMEOUT_MS: i64 = 2000;

/// Macro expansion error.
///
/// | Variant | Code | Recoverable |
/// |---------|------|-------------|
/// | [`Spawn`](MacroError::Spawn) | `MACRO_SPAWN_FAILED` | Yes |
/// | [`Timeout`](MacroError::Timeout) | `MACRO_TIMEOUT` | Yes |
#[derive(Debug, Error)]
pub enum MacroError {
    /// The shell command could not be started or read.
    #[error("failed to run macro command '{command}': {detail}")]
    Spawn {
        /// The command text from the macro.
        command: String,
        /// Underlying cause.
        detail: String,
    },

    /// The shell command exceeded its deadline and was killed.
    #[error("macro command '{command}' timed out")]
    Timeout {
        /// The command text from the macro.
        command: String,
    },
}

impl ErrorCode for MacroError {
    fn code(&self) -> &'static str {
        match self {
            Self::Spawn { .. } => "MACRO_SPAWN_FAILED",
            Self::Timeout { .. } => "MACRO_TIMEOUT",
        }
    }

    fn is_recoverable(&self) -> bool {
        true
    }
}

/// Expands `%token%` placeholders in message templates.
pub struct MacroExpander {
    vars: HashMap<String, String>,
    allow_shell: bool,
    shell_timeout: Duration,
}

impl MacroExpander {
    /// Creates an expander with shell substitution disabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
            allow_shell: false,
            shell_timeout: Duration::from_millis(DEFAULT_SHELL_TIMEOUT_MS as u64),
        }
    }

    /// Creates an expander configured from `macros.allow-shell` and
    /// `macros.shell-timeout-ms`.
    #[must_use]
    pub fn from_config(config: &dyn ConfigProvider) -> Self {
        let timeout_ms = config
            .get_integer("macros.shell-timeout-ms", DEFAULT_SHELL_TIMEOUT_MS)
            .max(0) as u64;
        Self {
            vars: HashMap::new(),
            allow_shell: config.get_bool("macros.allow-shell", false),
            shell_timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Adds a host-supplied variable, substituted for `%name%`-style
    /// tokens.
    #[must_use]
    pub fn var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Expands all macros in `template` for `actor`.
    ///
    /// `%name%` is the actor's display name, `%id%` its identity; host
    /// variables come next. Tokens that match nothing are left verbatim,
    /// a stale template must not corrupt the message around it.
    ///
    /// # Errors
    ///
    /// Only `%cmd:...%` substitution can fail, with [`MacroError`].
    pub fn expand(&self, actor: &dyn Actor, template: &str) -> Result<String, MacroError> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find('%') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];

            let Some(end) = after.find('%') else {
                // Unterminated token, emit the tail verbatim.
                out.push_str(&rest[start..]);
                return Ok(out);
            };

            let token = &after[..end];
            match self.resolve(actor, token)? {
                Some(value) => out.push_str(&value),
                None => {
                    out.push('%');
                    out.push_str(token);
                    out.push('%');
                }
            }
            rest = &after[end + 1..];
        }

        out.push_str(rest);
        Ok(out)
    }

    fn resolve(&self, actor: &dyn Actor, token: &str) -> Result<Option<String>, MacroError> {
        if let Some(command) = token.strip_prefix("cmd:") {
            if !self.allow_shell {
                warn!(command, "shell macro ignored, macros.allow-shell is off");
                return Ok(None);
            }
            return self.run_shell(command).map(Some);
        }

        Ok(match token {
            "name" => Some(actor.display_name().to_string()),
            "id" => Some(actor.identity().to_string()),
            other => self.vars.get(other).cloned(),
        })
    }

    fn run_shell(&self, command: &str) -> Result<String, MacroError> {
        let spawn_err = |detail: &dyn std::fmt::Display| MacroError::Spawn {
            command: command.to_string(),
            detail: detail.to_string(),
        };

        let mut child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| spawn_err(&e))?;

        // Drain stdout while the child runs. A child that fills the pipe
        // would otherwise block on write and never exit, turning any
        // sizeable output into a timeout.
        let reader = child.stdout.take().map(|mut stdout| {
            std::thread::spawn(move || -> std::io::Result<String> {
                let mut output = String::new();
                stdout.read_to_string(&mut output)?;
                Ok(output)
            })
        });

        let deadline = Instant::now() + self.shell_timeout;
        loop {
            match child.try_wait().map_err(|e| spawn_err(&e))? {
                Some(_status) => break,
                None if Instant::now() >= deadline => {
                    // Past the deadline the child is killed, not awaited
                    // further.
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(MacroError::Timeout {
                        command: command.to_string(),
                    });
                }
                None => std::thread::sleep(Duration::from_millis(10)),
            }
        }

        let output = match reader {
            Some(handle) => handle
                .join()
                .map_err(|_| spawn_err(&"output reader panicked"))?
                .map_err(|e| spawn_err(&e))?,
            None => String::new(),
        };
        Ok(output.trim_end_matches('\n').to_string())
    }
}

impl Default for MacroExpander {
    fn default() -> Self {
        Self::new()
    }
}
