//! Host runtime for the helm command/component core.
//!
//! The crates below this one define the abstractions (actors, permission
//! resolution, events, commands, components); this crate supplies the
//! concrete host pieces and wires everything together:
//!
//! | Module | Provides |
//! |--------|----------|
//! | [`config`](TomlConfig) | TOML-backed [`ConfigProvider`], in-memory test provider |
//! | [`console`](ConsoleActor) | The console actor (`*Console*`, passes all permission checks) |
//! | [`macros`](MacroExpander) | `%token%` expansion for message templates |
//! | [`core`](HostCore) | The assembled host facade and its phase driving |
//!
//! [`ConfigProvider`]: helm_command::ConfigProvider

mod config;
mod console;
mod core;
mod macros;

pub use config::{ConfigError, MemoryConfig, TomlConfig};
pub use console::ConsoleActor;
pub use self::core::{HostCore, StartupReport};
pub use macros::{MacroError, MacroExpander};
