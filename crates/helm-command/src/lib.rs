//! Command registry and dispatcher for the helm core.
//!
//! Binds textual command invocations to registered handlers and executes
//! them safely. Every dispatch runs the same pipeline:
//!
//! ```text
//! inbound (name, args, actor)
//!     │
//!     ▼
//! CommandRegistry::resolve      exact name, then alias
//!     │                         unknown -> Dispatch::Unknown (non-fatal)
//!     ▼
//! AuthorityChain::check         exactly once, before the handler,
//!     │                         never cached
//!     ▼
//! flag + arity validation       violations never reach the handler
//!     │
//!     ▼
//! HandlerFactory(&CoreContext)  explicit constructor injection,
//!     │                         no reflection, no globals
//!     ▼
//! CommandHandler::run(args, actor)
//! ```
//!
//! Failures surface as exactly one [`CommandError`] per dispatch; the
//! dispatcher never lets a handler's raw internal failure escape
//! un-translated. [`render_error`] is the single place that turns the
//! taxonomy into actor-visible text.
//!
//! Nested commands are command-groups: dispatch consumes one argument
//! token per path segment until a leaf handler is reached, or reports
//! the valid choices at the level that failed to match.

mod args;
mod context;
mod dispatch;
mod error;
mod registry;
mod spec;

pub use args::CommandArgs;
pub use context::{ConfigProvider, CoreContext};
pub use dispatch::{render_error, Dispatch, Dispatcher};
pub use error::{CommandError, RegistryError, UnknownFlag};
pub use registry::{CommandHandler, CommandRegistry, HandlerFactory};
pub use spec::CommandSpec;
