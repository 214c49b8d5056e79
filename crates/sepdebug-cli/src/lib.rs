//! Crate implementing the CLI commands.

mod cli;
mod config;
mod inspect;
mod resolve;

pub use self::cli::{CliAction, CliOpts};
pub use self::config::{DebugDir, ResolveConfig, parse_resolve_config};
pub use self::inspect::evaluate_inspect;
pub use self::resolve::evaluate_resolve;
