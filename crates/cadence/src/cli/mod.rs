//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the cadence binary.

mod commands;
mod diagnostics;
mod serve;

pub use commands::{Cli, Commands};
pub use diagnostics::{print_backoff, print_skills};
pub use serve::run_server;
