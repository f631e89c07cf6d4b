//! Command-line interface for tunescout.
//!
//! This module provides the subcommands and the interactive search session,
//! plus the plain-text rendering they share.

mod commands;
mod render;

pub use commands::{Cli, Commands, run_command};
