//! tunescout - search songs in the iTunes catalog and keep a list of favorites.
//!
//! Search-as-you-type is debounced and only the latest lookup may publish
//! results. Favorites are persisted after every change. Everything runs from
//! the command line; without a subcommand an interactive search session
//! starts.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod favorites;
pub mod model;
pub mod routes;
pub mod search;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging (stderr, so it never mixes with command output)
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tunescout=info")))
        .init();

    cli::run_command(&args)
}
