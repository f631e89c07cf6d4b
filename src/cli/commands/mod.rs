//! CLI command definitions and dispatch.
//!
//! Each group of subcommands lives in its own submodule:
//! - `search`: one-shot search and deep-link dispatch
//! - `interactive`: the search-as-you-type session
//! - `favorites`: listing, adding, removing and showing tracks
//! - `settings`: config file inspection

mod favorites;
mod interactive;
mod search;
mod settings;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

use crate::catalog::{CatalogApi, ItunesClient};
use crate::config::{self, Config};
use crate::favorites::FavoritesStore;
use crate::model::TrackId;
use crate::search::SearchController;

pub use favorites::{cmd_add, cmd_details, cmd_favorites, cmd_remove};
pub use interactive::cmd_interactive;
pub use search::{cmd_open, cmd_search};
pub use settings::cmd_config;

/// Search songs and keep a list of favorites
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to the OS config directory)
    #[arg(long, global = true, env = "TUNESCOUT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Search songs and print one page of results
    Search {
        /// Search term
        term: String,
    },
    /// Search as you type: each input line updates the query
    Interactive {
        /// Initial search term
        #[arg(short, long, default_value = "")]
        term: String,
    },
    /// List favorite tracks
    Favorites,
    /// Add a track to favorites
    Add {
        /// Catalog track ID
        track_id: TrackId,
    },
    /// Remove a track from favorites
    Remove {
        /// Catalog track ID
        track_id: TrackId,
    },
    /// Show details of a track
    Details {
        /// Catalog track ID
        track_id: TrackId,
    },
    /// Open a deep link (tunescout://search/<term> or tunescout://favorites)
    Open {
        /// Link or bare route path
        link: String,
    },
    /// Show the effective configuration
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}

/// Everything a command needs: settings, catalog and favorites.
pub(crate) struct AppContext {
    pub config: Config,
    pub catalog: Arc<dyn CatalogApi>,
    pub favorites: FavoritesStore,
}

impl AppContext {
    fn new(config: Config) -> anyhow::Result<Self> {
        let catalog = ItunesClient::new(&config.search).context("Failed to create catalog client")?;
        let favorites = FavoritesStore::load(
            config.storage.file_storage(),
            config.storage.favorites_key.clone(),
        )
        .context("Failed to load favorites")?;

        Ok(Self {
            catalog: Arc::new(catalog),
            favorites,
            config,
        })
    }

    /// Search controller using the configured debounce window.
    pub fn search_controller(&self) -> SearchController {
        SearchController::with_debounce(Arc::clone(&self.catalog), self.config.search.debounce())
    }

    /// Retry a favorites write that failed during the command.
    fn finish(&mut self) -> anyhow::Result<()> {
        self.favorites
            .flush()
            .context("Favorites could not be saved")
    }
}

#[cfg(test)]
impl AppContext {
    /// Default settings, the given catalog and in-memory favorites.
    pub fn for_tests(catalog: Arc<dyn CatalogApi>) -> Self {
        use crate::favorites::{DEFAULT_STORAGE_KEY, MemoryStorage};

        Self {
            config: Config::default(),
            catalog,
            favorites: FavoritesStore::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY),
        }
    }
}

/// Run the specified CLI command. Without a subcommand the interactive
/// search session starts with an empty term.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    };

    if let Some(Commands::Config { init }) = &cli.command {
        return cmd_config(&config, cli.config.as_deref(), *init);
    }

    // Single-threaded event loop: timers, requests and input share one thread
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let mut ctx = AppContext::new(config)?;

    let result = dispatch(&rt, &mut ctx, cli.command.as_ref());
    let saved = ctx.finish();
    result.and(saved)
}

fn dispatch(rt: &Runtime, ctx: &mut AppContext, command: Option<&Commands>) -> anyhow::Result<()> {
    match command {
        None => cmd_interactive(rt, ctx, ""),
        Some(Commands::Interactive { term }) => cmd_interactive(rt, ctx, term),
        Some(Commands::Search { term }) => cmd_search(rt, ctx, term),
        Some(Commands::Favorites) => {
            cmd_favorites(ctx);
            Ok(())
        }
        Some(Commands::Add { track_id }) => cmd_add(rt, ctx, *track_id),
        Some(Commands::Remove { track_id }) => {
            cmd_remove(ctx, *track_id);
            Ok(())
        }
        Some(Commands::Details { track_id }) => cmd_details(rt, ctx, *track_id),
        Some(Commands::Open { link }) => cmd_open(rt, ctx, link),
        // Handled before the context is built
        Some(Commands::Config { .. }) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_search() {
        let cli = Cli::try_parse_from(["tunescout", "search", "paramore"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Search { ref term }) if term == "paramore"));
    }

    #[test]
    fn test_cli_defaults_to_interactive() {
        let cli = Cli::try_parse_from(["tunescout"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_track_id_must_be_numeric() {
        assert!(Cli::try_parse_from(["tunescout", "add", "abc"]).is_err());
        let cli = Cli::try_parse_from(["tunescout", "add", "123456"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Add { track_id: 123456 })));
    }

    #[test]
    fn test_cli_global_config_flag() {
        let cli =
            Cli::try_parse_from(["tunescout", "favorites", "--config", "/tmp/c.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
