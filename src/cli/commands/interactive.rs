//! Interactive search session.
//!
//! Every input line is a change of the search box text; the controller
//! debounces them, so lines entered in quick succession (or pasted) produce a
//! single lookup. Lines starting with `:` are session commands.

use std::future::Future;
use std::io::{self, BufRead, BufReader};

use futures::channel::mpsc::{self, UnboundedReceiver};
use futures::{Stream, StreamExt};
use tokio::runtime::Runtime;

use super::AppContext;
use crate::cli::render;
use crate::error::{Result, ResultExt};
use crate::search::SearchResults;

const HELP: &str = "\
Type to search. An empty line clears the results.
  :fav N       toggle favorite for result N
  :details N   show result N
  :favorites   list favorites
  :help        show this help
  :quit        leave";

/// One line of session input
#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionInput {
    Query(String),
    ToggleFavorite(usize),
    Details(usize),
    Favorites,
    Help,
    Quit,
    Invalid(String),
}

impl SessionInput {
    fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);

        let Some(command) = line.strip_prefix(':') else {
            return Self::Query(line.to_string());
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let position = parts.next().and_then(|n| n.parse::<usize>().ok());

        match (name, position) {
            ("fav" | "f", Some(n)) if n > 0 => Self::ToggleFavorite(n),
            ("details" | "d", Some(n)) if n > 0 => Self::Details(n),
            ("favorites" | "favs", None) => Self::Favorites,
            ("help" | "h" | "?", None) => Self::Help,
            ("quit" | "q", None) => Self::Quit,
            _ => Self::Invalid(line.to_string()),
        }
    }
}

/// Run the session on stdin until `:quit`, end of input or Ctrl-C.
pub fn cmd_interactive(rt: &Runtime, ctx: &mut AppContext, initial_term: &str) -> anyhow::Result<()> {
    let lines = spawn_line_reader(BufReader::new(io::stdin()))?;
    rt.block_on(run_session(ctx, initial_term, lines, tokio::signal::ctrl_c()))?;
    Ok(())
}

/// Read lines from `reader` on a detached thread.
///
/// Blocking reads stay off the runtime, so shutting it down never waits for
/// the next line. The thread exits at end of input or once the receiver is
/// dropped and another line arrives.
fn spawn_line_reader<R>(reader: R) -> Result<UnboundedReceiver<io::Result<String>>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded();
    std::thread::Builder::new()
        .name("input".to_string())
        .spawn(move || {
            for line in reader.lines() {
                if tx.unbounded_send(line).is_err() {
                    break;
                }
            }
        })
        .with_context("Failed to start input reader")?;
    Ok(rx)
}

/// Drive a search session from `lines` until `:quit`, end of input or
/// `shutdown` resolves. Returns the results on screen when it ended.
async fn run_session<L, S>(
    ctx: &mut AppContext,
    initial_term: &str,
    mut lines: L,
    shutdown: S,
) -> Result<SearchResults>
where
    L: Stream<Item = io::Result<String>> + Unpin,
    S: Future,
{
    let mut controller = ctx.search_controller();
    let mut published = controller.subscribe();
    let mut current = SearchResults::default();
    tokio::pin!(shutdown);

    println!("{HELP}");

    // Entering with a term behaves like typing it
    if !initial_term.is_empty() {
        println!("> {initial_term}");
        controller.on_query_changed(initial_term);
    }

    loop {
        tokio::select! {
            line = lines.next() => {
                let Some(line) = line else { break };
                let line = line.with_context("Failed to read input")?;

                match SessionInput::parse(&line) {
                    SessionInput::Query(text) => controller.on_query_changed(text),
                    SessionInput::ToggleFavorite(n) => toggle(ctx, &current, n),
                    SessionInput::Details(n) => match current.tracks.get(n - 1) {
                        Some(track) => render::print_details(
                            track,
                            ctx.favorites.is_favorite(track.track_id),
                            ctx.config.display.artwork_size,
                        ),
                        None => println!("No result #{n}."),
                    },
                    SessionInput::Favorites => render::print_favorites(&ctx.favorites),
                    SessionInput::Help => println!("{HELP}"),
                    SessionInput::Quit => break,
                    SessionInput::Invalid(input) => println!("Unknown command: {input} (:help for commands)"),
                }
            }
            changed = published.changed() => {
                if changed.is_err() {
                    break;
                }
                current = published.borrow_and_update().clone();
                render::print_results(&current, &ctx.favorites);
            }
            _ = &mut shutdown => break,
        }
    }

    controller.cancel();
    Ok(current)
}

fn toggle(ctx: &mut AppContext, results: &SearchResults, position: usize) {
    let Some(track) = results.tracks.get(position - 1) else {
        println!("No result #{position}.");
        return;
    };

    let name = format!("{} - {}", track.track_name, track.artist_name);
    if ctx.favorites.toggle_favorite(track.clone()) {
        println!("♥ Added {name}");
    } else {
        println!("♡ Removed {name}");
    }
}
