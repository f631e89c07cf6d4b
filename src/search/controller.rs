//! Search-as-you-type controller.
//!
//! Two suspension points, each with its own cancellation:
//!
//! 1. **Debounce timer** ([`Debouncer`]): every query change replaces the
//!    pending timer, so a burst of keystrokes produces one lookup.
//! 2. **Remote request** ([`RequestSlot`]): starting a lookup aborts the one
//!    in flight and bumps a generation counter. A completion whose generation
//!    is no longer current is discarded, so a superseded request can never
//!    overwrite newer results, even if it resolves last.
//!
//! Results are published on a [`watch`] channel; the presentation layer
//! subscribes and re-renders on change.

use std::sync::Arc;
use std::time::Duration;

use futures::future::{AbortHandle, Abortable, Aborted};
use parking_lot::Mutex;
use tokio::sync::watch;

use super::Debouncer;
use crate::catalog::{CatalogApi, CatalogError};
use crate::model::Track;

/// Quiet period before a query is sent
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Published state of a search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    /// Query the tracks belong to (empty when cleared)
    pub query: String,
    /// Tracks in the order the catalog returned them
    pub tracks: Vec<Track>,
}

impl SearchResults {
    fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            tracks: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// The single request slot: generation counter plus abort handle of the
/// request in flight.
struct SlotState {
    generation: u64,
    in_flight: Option<AbortHandle>,
}

/// Owns the in-flight request and the published results.
///
/// Shared between the controller and the tasks it spawns; the lock is never
/// held across an await.
pub(crate) struct RequestSlot {
    state: Mutex<SlotState>,
    results: watch::Sender<SearchResults>,
}

impl RequestSlot {
    fn new() -> Self {
        let (results, _) = watch::channel(SearchResults::default());
        Self {
            state: Mutex::new(SlotState {
                generation: 0,
                in_flight: None,
            }),
            results,
        }
    }

    /// Abort the in-flight request and start a lookup for `term`.
    fn start(self: &Arc<Self>, catalog: Arc<dyn CatalogApi>, term: String) {
        let (handle, registration) = AbortHandle::new_pair();

        let generation = {
            let mut state = self.state.lock();
            if let Some(previous) = state.in_flight.take() {
                previous.abort();
                tracing::debug!("Cancelled in-flight request for new query");
            }
            state.generation += 1;
            state.in_flight = Some(handle);
            state.generation
        };

        tracing::debug!(term = %term, generation, "Fetching results");

        let slot = Arc::clone(self);
        tokio::spawn(async move {
            let lookup = {
                let term = term.clone();
                async move { catalog.search(&term).await }
            };
            let outcome = Abortable::new(lookup, registration).await;
            slot.complete(generation, term, outcome);
        });
    }

    /// Apply a finished request if it is still the current one.
    fn complete(
        &self,
        generation: u64,
        term: String,
        outcome: Result<Result<Vec<Track>, CatalogError>, Aborted>,
    ) {
        let mut state = self.state.lock();

        if state.generation != generation {
            tracing::debug!(term = %term, "Discarding superseded response");
            return;
        }

        let results = match outcome {
            Err(Aborted) => {
                tracing::debug!(term = %term, "Request cancelled");
                return;
            }
            Ok(Ok(tracks)) => {
                tracing::debug!(term = %term, count = tracks.len(), "Results received");
                SearchResults {
                    query: term,
                    tracks,
                }
            }
            Ok(Err(e)) => {
                tracing::warn!(term = %term, error = %e, "Search failed");
                SearchResults::empty(term)
            }
        };

        state.in_flight = None;
        self.results.send_replace(results);
    }

    /// Abort the in-flight request so its completion is ignored.
    fn cancel(&self) -> bool {
        let mut state = self.state.lock();
        state.generation += 1;
        match state.in_flight.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    fn publish(&self, results: SearchResults) {
        // Take the lock so publishing cannot interleave with a completion
        let _state = self.state.lock();
        self.results.send_replace(results);
    }

    fn is_in_flight(&self) -> bool {
        self.state.lock().in_flight.is_some()
    }
}

/// Turns query changes into at most one remote lookup at a time.
///
/// Must be used from within a tokio runtime; timers and requests run as
/// spawned tasks. Dropping the controller cancels both.
pub struct SearchController {
    catalog: Arc<dyn CatalogApi>,
    debouncer: Debouncer,
    requests: Arc<RequestSlot>,
    query: String,
}

impl SearchController {
    /// Create a controller with the default 500 ms debounce window.
    pub fn new(catalog: Arc<dyn CatalogApi>) -> Self {
        Self::with_debounce(catalog, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(catalog: Arc<dyn CatalogApi>, window: Duration) -> Self {
        Self {
            catalog,
            debouncer: Debouncer::new(window),
            requests: Arc::new(RequestSlot::new()),
            query: String::new(),
        }
    }

    /// Handle a change of the search text.
    ///
    /// Always drops the pending debounce timer. An empty query publishes empty
    /// results immediately and cancels the request in flight; anything else
    /// schedules a lookup once the input has been quiet for the window.
    pub fn on_query_changed(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.query.clone_from(&text);

        if self.debouncer.cancel() {
            tracing::debug!("Superseded pending lookup");
        }

        if text.is_empty() {
            self.requests.cancel();
            self.requests.publish(SearchResults::default());
            return;
        }

        let requests = Arc::clone(&self.requests);
        let catalog = Arc::clone(&self.catalog);
        self.debouncer.schedule(async move {
            requests.start(catalog, text);
        });
    }

    /// Cancel the in-flight request and look `text` up now.
    ///
    /// This is what the debounce timer fires; calling it directly skips the
    /// debounce.
    pub fn fetch_results(&self, text: impl Into<String>) {
        self.requests.start(Arc::clone(&self.catalog), text.into());
    }

    /// Drop the pending timer and the request in flight. Published results
    /// are left as they are.
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
        self.requests.cancel();
    }

    /// Current text of the search box.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Latest published results.
    pub fn results(&self) -> SearchResults {
        self.requests.results.borrow().clone()
    }

    /// Receiver notified on every publish.
    pub fn subscribe(&self) -> watch::Receiver<SearchResults> {
        self.requests.results.subscribe()
    }

    pub fn is_debouncing(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn is_request_in_flight(&self) -> bool {
        self.requests.is_in_flight()
    }

    pub fn debounce_window(&self) -> Duration {
        self.debouncer.window()
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.cancel();
    }
}
