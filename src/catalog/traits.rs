//! Trait definition for the remote catalog.
//!
//! The search controller depends on [`CatalogApi`] rather than on the HTTP
//! client, so tests can substitute a scripted catalog with controlled
//! latency.

use async_trait::async_trait;

use super::{CatalogError, ItunesClient};
use crate::model::{Track, TrackId};

/// Remote song catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Search songs matching a free-text term.
    async fn search(&self, term: &str) -> Result<Vec<Track>, CatalogError>;

    /// Fetch a single song by ID.
    async fn lookup(&self, track_id: TrackId) -> Result<Option<Track>, CatalogError>;
}

#[async_trait]
impl CatalogApi for ItunesClient {
    async fn search(&self, term: &str) -> Result<Vec<Track>, CatalogError> {
        self.search(term).await
    }

    async fn lookup(&self, track_id: TrackId) -> Result<Option<Track>, CatalogError> {
        self.lookup(track_id).await
    }
}

/// Scripted catalog for tests.
#[cfg(test)]
pub mod mocks {
    use std::collections::HashMap;
    use std::time::Duration;

    use parking_lot::Mutex;

    use super::*;

    /// Canned response for one search term
    #[derive(Clone)]
    struct Script {
        delay: Duration,
        outcome: Result<Vec<Track>, CatalogError>,
    }

    /// Mock catalog that answers from a per-term script and records calls.
    ///
    /// Unscripted terms resolve immediately with no results.
    #[derive(Default)]
    pub struct MockCatalog {
        scripts: Mutex<HashMap<String, Script>>,
        calls: Mutex<Vec<String>>,
        completed: Mutex<Vec<String>>,
    }

    impl MockCatalog {
        pub fn new() -> Self {
            Self::default()
        }

        /// Answer `term` with `tracks` after `delay`.
        pub fn respond(self, term: &str, tracks: Vec<Track>, delay: Duration) -> Self {
            self.scripts.lock().insert(
                term.to_string(),
                Script {
                    delay,
                    outcome: Ok(tracks),
                },
            );
            self
        }

        /// Fail `term` with `error` after `delay`.
        pub fn fail(self, term: &str, error: CatalogError, delay: Duration) -> Self {
            self.scripts.lock().insert(
                term.to_string(),
                Script {
                    delay,
                    outcome: Err(error),
                },
            );
            self
        }

        /// Terms searched so far, in call order.
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }

        /// Terms whose search ran to completion (not aborted).
        pub fn completed(&self) -> Vec<String> {
            self.completed.lock().clone()
        }
    }

    #[async_trait]
    impl CatalogApi for MockCatalog {
        async fn search(&self, term: &str) -> Result<Vec<Track>, CatalogError> {
            self.calls.lock().push(term.to_string());

            let script = self.scripts.lock().get(term).cloned();
            let Some(script) = script else {
                self.completed.lock().push(term.to_string());
                return Ok(Vec::new());
            };

            tokio::time::sleep(script.delay).await;
            self.completed.lock().push(term.to_string());
            script.outcome
        }

        async fn lookup(&self, track_id: TrackId) -> Result<Option<Track>, CatalogError> {
            let found = self
                .scripts
                .lock()
                .values()
                .filter_map(|s| s.outcome.as_ref().ok())
                .flatten()
                .find(|t| t.track_id == track_id)
                .cloned();
            Ok(found)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::test_utils::paramore_track;

        #[tokio::test(start_paused = true)]
        async fn test_mock_records_calls() {
            let mock = MockCatalog::new().respond(
                "paramore",
                vec![paramore_track()],
                Duration::from_millis(50),
            );

            let results = mock.search("paramore").await.unwrap();
            assert_eq!(results.len(), 1);
            assert!(mock.search("unknown").await.unwrap().is_empty());
            assert_eq!(mock.calls(), vec!["paramore", "unknown"]);
        }

        #[tokio::test]
        async fn test_mock_failure() {
            let mock = MockCatalog::new().fail(
                "boom",
                CatalogError::Network("connection reset".to_string()),
                Duration::ZERO,
            );
            let result = mock.search("boom").await;
            assert!(matches!(result, Err(CatalogError::Network(_))));
        }

        #[tokio::test]
        async fn test_mock_lookup() {
            let mock = MockCatalog::new().respond("paramore", vec![paramore_track()], Duration::ZERO);
            let track = mock.lookup(123456).await.unwrap();
            assert_eq!(track.map(|t| t.track_name), Some("Ain't It Fun".to_string()));
            assert!(mock.lookup(1).await.unwrap().is_none());
        }
    }
}
