//! Test utilities and fixtures for tunescout tests.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{mock_track, paramore_track};
//!
//! let mut store = FavoritesStore::new(MemoryStorage::new(), "primary");
//! store.add_favorite(paramore_track());
//! ```

use crate::model::{Track, TrackId};

/// Creates a track with the given ID and placeholder display fields.
///
/// Customize using struct update syntax:
///
/// ```ignore
/// let custom = Track {
///     collection_name: Some("Live".to_string()),
///     ..mock_track(1)
/// };
/// ```
pub fn mock_track(track_id: TrackId) -> Track {
    Track {
        collection_name: Some("Test Album".to_string()),
        primary_genre_name: Some("Rock".to_string()),
        release_date: Some("2020-01-01T08:00:00Z".to_string()),
        artwork_url_100: Some(format!("https://example.com/{track_id}/100x100bb.jpg")),
        ..Track::new(track_id, format!("Test Track {track_id}"), "Test Artist")
    }
}

/// The track used throughout the search-and-favorite scenario.
pub fn paramore_track() -> Track {
    Track {
        collection_name: Some("Paramore".to_string()),
        primary_genre_name: Some("Alternative".to_string()),
        release_date: Some("2013-04-05T07:00:00Z".to_string()),
        artwork_url_100: Some(
            "https://is1-ssl.mzstatic.com/image/thumb/Music/v4/paramore/100x100bb.jpg".to_string(),
        ),
        track_time_millis: Some(296_520),
        ..Track::new(123456, "Ain't It Fun", "Paramore")
    }
}
