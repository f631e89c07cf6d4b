//! Core data model: the [`Track`] value object.
//!
//! Tracks come from the remote catalog and are stored verbatim in the
//! favorites list. Serialization keeps the catalog's camelCase field names so
//! persisted favorites read like the API payload they came from.

use std::time::Duration;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Catalog identifier of a track.
pub type TrackId = u64;

/// Size segment used by the catalog's default artwork URL.
const ARTWORK_BASE_SEGMENT: &str = "100x100";

/// A song as returned by the catalog.
///
/// Identity is `track_id` only; every other field is display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique catalog ID
    pub track_id: TrackId,
    /// Song title
    pub track_name: String,
    /// Performing artist
    pub artist_name: String,
    /// Album / collection title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
    /// Primary genre
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_genre_name: Option<String>,
    /// Release date as an ISO-8601 string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// 100px artwork URL
    #[serde(
        default,
        rename = "artworkUrl100",
        skip_serializing_if = "Option::is_none"
    )]
    pub artwork_url_100: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<u64>,
    /// Store page for the track
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_view_url: Option<String>,
    /// 30 second preview clip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_time_millis: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Track {
    /// Create a track with only the required fields set.
    pub fn new(
        track_id: TrackId,
        track_name: impl Into<String>,
        artist_name: impl Into<String>,
    ) -> Self {
        Self {
            track_id,
            track_name: track_name.into(),
            artist_name: artist_name.into(),
            collection_name: None,
            primary_genre_name: None,
            release_date: None,
            artwork_url_100: None,
            artist_id: None,
            collection_id: None,
            track_view_url: None,
            preview_url: None,
            track_time_millis: None,
            track_number: None,
            country: None,
        }
    }

    /// Artwork URL rewritten to request a `size`x`size` image.
    ///
    /// The catalog names artwork after its pixel size (`.../100x100bb.jpg`),
    /// so larger assets are obtained by substituting that segment.
    pub fn artwork_url(&self, size: u32) -> Option<String> {
        self.artwork_url_100
            .as_deref()
            .map(|url| url.replace(ARTWORK_BASE_SEGMENT, &format!("{size}x{size}")))
    }

    /// Release year in UTC.
    pub fn release_year(&self) -> Option<i32> {
        let raw = self.release_date.as_deref()?.trim();

        if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
            return Some(date.with_timezone(&Utc).year());
        }

        // Some entries only carry a calendar date
        raw.get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
            .map(|date| date.year())
    }

    /// Track length, if the catalog reported one.
    pub fn duration(&self) -> Option<Duration> {
        self.track_time_millis.map(Duration::from_millis)
    }
}
