//! iTunes Search API Data Transfer Objects
//!
//! These types match what the Search API returns. Every field is optional
//! because the same `results` array mixes tracks, collections and artists
//! depending on the `entity` requested. Do not use these outside the catalog
//! module - convert to [`crate::model::Track`] via the adapter.
//!
//! API Reference: https://performance-partners.apple.com/search-api
//!
//! Example response:
//! ```json
//! {
//!   "resultCount": 1,
//!   "results": [{
//!     "wrapperType": "track",
//!     "kind": "song",
//!     "trackId": 123456,
//!     "trackName": "Ain't It Fun",
//!     "artistName": "Paramore",
//!     "collectionName": "Paramore",
//!     "primaryGenreName": "Alternative",
//!     "releaseDate": "2013-04-05T07:00:00Z",
//!     "artworkUrl100": "https://.../100x100bb.jpg"
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Top-level search/lookup response
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub result_count: u32,
    #[serde(default)]
    pub results: Vec<ResultItem>,
}

/// One entry of the `results` array
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    /// "track", "collection" or "artist"
    pub wrapper_type: Option<String>,
    /// "song", "music-video", ...
    pub kind: Option<String>,
    pub track_id: Option<u64>,
    pub track_name: Option<String>,
    pub artist_id: Option<u64>,
    pub artist_name: Option<String>,
    pub collection_id: Option<u64>,
    pub collection_name: Option<String>,
    pub primary_genre_name: Option<String>,
    pub release_date: Option<String>,
    #[serde(rename = "artworkUrl100")]
    pub artwork_url_100: Option<String>,
    pub track_view_url: Option<String>,
    pub preview_url: Option<String>,
    pub track_time_millis: Option<u64>,
    pub track_number: Option<u32>,
    pub country: Option<String>,
}
