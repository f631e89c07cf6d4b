//! Adapter layer: convert Search API DTOs to domain tracks
//!
//! This is the only place where DTO types become [`Track`]s. Entries that
//! cannot be represented as a track (collections, artists, items without an
//! id or title) are dropped here; ordering of the remaining entries is kept.

use super::dto;
use crate::model::Track;

/// Convert a search/lookup response into tracks, in API order.
pub fn to_tracks(response: dto::SearchResponse) -> Vec<Track> {
    response.results.into_iter().filter_map(to_track).collect()
}

/// Convert a single result entry. Returns `None` for non-track entries.
pub fn to_track(item: dto::ResultItem) -> Option<Track> {
    if let Some(wrapper) = item.wrapper_type.as_deref()
        && wrapper != "track"
    {
        return None;
    }

    let track_id = item.track_id?;
    let track_name = item.track_name?;

    Some(Track {
        track_id,
        track_name,
        artist_name: item.artist_name.unwrap_or_default(),
        collection_name: item.collection_name,
        primary_genre_name: item.primary_genre_name,
        release_date: item.release_date,
        artwork_url_100: item.artwork_url_100,
        artist_id: item.artist_id,
        collection_id: item.collection_id,
        track_view_url: item.track_view_url,
        preview_url: item.preview_url,
        track_time_millis: item.track_time_millis,
        track_number: item.track_number,
        country: item.country,
    })
}
