//! Plain-text rendering of tracks for the terminal.
//!
//! Formatting functions return strings so they can be tested; the `print_*`
//! wrappers write to stdout.

use std::time::Duration;

use crate::favorites::FavoritesStore;
use crate::model::Track;
use crate::search::SearchResults;

const HEART_ON: &str = "♥";
const HEART_OFF: &str = "♡";

fn heart(is_favorite: bool) -> &'static str {
    if is_favorite { HEART_ON } else { HEART_OFF }
}

/// One list row: `  3. ♥ Ain't It Fun - Paramore [123456]`
pub fn format_track_line(position: usize, track: &Track, is_favorite: bool) -> String {
    format!(
        "{:>3}. {} {} - {} [{}]",
        position,
        heart(is_favorite),
        track.track_name,
        track.artist_name,
        track.track_id
    )
}

/// `m:ss` for a track length
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Multi-line detail view of a track.
pub fn format_details(track: &Track, is_favorite: bool, artwork_size: u32) -> String {
    let mut lines = vec![
        format!("{} {}", heart(is_favorite), track.track_name),
        format!("  Artist:  {}", track.artist_name),
    ];

    if let Some(album) = &track.collection_name {
        lines.push(format!("  Album:   {album}"));
    }

    // "Alternative (2013)" like the detail caption
    match (&track.primary_genre_name, track.release_year()) {
        (Some(genre), Some(year)) => lines.push(format!("  Genre:   {genre} ({year})")),
        (Some(genre), None) => lines.push(format!("  Genre:   {genre}")),
        (None, Some(year)) => lines.push(format!("  Year:    {year}")),
        (None, None) => {}
    }

    if let Some(duration) = track.duration() {
        lines.push(format!("  Length:  {}", format_duration(duration)));
    }
    if let Some(artwork) = track.artwork_url(artwork_size) {
        lines.push(format!("  Artwork: {artwork}"));
    }
    if let Some(url) = &track.track_view_url {
        lines.push(format!("  Store:   {url}"));
    }
    if let Some(url) = &track.preview_url {
        lines.push(format!("  Preview: {url}"));
    }
    lines.push(format!("  ID:      {}", track.track_id));

    lines.join("\n")
}

/// Result list for a search, with favorite markers.
pub fn format_results(results: &SearchResults, favorites: &FavoritesStore) -> String {
    if results.query.is_empty() {
        return "Search cleared.".to_string();
    }
    if results.is_empty() {
        return format!("No results for \"{}\".", results.query);
    }

    let mut out = format!("Results for \"{}\":", results.query);
    for (i, track) in results.tracks.iter().enumerate() {
        out.push('\n');
        out.push_str(&format_track_line(i + 1, track, favorites.is_favorite(track.track_id)));
    }
    out
}

/// Favorites list.
pub fn format_favorites(favorites: &FavoritesStore) -> String {
    if favorites.is_empty() {
        return "No favorites yet.".to_string();
    }

    let mut out = format!("Favorites ({}):", favorites.len());
    for (i, track) in favorites.favorites().iter().enumerate() {
        out.push('\n');
        out.push_str(&format_track_line(i + 1, track, true));
    }
    out
}

pub fn print_results(results: &SearchResults, favorites: &FavoritesStore) {
    println!("{}", format_results(results, favorites));
}

pub fn print_favorites(favorites: &FavoritesStore) {
    println!("{}", format_favorites(favorites));
}

pub fn print_details(track: &Track, is_favorite: bool, artwork_size: u32) {
    println!("{}", format_details(track, is_favorite, artwork_size));
}
