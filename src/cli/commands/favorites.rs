//! Favorites commands.

use tokio::runtime::Runtime;

use super::AppContext;
use crate::cli::render;
use crate::error::{Error, ResultExt};
use crate::model::{Track, TrackId};

/// List favorite tracks
pub fn cmd_favorites(ctx: &AppContext) {
    render::print_favorites(&ctx.favorites);
}

/// Look up a track and add it to favorites
pub fn cmd_add(rt: &Runtime, ctx: &mut AppContext, track_id: TrackId) -> anyhow::Result<()> {
    if let Some(track) = ctx.favorites.get(track_id) {
        println!("Already a favorite: {} - {}", track.track_name, track.artist_name);
        return Ok(());
    }

    let track = fetch_track(rt, ctx, track_id)?;
    println!("♥ Added {} - {}", track.track_name, track.artist_name);
    ctx.favorites.add_favorite(track);
    Ok(())
}

/// Remove a track from favorites
pub fn cmd_remove(ctx: &mut AppContext, track_id: TrackId) {
    let Some(track) = ctx.favorites.get(track_id).cloned() else {
        println!("Track {track_id} is not a favorite.");
        return;
    };

    ctx.favorites.remove_favorite(track_id);
    println!("♡ Removed {} - {}", track.track_name, track.artist_name);
}

/// Show a track, from favorites when saved there, otherwise from the catalog
pub fn cmd_details(rt: &Runtime, ctx: &AppContext, track_id: TrackId) -> anyhow::Result<()> {
    let track = match ctx.favorites.get(track_id) {
        Some(track) => track.clone(),
        None => fetch_track(rt, ctx, track_id)?,
    };

    render::print_details(
        &track,
        ctx.favorites.is_favorite(track_id),
        ctx.config.display.artwork_size,
    );
    Ok(())
}

fn fetch_track(rt: &Runtime, ctx: &AppContext, track_id: TrackId) -> anyhow::Result<Track> {
    let track = rt
        .block_on(ctx.catalog.lookup(track_id))
        .with_context(format!("Failed to look up track {track_id}"))?;
    track.ok_or_else(|| Error::TrackNotFound(track_id).into())
}
