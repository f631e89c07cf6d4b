//! Favorites store - the persisted list of favorited tracks.
//!
//! The store is an ordered list mutated through exactly two transitions:
//! append ([`FavoritesStore::add_favorite`]) and filter-out
//! ([`FavoritesStore::remove_favorite`]). After every transition the whole
//! list is serialized and written to a [`KeyValueStorage`] under a single
//! key.
//!
//! # Duplicates
//!
//! `add_favorite` does not check whether the track is already present, so
//! adding the same track twice yields two entries. Callers that want toggle
//! semantics use [`FavoritesStore::toggle_favorite`] or check
//! [`FavoritesStore::is_favorite`] first.
//!
//! # Storage failures
//!
//! Mutations never fail from the caller's point of view. A failed write is
//! logged and the store is marked dirty; the next mutation writes the full
//! snapshot again, and [`FavoritesStore::flush`] retries on demand.

pub mod storage;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ResultExt};
use crate::model::{Track, TrackId};

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};

/// Storage key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "primary";

/// Version tag of the persisted snapshot format
const SNAPSHOT_VERSION: u32 = 1;

/// On-disk shape of the favorites list
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    #[serde(default)]
    favorites: Vec<Track>,
}

/// Borrowed form of [`Snapshot`] used when writing
#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    favorites: &'a [Track],
}

/// Persisted, ordered collection of favorite tracks.
pub struct FavoritesStore {
    favorites: Vec<Track>,
    storage: Box<dyn KeyValueStorage>,
    key: String,
    dirty: bool,
}

impl FavoritesStore {
    /// Create an empty store. Nothing is written until the first mutation.
    pub fn new(storage: impl KeyValueStorage + 'static, key: impl Into<String>) -> Self {
        Self {
            favorites: Vec::new(),
            storage: Box::new(storage),
            key: key.into(),
            dirty: false,
        }
    }

    /// Restore the store from `storage`.
    ///
    /// A missing key yields an empty store. Undecodable data is logged and
    /// also yields an empty store. Read errors are returned so a transient
    /// failure does not lead to the saved list being overwritten.
    pub fn load(storage: impl KeyValueStorage + 'static, key: impl Into<String>) -> Result<Self> {
        let mut store = Self::new(storage, key);

        let Some(bytes) = store
            .storage
            .get_item(&store.key)
            .with_context("Failed to restore favorites")?
        else {
            tracing::debug!(key = %store.key, "No saved favorites, starting empty");
            return Ok(store);
        };

        match serde_json::from_slice::<Snapshot>(&bytes) {
            Ok(snapshot) => {
                if snapshot.version != SNAPSHOT_VERSION {
                    tracing::warn!(
                        version = snapshot.version,
                        "Unknown favorites format version, loading anyway"
                    );
                }
                store.favorites = snapshot.favorites;
                tracing::debug!(count = store.favorites.len(), "Restored favorites");
            }
            Err(e) => {
                tracing::warn!(
                    key = %store.key,
                    error = %e,
                    "Saved favorites are unreadable, starting empty"
                );
            }
        }

        Ok(store)
    }

    /// Append `track` to the list and persist.
    pub fn add_favorite(&mut self, track: Track) {
        if self.is_favorite(track.track_id) {
            tracing::debug!(
                track_id = track.track_id,
                "Track already in favorites, adding duplicate entry"
            );
        }
        self.favorites.push(track);
        self.persist();
    }

    /// Remove every entry with `track_id` and persist. Absent IDs are a no-op
    /// for the list, but the snapshot is still written.
    pub fn remove_favorite(&mut self, track_id: TrackId) {
        self.favorites.retain(|track| track.track_id != track_id);
        self.persist();
    }

    /// Whether any entry has `track_id`.
    pub fn is_favorite(&self, track_id: TrackId) -> bool {
        self.favorites.iter().any(|track| track.track_id == track_id)
    }

    /// Remove `track` if it is a favorite, otherwise add it.
    ///
    /// Returns whether the track is a favorite afterwards.
    pub fn toggle_favorite(&mut self, track: Track) -> bool {
        if self.is_favorite(track.track_id) {
            self.remove_favorite(track.track_id);
            false
        } else {
            self.add_favorite(track);
            true
        }
    }

    /// Favorites in insertion order.
    pub fn favorites(&self) -> &[Track] {
        &self.favorites
    }

    /// First entry with `track_id`.
    pub fn get(&self, track_id: TrackId) -> Option<&Track> {
        self.favorites.iter().find(|track| track.track_id == track_id)
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// Whether the last write failed and has not been retried successfully.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the current list if the last write failed.
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.write_snapshot()?;
        self.dirty = false;
        Ok(())
    }

    /// Write after a mutation. Failures are logged, not returned.
    fn persist(&mut self) {
        match self.write_snapshot() {
            Ok(()) => {
                if self.dirty {
                    tracing::info!("Favorites saved after earlier failure");
                }
                self.dirty = false;
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Failed to save favorites, will retry on next change"
                );
                self.dirty = true;
            }
        }
    }

    fn write_snapshot(&self) -> Result<()> {
        let bytes = serde_json::to_vec(&SnapshotRef {
            version: SNAPSHOT_VERSION,
            favorites: &self.favorites,
        })?;
        self.storage.set_item(&self.key, &bytes)?;
        Ok(())
    }
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use crate::test_utils::mock_track;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Add(TrackId),
        Remove(TrackId),
    }

    /// Small ID range so adds and removes collide often
    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u64..8).prop_map(Op::Add),
            (0u64..8).prop_map(Op::Remove),
        ]
    }

    proptest! {
        /// The store behaves like a plain append / filter reducer
        #[test]
        fn matches_reference_reducer(ops in prop::collection::vec(op(), 0..40)) {
            let mut store = FavoritesStore::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY);
            let mut reference: Vec<TrackId> = Vec::new();

            for op in ops {
                match op {
                    Op::Add(id) => {
                        store.add_favorite(mock_track(id));
                        reference.push(id);
                    }
                    Op::Remove(id) => {
                        store.remove_favorite(id);
                        reference.retain(|&r| r != id);
                    }
                }
            }

            let ids: Vec<_> = store.favorites().iter().map(|t| t.track_id).collect();
            prop_assert_eq!(ids, reference);
        }

        /// Membership flips exactly on add and remove
        #[test]
        fn add_then_remove_membership(id in any::<u64>(), others in prop::collection::vec(any::<u64>(), 0..10)) {
            let mut store = FavoritesStore::new(MemoryStorage::new(), DEFAULT_STORAGE_KEY);
            for other in others.iter().filter(|&&o| o != id) {
                store.add_favorite(mock_track(*other));
            }

            prop_assert!(!store.is_favorite(id));
            store.add_favorite(mock_track(id));
            prop_assert!(store.is_favorite(id));
            store.remove_favorite(id);
            prop_assert!(!store.is_favorite(id));
        }
    }
}
