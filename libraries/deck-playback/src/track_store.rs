//! Track Store
//!
//! The ordered list of playable tracks currently shown. The list is
//! persisted under [`keys::LOADED_TRACKS`] so navigation keeps working after
//! a reload.

use crate::error::Result;
use deck_core::storage::{self, keys, KeyValueStore};
use deck_core::{Track, TrackId};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Ordered, de-duplicated list of tracks that have a preview clip
///
/// Invariants:
/// - every track has a non-blank preview URL
/// - ids are unique (first occurrence wins)
#[derive(Debug)]
pub struct TrackStore<K: KeyValueStore> {
    backend: K,
    tracks: Vec<Track>,
}

impl<K: KeyValueStore> TrackStore<K> {
    /// Restore the last persisted snapshot
    ///
    /// A missing or unreadable snapshot yields an empty store.
    pub fn restore(backend: K) -> Self {
        let tracks = match storage::get_json::<Vec<Track>, _>(&backend, keys::LOADED_TRACKS) {
            Ok(Some(tracks)) => normalize(tracks),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable track snapshot");
                Vec::new()
            }
        };

        debug!(count = tracks.len(), "Track store restored");
        Self { backend, tracks }
    }

    /// Replace the contents with `tracks` and persist the result
    ///
    /// Tracks without a preview are dropped and duplicate ids collapse onto
    /// the first occurrence. Returns the number of tracks kept.
    pub fn replace_all(&mut self, tracks: impl IntoIterator<Item = Track>) -> Result<usize> {
        let tracks = normalize(tracks);
        storage::set_json(&mut self.backend, keys::LOADED_TRACKS, &tracks)?;
        self.tracks = tracks;

        debug!(count = self.tracks.len(), "Track store replaced");
        Ok(self.tracks.len())
    }

    /// Empty the store and forget the snapshot
    pub fn clear(&mut self) -> Result<()> {
        self.backend.remove(keys::LOADED_TRACKS)?;
        self.tracks.clear();
        Ok(())
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Track with the given id
    pub fn find(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|track| &track.id == id)
    }

    /// Index of the track with the given id
    pub fn position(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|track| &track.id == id)
    }

    /// Persistence backend
    pub fn backend(&self) -> &K {
        &self.backend
    }

    /// Mutable persistence backend, for the other keys sharing it
    pub fn backend_mut(&mut self) -> &mut K {
        &mut self.backend
    }
}

fn normalize(tracks: impl IntoIterator<Item = Track>) -> Vec<Track> {
    let mut seen = HashSet::new();
    tracks
        .into_iter()
        .filter(Track::has_preview)
        .filter(|track| seen.insert(track.id.clone()))
        .collect()
}
