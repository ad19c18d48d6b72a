//! Player events
//!
//! State changes are queued as [`PlayerEvent`]s and drained by the front end.
//! A front end that prefers callbacks implements [`ViewSynchronizer`] and
//! feeds drained events through [`PlayerEvent::dispatch`].

use crate::types::NowPlaying;
use deck_core::TrackId;
use serde::{Deserialize, Serialize};

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PlayerEvent {
    /// A new track was loaded; the now-playing area should show it
    NowPlaying(NowPlaying),

    /// Playback started or resumed
    PlayStart {
        track_id: TrackId,
    },

    /// Playback paused (by the user, at the end of the clip, or after an error)
    Pause {
        track_id: TrackId,
    },

    /// Total duration of the loaded clip became known
    MetadataLoaded {
        duration_secs: f64,
    },

    /// Periodic progress sample while playing
    Progress {
        /// Elapsed time as m:ss
        elapsed_label: String,
        /// Fraction of the clip played, in [0, 1]
        fraction: f64,
    },

    /// The media element failed to play the loaded clip
    PlaybackError {
        track_id: Option<TrackId>,
        message: String,
    },
}

impl PlayerEvent {
    /// Forward this event to the matching view callback
    pub fn dispatch<V>(&self, view: &mut V)
    where
        V: ViewSynchronizer + ?Sized,
    {
        match self {
            Self::NowPlaying(now) => view.on_now_playing(now),
            Self::PlayStart { track_id } => view.on_play_start(track_id),
            Self::Pause { track_id } => view.on_pause(track_id),
            Self::MetadataLoaded { duration_secs } => view.on_metadata_loaded(*duration_secs),
            Self::Progress {
                elapsed_label,
                fraction,
            } => view.on_progress(elapsed_label, *fraction),
            Self::PlaybackError { track_id, message } => {
                view.on_playback_error(track_id.as_ref(), message);
            }
        }
    }
}

/// Observer keeping visible controls consistent with the player
///
/// Every method defaults to doing nothing, so a view only overrides what it
/// renders.
pub trait ViewSynchronizer {
    /// Show title, artists and artwork of the newly loaded track
    fn on_now_playing(&mut self, _now: &NowPlaying) {}

    /// Show the pause control for the playing track
    fn on_play_start(&mut self, _track_id: &TrackId) {}

    /// Show the play control for the paused track
    fn on_pause(&mut self, _track_id: &TrackId) {}

    /// Update the elapsed label and progress bar
    fn on_progress(&mut self, _elapsed_label: &str, _fraction: f64) {}

    /// Show the total duration
    fn on_metadata_loaded(&mut self, _duration_secs: f64) {}

    /// Surface a playback failure
    fn on_playback_error(&mut self, _track_id: Option<&TrackId>, _message: &str) {}
}
