//! Error types for the preview player

use deck_core::{DeckError, TrackId};
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Track has no preview clip and cannot be played
    #[error("Track {0} has no preview")]
    MissingPreview(TrackId),

    /// Track is not in the track store
    #[error("Unknown track: {0}")]
    UnknownTrack(TrackId),

    /// The media element refused an operation
    #[error("Media error: {0}")]
    Media(String),

    /// The interval scheduler could not start a timer
    #[error("Scheduler error: {0}")]
    Scheduler(String),

    /// Persisting the track store failed
    #[error(transparent)]
    Storage(#[from] DeckError),
}

impl PlaybackError {
    /// Create a media error
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
