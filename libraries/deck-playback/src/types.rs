//! Core types for the preview player

use deck_core::{Track, TrackId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default period of the progress sampler
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Transport status of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportStatus {
    /// Nothing has been loaded yet
    #[default]
    Idle,
    /// A source is loaded and audio is playing
    Playing,
    /// A source is loaded but not playing
    Paused,
}

impl TransportStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for TransportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata shown in the "now playing" area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NowPlaying {
    pub track_id: TrackId,
    pub title: String,
    /// Artist names joined with ", "
    pub artists: String,
    pub artwork_url: Option<String>,
}

impl From<&Track> for NowPlaying {
    fn from(track: &Track) -> Self {
        Self {
            track_id: track.id.clone(),
            title: track.name.clone(),
            artists: track.artists_display(),
            artwork_url: track.image.as_ref().map(|image| image.url.clone()),
        }
    }
}

/// Player configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Period of the progress sampler while playing
    pub progress_interval: Duration,
    /// Initial volume (0-100)
    pub volume: u8,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            volume: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::Image;

    #[test]
    fn now_playing_from_track() {
        let track = Track::new("t1", "Song")
            .with_artists(["A", "B"])
            .with_image(Image::sized("https://i.scdn.co/64", 64, 64));

        let now = NowPlaying::from(&track);
        assert_eq!(now.track_id, TrackId::new("t1"));
        assert_eq!(now.title, "Song");
        assert_eq!(now.artists, "A, B");
        assert_eq!(now.artwork_url.as_deref(), Some("https://i.scdn.co/64"));
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&TransportStatus::Playing).unwrap();
        assert_eq!(json, "\"playing\"");
        assert_eq!(TransportStatus::default(), TransportStatus::Idle);
    }
}
