/// Track domain type
use crate::types::{Image, TrackId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A track as listed in a playlist
///
/// Only tracks carrying a preview URL can be played; the rest are still useful
/// for display but never reach the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Track identifier (unique within a playlist)
    pub id: TrackId,

    /// Track title
    pub name: String,

    /// Artist names in credit order
    #[serde(default)]
    pub artist_names: Vec<String>,

    /// Album name
    #[serde(default)]
    pub album: String,

    /// Cover artwork
    #[serde(default)]
    pub image: Option<Image>,

    /// Full track duration in milliseconds
    #[serde(default)]
    pub duration_ms: u64,

    /// Short preview stream
    #[serde(default)]
    pub preview_url: Option<String>,
}

impl Track {
    /// Create a track with only id and title
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: TrackId::new(id),
            name: name.into(),
            artist_names: Vec::new(),
            album: String::new(),
            image: None,
            duration_ms: 0,
            preview_url: None,
        }
    }

    /// Set the artist credits
    #[must_use]
    pub fn with_artists<I, S>(mut self, artists: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.artist_names = artists.into_iter().map(Into::into).collect();
        self
    }

    /// Set the album name
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    /// Set the cover artwork
    #[must_use]
    pub fn with_image(mut self, image: Image) -> Self {
        self.image = Some(image);
        self
    }

    /// Set the duration in milliseconds
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the preview stream URL
    #[must_use]
    pub fn with_preview_url(mut self, url: impl Into<String>) -> Self {
        self.preview_url = Some(url.into());
        self
    }

    /// Artist names joined for display ("A, B")
    pub fn artists_display(&self) -> String {
        self.artist_names.join(", ")
    }

    /// Preview URL, if present and non-empty
    pub fn preview(&self) -> Option<&str> {
        self.preview_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Whether the track can be loaded into the player
    pub fn has_preview(&self) -> bool {
        self.preview().is_some()
    }

    /// Get the track duration as a Duration
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}
