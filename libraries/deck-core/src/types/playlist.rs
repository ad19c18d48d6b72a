/// Playlist domain types
use crate::types::{Image, PlaylistId, Track};
use serde::{Deserialize, Serialize};

/// Playlist card as shown on the dashboard and in the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    /// Playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Description (may contain HTML from the API)
    #[serde(default)]
    pub description: Option<String>,

    /// Cover image
    #[serde(default)]
    pub image: Option<Image>,
}

/// Playlist with its tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Card information
    #[serde(flatten)]
    pub summary: PlaylistSummary,

    /// Number of items in the playlist, previewable or not
    pub total_tracks: usize,

    /// Previewable tracks in playlist order
    pub tracks: Vec<Track>,
}

impl Playlist {
    /// Playlist identifier
    pub fn id(&self) -> &PlaylistId {
        &self.summary.id
    }

    /// Playlist name
    pub fn name(&self) -> &str {
        &self.summary.name
    }
}
