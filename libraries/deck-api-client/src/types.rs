//! Wire types of the Web API and their mapping onto `deck_core` types.

use crate::auth::{Session, DEFAULT_TOKEN_TYPE};
use deck_core::{Image, Playlist, PlaylistId, PlaylistSummary, Track, UserProfile};
use serde::{Deserialize, Serialize};

/// Default Web API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.spotify.com/v1";

/// Album art height preferred for track rows.
pub const TRACK_IMAGE_HEIGHT: u32 = 64;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// Access token sent with every request
    pub access_token: Option<String>,
    /// Scheme of the `Authorization` header, as reported with the token
    pub token_type: String,
}

impl ApiConfig {
    /// Configuration for `base_url` without a token.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: None,
            token_type: DEFAULT_TOKEN_TYPE.to_string(),
        }
    }

    /// Configuration for `base_url` with a bearer token.
    pub fn with_token(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: Some(access_token.into()),
            token_type: DEFAULT_TOKEN_TYPE.to_string(),
        }
    }

    /// Configuration for `base_url` authorized by a stored session.
    pub fn for_session(base_url: impl Into<String>, session: &Session) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: Some(session.access_token.clone()),
            token_type: session.token_type.clone(),
        }
    }

    /// Value of the `Authorization` header, if a token is set.
    pub fn authorization(&self) -> Option<String> {
        self.access_token
            .as_deref()
            .map(|token| format!("{} {}", self.token_type, token))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Featured playlists together with the editorial headline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedPlaylists {
    pub message: Option<String>,
    pub playlists: Vec<PlaylistSummary>,
}

// ===== Wire types =====

#[derive(Debug, Deserialize)]
pub(crate) struct ApiImage {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl From<ApiImage> for Image {
    fn from(image: ApiImage) -> Self {
        Image {
            url: image.url,
            width: image.width,
            height: image.height,
        }
    }
}

fn images(raw: Option<Vec<ApiImage>>) -> Vec<Image> {
    raw.unwrap_or_default().into_iter().map(Image::from).collect()
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiUser {
    pub id: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<ApiImage>>,
}

impl From<ApiUser> for UserProfile {
    fn from(user: ApiUser) -> Self {
        UserProfile {
            id: user.id,
            display_name: user.display_name,
            images: images(user.images),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiPlaylist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<ApiImage>>,
}

impl From<ApiPlaylist> for PlaylistSummary {
    fn from(playlist: ApiPlaylist) -> Self {
        PlaylistSummary {
            id: PlaylistId::new(playlist.id),
            name: playlist.name,
            description: playlist.description.filter(|d| !d.is_empty()),
            image: images(playlist.images).into_iter().next(),
        }
    }
}

/// Body of `browse/featured-playlists` and `browse/categories/{id}/playlists`.
#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistsEnvelope {
    pub message: Option<String>,
    pub playlists: Page<Option<ApiPlaylist>>,
}

impl PlaylistsEnvelope {
    pub fn into_summaries(self) -> Vec<PlaylistSummary> {
        summaries(self.playlists)
    }
}

pub(crate) fn summaries(page: Page<Option<ApiPlaylist>>) -> Vec<PlaylistSummary> {
    page.items
        .into_iter()
        .flatten()
        .map(PlaylistSummary::from)
        .collect()
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiArtist {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiAlbum {
    pub name: String,
    #[serde(default)]
    pub images: Option<Vec<ApiImage>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiTrack {
    /// Null for local files
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ApiArtist>,
    pub album: Option<ApiAlbum>,
    #[serde(default)]
    pub duration_ms: u64,
    pub preview_url: Option<String>,
}

impl ApiTrack {
    /// Map onto a `Track`; tracks without an id are dropped.
    pub fn into_track(self) -> Option<Track> {
        let id = self.id?;
        let (album, image) = match self.album {
            Some(album) => {
                let images = images(album.images);
                let image = Image::preferred(&images, TRACK_IMAGE_HEIGHT).cloned();
                (album.name, image)
            }
            None => (String::new(), None),
        };

        let mut track = Track::new(id, self.name)
            .with_artists(self.artists.into_iter().map(|a| a.name))
            .with_album(album)
            .with_duration_ms(self.duration_ms);
        if let Some(image) = image {
            track = track.with_image(image);
        }
        if let Some(url) = self.preview_url {
            track = track.with_preview_url(url);
        }
        Some(track)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiPlaylistItem {
    pub track: Option<ApiTrack>,
}

/// Body of `playlists/{id}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiPlaylistDetail {
    #[serde(flatten)]
    pub summary: ApiPlaylist,
    pub tracks: Page<ApiPlaylistItem>,
}

impl From<ApiPlaylistDetail> for Playlist {
    /// Null tracks and tracks without a preview are dropped; `total_tracks`
    /// still counts every item.
    fn from(detail: ApiPlaylistDetail) -> Self {
        let total_tracks = detail.tracks.items.len();
        let tracks: Vec<Track> = detail
            .tracks
            .items
            .into_iter()
            .filter_map(|item| item.track)
            .filter_map(ApiTrack::into_track)
            .filter(Track::has_preview)
            .collect();

        Playlist {
            summary: detail.summary.into(),
            total_tracks,
            tracks,
        }
    }
}
