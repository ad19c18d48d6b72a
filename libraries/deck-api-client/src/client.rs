//! Web API client.

use crate::error::{ApiClientError, Result};
use crate::types::{
    summaries, ApiConfig, ApiPlaylist, ApiPlaylistDetail, ApiUser, FeaturedPlaylists, Page,
    PlaylistsEnvelope,
};
use deck_core::{Playlist, PlaylistId, PlaylistSummary, UserProfile};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Relative endpoints used by the dashboard.
pub mod endpoints {
    pub const USER_INFO: &str = "me";
    pub const FEATURED_PLAYLISTS: &str = "browse/featured-playlists?limit=5";
    pub const TOPLISTS: &str = "browse/categories/toplists/playlists?limit=10";
    pub const PLAYLIST: &str = "playlists";
    pub const USER_PLAYLISTS: &str = "me/playlists";
}

/// Client for the Web API.
///
/// Every request carries the token from [`ApiConfig`] under its stored token
/// type; a missing token fails with [`ApiClientError::AuthRequired`] before
/// anything is sent.
///
/// # Example
///
/// ```ignore
/// use deck_api_client::{ApiConfig, SpotifyClient};
///
/// let client = SpotifyClient::new(ApiConfig::with_token("https://api.spotify.com/v1", token))?;
/// let me = client.current_user().await?;
/// println!("Hello {}", me.greeting_name());
/// ```
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    config: ApiConfig,
}

impl SpotifyClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ApiClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("TuneDeck/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: ApiConfig { base_url, ..config },
        })
    }

    /// Normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Check if the client has an access token.
    pub fn is_authenticated(&self) -> bool {
        self.config.access_token.is_some()
    }

    /// Replace the bearer token.
    pub fn set_access_token(&mut self, token: Option<String>) {
        self.config.access_token = token;
    }

    /// Profile of the signed-in user.
    pub async fn current_user(&self) -> Result<UserProfile> {
        let user: ApiUser = self.get_json(endpoints::USER_INFO).await?;
        info!(user_id = %user.id, "Fetched profile");
        Ok(user.into())
    }

    /// Editorial featured playlists.
    pub async fn featured_playlists(&self) -> Result<FeaturedPlaylists> {
        let envelope: PlaylistsEnvelope = self.get_json(endpoints::FEATURED_PLAYLISTS).await?;
        let message = envelope.message.clone();
        let playlists = envelope.into_summaries();
        debug!(count = playlists.len(), "Fetched featured playlists");
        Ok(FeaturedPlaylists { message, playlists })
    }

    /// Playlists of the "toplists" category.
    pub async fn toplists(&self) -> Result<Vec<PlaylistSummary>> {
        let envelope: PlaylistsEnvelope = self.get_json(endpoints::TOPLISTS).await?;
        let playlists = envelope.into_summaries();
        debug!(count = playlists.len(), "Fetched toplists");
        Ok(playlists)
    }

    /// Playlist detail with its previewable tracks.
    pub async fn playlist(&self, id: &PlaylistId) -> Result<Playlist> {
        let endpoint = format!("{}/{}", endpoints::PLAYLIST, id);
        let detail: ApiPlaylistDetail = self.get_json(&endpoint).await?;
        let playlist = Playlist::from(detail);
        debug!(
            playlist_id = %id,
            items = playlist.total_tracks,
            previewable = playlist.tracks.len(),
            "Fetched playlist"
        );
        Ok(playlist)
    }

    /// Playlists owned or followed by the signed-in user.
    pub async fn user_playlists(&self) -> Result<Vec<PlaylistSummary>> {
        let page: Page<Option<ApiPlaylist>> = self.get_json(endpoints::USER_PLAYLISTS).await?;
        let playlists = summaries(page);
        debug!(count = playlists.len(), "Fetched user playlists");
        Ok(playlists)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let authorization = self
            .config
            .authorization()
            .ok_or(ApiClientError::AuthRequired)?;
        let url = format!("{}/{}", self.config.base_url, endpoint);
        debug!(url = %url, "GET");

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| {
                ApiClientError::ParseError(format!("Failed to parse {} response: {}", endpoint, e))
            })
        } else if status == StatusCode::UNAUTHORIZED {
            warn!(url = %url, "Token rejected");
            Err(ApiClientError::AuthRequired)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ApiClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}
