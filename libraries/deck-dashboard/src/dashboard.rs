//! Section loading
//!
//! Fetches what a section needs and turns it into a view. Navigation goes
//! through the [`Router`] so "back" behaves like the browser's.

use crate::config::DeckConfig;
use crate::error::{DashboardError, Result};
use crate::router::{Router, Section};
use crate::views::{DashboardView, PlaylistView, SectionView};
use deck_api_client::{auth, SpotifyClient};
use deck_core::{KeyValueStore, PlaylistId, PlaylistSummary};
use deck_playback::{Deck, IntervalScheduler, MediaElement};
use futures_util::future::try_join3;
use tracing::{debug, info};

/// Build an API client from the stored session
///
/// Fails with [`DashboardError::NotLoggedIn`] when there is no token and
/// [`DashboardError::SessionExpired`] when it ran out at `now_ms`.
pub fn connect<K>(config: &DeckConfig, store: &K, now_ms: u64) -> Result<SpotifyClient>
where
    K: KeyValueStore + ?Sized,
{
    let session = auth::load_session(store)?.ok_or(DashboardError::NotLoggedIn)?;
    if session.is_expired(now_ms) {
        return Err(DashboardError::SessionExpired);
    }
    Ok(SpotifyClient::new(config.api_config(&session))?)
}

/// Dashboard controller
pub struct Dashboard {
    client: SpotifyClient,
    router: Router,
}

impl Dashboard {
    /// Start on the dashboard section
    pub fn new(client: SpotifyClient) -> Self {
        Self::with_router(client, Router::new())
    }

    pub fn with_router(client: SpotifyClient, router: Router) -> Self {
        Self { client, router }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn client(&self) -> &SpotifyClient {
        &self.client
    }

    /// Fetch and build the view of `section`
    ///
    /// The dashboard's profile, featured and top playlists are fetched
    /// concurrently.
    pub async fn load_section(&self, section: &Section) -> Result<SectionView> {
        debug!(path = %section, "Loading section");
        match section {
            Section::Dashboard => Ok(SectionView::Dashboard(self.load_dashboard().await?)),
            Section::Playlist { playlist } => {
                Ok(SectionView::Playlist(self.load_playlist(playlist).await?))
            }
        }
    }

    /// Load the current section
    pub async fn reload(&self) -> Result<SectionView> {
        self.load_section(self.router.current()).await
    }

    /// Navigate to a playlist
    ///
    /// The caller hands `view.tracks` to the track store, see
    /// [`open_playlist_into`](Self::open_playlist_into).
    pub async fn open_playlist(&mut self, id: &PlaylistId) -> Result<PlaylistView> {
        let view = self.load_playlist(id).await?;
        self.router.push(Section::Playlist {
            playlist: id.clone(),
        });
        Ok(view)
    }

    /// Navigate to a playlist and make its tracks the deck's track list
    pub async fn open_playlist_into<M, S, K>(
        &mut self,
        id: &PlaylistId,
        deck: &mut Deck<M, S, K>,
    ) -> Result<PlaylistView>
    where
        M: MediaElement,
        S: IntervalScheduler,
        K: KeyValueStore,
    {
        let view = self.open_playlist(id).await?;
        let kept = deck.replace_tracks(view.tracks.iter().cloned())?;
        info!(playlist_id = %id, tracks = kept, "Track list replaced");
        Ok(view)
    }

    /// Navigate to the dashboard section
    pub async fn go_home(&mut self) -> Result<DashboardView> {
        let view = self.load_dashboard().await?;
        if self.router.current() != &Section::Dashboard {
            self.router.push(Section::Dashboard);
        }
        Ok(view)
    }

    /// Go back one history entry and load it; `None` at the first entry
    pub async fn back(&mut self) -> Result<Option<SectionView>> {
        let Some(section) = self.router.back().cloned() else {
            return Ok(None);
        };
        Ok(Some(self.load_section(&section).await?))
    }

    /// Sidebar playlists
    pub async fn user_playlists(&self) -> Result<Vec<PlaylistSummary>> {
        Ok(self.client.user_playlists().await?)
    }

    async fn load_dashboard(&self) -> Result<DashboardView> {
        let (profile, featured, top) = try_join3(
            self.client.current_user(),
            self.client.featured_playlists(),
            self.client.toplists(),
        )
        .await?;
        Ok(DashboardView::new(&profile, featured, top))
    }

    async fn load_playlist(&self, id: &PlaylistId) -> Result<PlaylistView> {
        let playlist = self.client.playlist(id).await?;
        Ok(PlaylistView::from(playlist))
    }
}
