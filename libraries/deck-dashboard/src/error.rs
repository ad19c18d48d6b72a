/// Dashboard errors
use deck_api_client::ApiClientError;
use deck_core::DeckError;
use deck_playback::PlaybackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Session expired, log in again")]
    SessionExpired,

    #[error(transparent)]
    Api(#[from] ApiClientError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error(transparent)]
    Storage(#[from] DeckError),
}

impl DashboardError {
    /// Whether the user has to go through login again
    pub fn needs_login(&self) -> bool {
        matches!(
            self,
            Self::NotLoggedIn | Self::SessionExpired | Self::Api(ApiClientError::AuthRequired)
        )
    }
}
