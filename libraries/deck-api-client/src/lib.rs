//! Tune Deck Web API Client
//!
//! HTTP client for the Spotify Web API plus the implicit-grant login flow.
//!
//! # Features
//!
//! - **Login**: authorization URL, redirect parsing, token session in a
//!   [`KeyValueStore`](deck_core::KeyValueStore)
//! - **Profile**: the signed-in user
//! - **Browse**: featured playlists and the toplists category
//! - **Playlists**: playlist detail with previewable tracks, the user's playlists
//!
//! # Example
//!
//! ```ignore
//! use deck_api_client::{auth, ApiConfig, SpotifyClient};
//! use deck_core::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = MemoryStore::new();
//!     if let Some(grant) = auth::parse_redirect(&redirect_url)? {
//!         auth::store_grant(&mut store, &grant, auth::now_ms())?;
//!     }
//!
//!     let session = auth::load_session(&store)?.ok_or("not logged in")?;
//!     let client = SpotifyClient::new(ApiConfig::with_token(
//!         "https://api.spotify.com/v1",
//!         session.access_token,
//!     ))?;
//!
//!     let featured = client.featured_playlists().await?;
//!     println!("{} featured playlists", featured.playlists.len());
//!     Ok(())
//! }
//! ```

pub mod auth;
mod client;
mod error;
mod types;

pub use auth::{Session, TokenGrant};
pub use client::{endpoints, SpotifyClient};
pub use error::{ApiClientError, Result};
pub use types::{ApiConfig, FeaturedPlaylists, DEFAULT_BASE_URL, TRACK_IMAGE_HEIGHT};
