//! Tune Deck Dashboard
//!
//! UI-agnostic glue between the Web API client and the preview deck:
//! configuration, the section router, section loading and view models.
//!
//! # Example
//!
//! ```ignore
//! use deck_dashboard::{connect, Dashboard, DeckConfig, SectionView};
//!
//! let config = DeckConfig::load(None)?;
//! let client = connect(&config, &store, deck_api_client::auth::now_ms())?;
//! let mut dashboard = Dashboard::new(client);
//!
//! if let SectionView::Dashboard(home) = dashboard.reload().await? {
//!     println!("{}", home.greeting);
//! }
//! let playlist = dashboard.open_playlist_into(&"37i9dQZF1DXcBWIGoYBM5M".into(), &mut deck).await?;
//! println!("{} - {}", playlist.name, playlist.song_count);
//! ```

pub mod config;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod views;

pub use config::DeckConfig;
pub use dashboard::{connect, Dashboard};
pub use error::{DashboardError, Result};
pub use router::{Router, Section};
pub use views::{DashboardView, PlaylistView, SectionView, Shelf, TrackRow};
