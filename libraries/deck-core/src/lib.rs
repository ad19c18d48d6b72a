//! Tune Deck Core
//!
//! Platform-agnostic core types, persistence and error handling for Tune Deck.
//!
//! This crate provides the building blocks shared by the playback core, the
//! web API client and the front ends (browser and terminal).
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `PlaylistSummary`, `Playlist`, `UserProfile`
//! - **Persistence**: the `KeyValueStore` trait with in-memory and JSON-file stores
//! - **Error Handling**: unified `DeckError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use deck_core::storage::{self, keys, KeyValueStore, MemoryStore};
//! use deck_core::types::{Image, Track};
//!
//! let track = Track::new("4uLU6hMCjMI75M1A2tKUQC", "Never Gonna Give You Up")
//!     .with_artists(["Rick Astley"])
//!     .with_preview_url("https://p.scdn.co/mp3-preview/abc")
//!     .with_image(Image::new("https://i.scdn.co/image/64"));
//!
//! let mut store = MemoryStore::new();
//! storage::set_json(&mut store, keys::LOADED_TRACKS, &vec![track]).unwrap();
//! assert!(store.get(keys::LOADED_TRACKS).unwrap().is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{DeckError, Result};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use types::{Image, Playlist, PlaylistId, PlaylistSummary, Track, TrackId, UserProfile};
