//! Tune Deck - Preview Playback
//!
//! Platform-agnostic playback and navigation state machine for the dashboard's
//! 30-second preview player.
//!
//! This crate provides:
//! - Player State: one media element, one loaded clip, play/pause/seek/volume
//! - Track Store: the ordered list of playable tracks, persisted between sessions
//! - Navigation: previous/next by list position, without wraparound
//! - Progress Reporter: a periodic sampler that only runs while playing
//! - [`Deck`]: the transport control surface wiring all of the above
//!
//! # Architecture
//!
//! `deck-playback` does not know about any particular platform. Audio output,
//! timers and persistence are provided through traits:
//! - [`MediaElement`] - the audio output
//! - [`IntervalScheduler`] - the periodic timer
//! - [`KeyValueStore`](deck_core::KeyValueStore) - where the track list lives
//!
//! The `wasm` feature provides browser implementations of all three plus a
//! JavaScript-facing `WasmDeck`.
//!
//! # Example
//!
//! ```rust
//! use deck_core::{MemoryStore, Track};
//! use deck_playback::{
//!     Deck, IntervalScheduler, MediaElement, MediaEvent, PlayerConfig, PlayerEvent, Result,
//!     TimerId,
//! };
//! use std::time::Duration;
//!
//! #[derive(Default)]
//! struct Silent {
//!     position: f64,
//! }
//!
//! impl MediaElement for Silent {
//!     fn set_source(&mut self, _url: &str) {
//!         self.position = 0.0;
//!     }
//!     fn play(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!     fn pause(&mut self) {}
//!     fn current_time(&self) -> f64 {
//!         self.position
//!     }
//!     fn set_current_time(&mut self, seconds: f64) {
//!         self.position = seconds;
//!     }
//!     fn set_volume(&mut self, _volume: f64) {}
//! }
//!
//! struct NoTimer;
//!
//! impl IntervalScheduler for NoTimer {
//!     fn start(&mut self, _period: Duration) -> Result<TimerId> {
//!         Ok(TimerId(1))
//!     }
//!     fn cancel(&mut self, _timer: TimerId) {}
//! }
//!
//! let mut deck = Deck::new(Silent::default(), NoTimer, MemoryStore::new(), PlayerConfig::default());
//! deck.replace_tracks(vec![
//!     Track::new("a", "First").with_preview_url("https://p.scdn.co/mp3-preview/a"),
//!     Track::new("b", "Second").with_preview_url("https://p.scdn.co/mp3-preview/b"),
//! ])?;
//!
//! deck.play_track(&"a".into())?;
//! deck.handle_media_event(MediaEvent::MetadataLoaded { duration_secs: 30.0 });
//! deck.seek(0.5);
//! assert!(deck.next()?);
//!
//! let events = deck.drain_events();
//! assert!(matches!(events.last(), Some(PlayerEvent::PlayStart { track_id }) if track_id.as_str() == "b"));
//! # Ok::<(), deck_playback::PlaybackError>(())
//! ```

#![forbid(unsafe_code)]

pub mod deck;
pub mod error;
pub mod events;
pub mod media;
pub mod navigation;
pub mod player;
pub mod progress;
pub mod time;
pub mod track_store;
pub mod types;

// WASM bindings (only compiled with wasm feature)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-exports
pub use deck::Deck;
pub use error::{PlaybackError, Result};
pub use events::{PlayerEvent, ViewSynchronizer};
pub use media::{MediaElement, MediaEvent};
pub use player::PlayerState;
pub use progress::{IntervalScheduler, ProgressReporter, ProgressUpdate, TimerId};
pub use track_store::TrackStore;
pub use types::{NowPlaying, PlayerConfig, TransportStatus, DEFAULT_PROGRESS_INTERVAL};

#[cfg(feature = "wasm")]
pub use wasm::WasmDeck;
