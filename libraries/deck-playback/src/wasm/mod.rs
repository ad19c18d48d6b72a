//! WASM bindings for deck-playback
//!
//! Runs the deck in the browser: an `HTMLAudioElement` is the media element,
//! `setInterval` drives the progress sampler and `localStorage` holds the
//! track snapshot.

#[cfg(feature = "wasm")]
pub mod deck;

#[cfg(feature = "wasm")]
pub mod media;

#[cfg(feature = "wasm")]
pub mod scheduler;

#[cfg(feature = "wasm")]
pub mod storage;

#[cfg(feature = "wasm")]
pub use deck::WasmDeck;

#[cfg(feature = "wasm")]
pub use media::HtmlAudioMedia;

#[cfg(feature = "wasm")]
pub use scheduler::BrowserInterval;

#[cfg(feature = "wasm")]
pub use storage::LocalStorage;
