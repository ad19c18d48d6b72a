//! Platform-agnostic media element trait
//!
//! Abstracts the single audio output (an `HTMLAudioElement` in the browser,
//! a simulated transport in tests and on the terminal).

use crate::error::Result;

/// The single audio output owned by the player
///
/// Implementors only move audio; the transport status, loaded track and
/// total duration are tracked by [`PlayerState`](crate::PlayerState).
pub trait MediaElement {
    /// Point the element at a new source
    ///
    /// Loading a new source resets the playback position to zero.
    fn set_source(&mut self, url: &str);

    /// Begin or resume playback of the current source
    ///
    /// # Returns
    /// * `Ok(())` - Playback started
    /// * `Err(_)` - The platform refused (autoplay policy, broken source, ...)
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping the position
    fn pause(&mut self);

    /// Current position in seconds
    fn current_time(&self) -> f64;

    /// Jump to `seconds`; the platform clamps out-of-range targets
    fn set_current_time(&mut self, seconds: f64);

    /// Output volume in [0.0, 1.0]
    fn set_volume(&mut self, volume: f64);
}

/// Notifications raised by the media element
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Total duration of the current source became known
    MetadataLoaded {
        /// Duration in seconds (may be NaN or infinite for streams)
        duration_secs: f64,
    },
    /// Playback reached the end of the source
    Ended,
    /// The element failed to load or decode the source
    Error {
        message: String,
    },
    /// The element started playing, possibly on a request from outside the
    /// app (media keys, another tab)
    Playing,
    /// The element paused, possibly on a request from outside the app
    Paused,
    /// An asynchronous `play()` request for `source` was rejected
    PlayRejected {
        /// Source that was loaded when `play()` was called
        source: String,
        message: String,
    },
}

/// Rejection name used when a newer load or a `pause()` interrupted `play()`
pub const ABORT_ERROR: &str = "AbortError";

/// Scriptable media element for unit tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FakeMedia {
    pub source: Option<String>,
    pub playing: bool,
    pub position: f64,
    pub volume: f64,
    pub refuse_play: bool,
    pub loads: usize,
}

#[cfg(test)]
impl MediaElement for FakeMedia {
    fn set_source(&mut self, url: &str) {
        self.source = Some(url.to_string());
        self.position = 0.0;
        self.playing = false;
        self.loads += 1;
    }

    fn play(&mut self) -> Result<()> {
        if self.refuse_play {
            return Err(crate::PlaybackError::media("play() request was interrupted"));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.position = seconds;
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }
}
