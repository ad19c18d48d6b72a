//! Player State
//!
//! Owns the single media element and tracks what is loaded and whether it is
//! playing. State changes are queued as [`PlayerEvent`]s; callers collect them
//! with [`PlayerState::drain_events`].

use crate::{
    error::{PlaybackError, Result},
    events::PlayerEvent,
    media::{MediaElement, MediaEvent, ABORT_ERROR},
    types::{NowPlaying, TransportStatus},
};
use deck_core::{Track, TrackId};
use tracing::{debug, info, warn};

/// Preview player
///
/// Invariants:
/// - `Playing` or `Paused` implies a loaded source
/// - `total_duration` is only known after the media element reported it for
///   the current source
pub struct PlayerState<M: MediaElement> {
    media: M,
    status: TransportStatus,
    loaded_track: Option<TrackId>,
    loaded_source: Option<String>,
    total_duration: Option<f64>,
    now_playing: Option<NowPlaying>,
    volume: u8,
    pending_events: Vec<PlayerEvent>,
}

impl<M: MediaElement> PlayerState<M> {
    /// Create an idle player around `media`
    pub fn new(media: M) -> Self {
        Self {
            media,
            status: TransportStatus::Idle,
            loaded_track: None,
            loaded_source: None,
            total_duration: None,
            now_playing: None,
            volume: 100,
            pending_events: Vec::new(),
        }
    }

    // ===== Transport =====

    /// Play `track`
    ///
    /// If its preview is already the loaded source this behaves exactly like
    /// [`toggle_play`](Self::toggle_play). Otherwise the preview is loaded and
    /// played from the start.
    pub fn load_and_play(&mut self, track: &Track) -> Result<()> {
        let url = track
            .preview()
            .ok_or_else(|| PlaybackError::MissingPreview(track.id.clone()))?;

        if self.loaded_source.as_deref() == Some(url) {
            self.toggle_play();
            return Ok(());
        }

        self.load(track, url);
        self.start();
        Ok(())
    }

    /// Load `track` without starting playback
    ///
    /// Cueing the already loaded source does nothing.
    pub fn cue(&mut self, track: &Track) -> Result<()> {
        let url = track
            .preview()
            .ok_or_else(|| PlaybackError::MissingPreview(track.id.clone()))?;

        if self.loaded_source.as_deref() != Some(url) {
            self.load(track, url);
            self.status = TransportStatus::Paused;
        }
        Ok(())
    }

    /// Pause if playing, resume if paused; ignored while nothing is loaded
    pub fn toggle_play(&mut self) {
        match self.status {
            TransportStatus::Playing => self.pause(),
            TransportStatus::Paused => self.start(),
            TransportStatus::Idle => debug!("Toggle ignored, nothing loaded"),
        }
    }

    /// Jump to `fraction` of the loaded clip
    ///
    /// Ignored while nothing is loaded or the duration is not yet known.
    pub fn seek(&mut self, fraction: f64) {
        if self.loaded_source.is_none() {
            return;
        }
        let Some(total) = self.total_duration else {
            debug!("Seek ignored, duration unknown");
            return;
        };
        if !fraction.is_finite() {
            return;
        }

        self.media.set_current_time(fraction * total);
    }

    /// Set output volume (0-100, clamped)
    pub fn set_volume(&mut self, percent: u8) {
        self.volume = percent.min(100);
        self.media.set_volume(f64::from(self.volume) / 100.0);
    }

    /// Apply a notification from the media element
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::MetadataLoaded { duration_secs } => {
                if self.loaded_source.is_none() {
                    return;
                }
                if duration_secs.is_finite() && duration_secs > 0.0 {
                    self.total_duration = Some(duration_secs);
                    self.pending_events
                        .push(PlayerEvent::MetadataLoaded { duration_secs });
                } else {
                    debug!(duration_secs, "Ignoring unusable duration");
                }
            }
            MediaEvent::Ended => {
                if self.status == TransportStatus::Playing {
                    self.status = TransportStatus::Paused;
                    self.emit_pause();
                }
            }
            MediaEvent::Error { message } => self.fail(message),
            MediaEvent::Playing => {
                if self.status == TransportStatus::Paused {
                    if let Some(track_id) = self.loaded_track.clone() {
                        debug!(%track_id, "Resumed outside the app");
                        self.status = TransportStatus::Playing;
                        self.pending_events.push(PlayerEvent::PlayStart { track_id });
                    }
                }
            }
            MediaEvent::Paused => {
                if self.status == TransportStatus::Playing {
                    debug!(track_id = ?self.loaded_track, "Paused outside the app");
                    self.status = TransportStatus::Paused;
                    self.emit_pause();
                }
            }
            MediaEvent::PlayRejected { source, message } => {
                if self.loaded_source.as_deref() != Some(source.as_str()) {
                    debug!(%source, "Ignoring rejection for a replaced source");
                } else if message.starts_with(ABORT_ERROR) {
                    debug!(%source, "play() interrupted");
                } else {
                    self.fail(message);
                }
            }
        }
    }

    // ===== Queries =====

    pub fn status(&self) -> TransportStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == TransportStatus::Playing
    }

    pub fn loaded_track(&self) -> Option<&TrackId> {
        self.loaded_track.as_ref()
    }

    pub fn loaded_source(&self) -> Option<&str> {
        self.loaded_source.as_deref()
    }

    /// Total duration in seconds, once reported
    pub fn total_duration(&self) -> Option<f64> {
        self.total_duration
    }

    /// Current position in seconds (zero while nothing is loaded)
    pub fn position(&self) -> f64 {
        if self.loaded_source.is_some() {
            self.media.current_time()
        } else {
            0.0
        }
    }

    pub fn now_playing(&self) -> Option<&NowPlaying> {
        self.now_playing.as_ref()
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    // ===== Events =====

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn load(&mut self, track: &Track, url: &str) {
        if self.status == TransportStatus::Playing {
            self.media.pause();
            self.emit_pause();
        }

        info!(track_id = %track.id, name = %track.name, "Loading preview");
        self.media.set_source(url);
        self.loaded_source = Some(url.to_string());
        self.loaded_track = Some(track.id.clone());
        self.total_duration = None;

        let now = NowPlaying::from(track);
        self.now_playing = Some(now.clone());
        self.pending_events.push(PlayerEvent::NowPlaying(now));
    }

    fn start(&mut self) {
        let Some(track_id) = self.loaded_track.clone() else {
            return;
        };

        match self.media.play() {
            Ok(()) => {
                self.status = TransportStatus::Playing;
                self.pending_events.push(PlayerEvent::PlayStart { track_id });
            }
            Err(e) => {
                warn!(%track_id, error = %e, "Media element refused to play");
                self.status = TransportStatus::Paused;
                self.pending_events.push(PlayerEvent::PlaybackError {
                    track_id: Some(track_id),
                    message: e.to_string(),
                });
            }
        }
    }

    fn pause(&mut self) {
        self.media.pause();
        self.status = TransportStatus::Paused;
        self.emit_pause();
    }

    fn fail(&mut self, message: String) {
        warn!(track_id = ?self.loaded_track, %message, "Media element error");
        self.pending_events.push(PlayerEvent::PlaybackError {
            track_id: self.loaded_track.clone(),
            message,
        });
        if self.status == TransportStatus::Playing {
            self.status = TransportStatus::Paused;
            self.emit_pause();
        }
    }

    fn emit_pause(&mut self) {
        if let Some(track_id) = self.loaded_track.clone() {
            self.pending_events.push(PlayerEvent::Pause { track_id });
        }
    }
}
