//! Deck - the transport control surface
//!
//! Wires Player State, Track Store, Navigation and the Progress Reporter
//! together. Front ends talk to a [`Deck`] only: they forward user actions,
//! media notifications and sampler ticks, then drain [`PlayerEvent`]s.

use crate::{
    error::{PlaybackError, Result},
    events::{PlayerEvent, ViewSynchronizer},
    media::{MediaElement, MediaEvent},
    navigation,
    player::PlayerState,
    progress::{IntervalScheduler, ProgressReporter, ProgressUpdate},
    track_store::TrackStore,
    types::{PlayerConfig, TransportStatus},
};
use deck_core::{storage::KeyValueStore, Track, TrackId};

/// Playback session for one front end
pub struct Deck<M, S, K>
where
    M: MediaElement,
    S: IntervalScheduler,
    K: KeyValueStore,
{
    player: PlayerState<M>,
    reporter: ProgressReporter<S>,
    tracks: TrackStore<K>,
    pending_events: Vec<PlayerEvent>,
}

impl<M, S, K> Deck<M, S, K>
where
    M: MediaElement,
    S: IntervalScheduler,
    K: KeyValueStore,
{
    /// Create a deck, restoring the track list persisted in `store`
    pub fn new(media: M, scheduler: S, store: K, config: PlayerConfig) -> Self {
        let mut player = PlayerState::new(media);
        player.set_volume(config.volume);

        Self {
            player,
            reporter: ProgressReporter::new(scheduler, config.progress_interval),
            tracks: TrackStore::restore(store),
            pending_events: Vec::new(),
        }
    }

    // ===== Transport =====

    /// Play/pause button
    pub fn toggle(&mut self) {
        self.player.toggle_play();
        self.route_events();
    }

    /// Next button; returns whether the player moved
    pub fn next(&mut self) -> Result<bool> {
        let moved = navigation::play_next(&mut self.player, self.tracks.tracks())?;
        self.route_events();
        Ok(moved)
    }

    /// Previous button; returns whether the player moved
    pub fn previous(&mut self) -> Result<bool> {
        let moved = navigation::play_previous(&mut self.player, self.tracks.tracks())?;
        self.route_events();
        Ok(moved)
    }

    /// Click on the timeline at `fraction` of its width
    ///
    /// Publishes a progress sample straight away so the bar follows the click
    /// even while paused.
    pub fn seek(&mut self, fraction: f64) {
        self.player.seek(fraction);
        if let Some(update) =
            ProgressUpdate::measure(self.player.position(), self.player.total_duration())
        {
            self.pending_events.push(update.into_event());
        }
    }

    /// Volume slider (0-100)
    pub fn set_volume(&mut self, percent: u8) {
        self.player.set_volume(percent);
    }

    /// Click on a track row
    pub fn play_track(&mut self, id: &TrackId) -> Result<()> {
        let track = self
            .tracks
            .find(id)
            .cloned()
            .ok_or_else(|| PlaybackError::UnknownTrack(id.clone()))?;
        self.load_and_play(&track)
    }

    /// Play a track that may not be in the list
    pub fn load_and_play(&mut self, track: &Track) -> Result<()> {
        let result = self.player.load_and_play(track);
        self.route_events();
        result
    }

    /// Replace the track list shown (and persist it)
    pub fn replace_tracks(&mut self, tracks: impl IntoIterator<Item = Track>) -> Result<usize> {
        self.tracks.replace_all(tracks)
    }

    // ===== Platform callbacks =====

    /// Sampler tick
    pub fn tick(&mut self) {
        if let Some(update) = self
            .reporter
            .sample(self.player.position(), self.player.total_duration())
        {
            self.pending_events.push(update.into_event());
        }
    }

    /// Notification from the media element
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        self.player.handle_media_event(event);
        self.route_events();
    }

    // ===== Events =====

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Drain queued events into `view`
    pub fn sync_view<V>(&mut self, view: &mut V)
    where
        V: ViewSynchronizer + ?Sized,
    {
        for event in self.drain_events() {
            event.dispatch(view);
        }
    }

    // ===== Queries =====

    pub fn status(&self) -> TransportStatus {
        self.player.status()
    }

    pub fn player(&self) -> &PlayerState<M> {
        &self.player
    }

    pub fn reporter(&self) -> &ProgressReporter<S> {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut ProgressReporter<S> {
        &mut self.reporter
    }

    pub fn tracks(&self) -> &TrackStore<K> {
        &self.tracks
    }

    pub fn tracks_mut(&mut self) -> &mut TrackStore<K> {
        &mut self.tracks
    }

    pub fn has_next(&self) -> bool {
        navigation::has_next(self.tracks.tracks(), self.player.loaded_track())
    }

    pub fn has_previous(&self) -> bool {
        navigation::has_previous(self.tracks.tracks(), self.player.loaded_track())
    }

    /// Player events go through the reporter before anyone else sees them
    fn route_events(&mut self) {
        for event in self.player.drain_events() {
            self.reporter.observe(&event);
            self.pending_events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::FakeMedia;
    use crate::progress::ManualScheduler;
    use deck_core::MemoryStore;

    type TestDeck = Deck<FakeMedia, ManualScheduler, MemoryStore>;

    fn deck_with(ids: &[&str]) -> TestDeck {
        let mut deck = Deck::new(
            FakeMedia::default(),
            ManualScheduler::default(),
            MemoryStore::new(),
            PlayerConfig::default(),
        );
        deck.replace_tracks(ids.iter().map(|id| {
            Track::new(*id, *id).with_preview_url(format!("https://p.scdn.co/{id}"))
        }))
        .unwrap();
        deck
    }

    #[test]
    fn play_track_starts_sampler() {
        let mut deck = deck_with(&["a", "b"]);
        deck.play_track(&TrackId::new("a")).unwrap();

        assert_eq!(deck.status(), TransportStatus::Playing);
        assert!(deck.reporter().is_active());
    }

    #[test]
    fn unknown_track_is_an_error() {
        let mut deck = deck_with(&["a"]);
        let result = deck.play_track(&TrackId::new("zzz"));
        assert!(matches!(result, Err(PlaybackError::UnknownTrack(_))));
        assert_eq!(deck.status(), TransportStatus::Idle);
    }

    #[test]
    fn toggle_stops_sampler() {
        let mut deck = deck_with(&["a"]);
        deck.play_track(&TrackId::new("a")).unwrap();
        deck.toggle();

        assert_eq!(deck.status(), TransportStatus::Paused);
        assert!(!deck.reporter().is_active());
        assert!(deck.reporter().scheduler().running.is_empty());
    }

    #[test]
    fn tick_publishes_progress_only_with_duration() {
        let mut deck = deck_with(&["a"]);
        deck.play_track(&TrackId::new("a")).unwrap();
        deck.drain_events();

        deck.tick();
        assert!(deck.drain_events().is_empty());

        deck.handle_media_event(MediaEvent::MetadataLoaded { duration_secs: 30.0 });
        deck.tick();
        let events = deck.drain_events();
        assert!(matches!(
            events.last(),
            Some(PlayerEvent::Progress { elapsed_label, fraction }) if elapsed_label == "0:00" && *fraction == 0.0
        ));
    }

    #[test]
    fn seek_publishes_progress_immediately() {
        let mut deck = deck_with(&["a"]);
        deck.play_track(&TrackId::new("a")).unwrap();
        deck.handle_media_event(MediaEvent::MetadataLoaded { duration_secs: 180.0 });
        deck.drain_events();

        deck.seek(0.5);
        assert_eq!(deck.player().position(), 90.0);
        assert_eq!(
            deck.drain_events(),
            vec![PlayerEvent::Progress {
                elapsed_label: "1:30".into(),
                fraction: 0.5
            }]
        );
    }

    #[test]
    fn neighbours_follow_loaded_track() {
        let mut deck = deck_with(&["a", "b", "c"]);
        assert!(!deck.has_next());

        deck.play_track(&TrackId::new("b")).unwrap();
        assert!(deck.has_next());
        assert!(deck.has_previous());

        assert!(deck.next().unwrap());
        assert!(!deck.has_next());
        assert!(!deck.next().unwrap());
    }
}
