//! Scenario tests for the transport control surface
//!
//! Each test drives a [`Deck`] the way the dashboard does: row clicks,
//! transport buttons, media notifications and sampler ticks.

mod common;

use common::*;
use deck_core::storage::{keys, KeyValueStore};
use deck_core::{MemoryStore, Track, TrackId};
use deck_playback::{
    MediaEvent, NowPlaying, PlaybackError, PlayerEvent, TransportStatus, ViewSynchronizer,
};
use std::time::Duration;

fn id(s: &str) -> TrackId {
    TrackId::new(s)
}

#[test]
fn row_click_twice_is_play_then_pause() {
    let mut deck = create_deck(&["a", "b"]);

    deck.play_track(&id("a")).unwrap();
    assert_eq!(deck.status(), TransportStatus::Playing);

    deck.play_track(&id("a")).unwrap();
    assert_eq!(deck.status(), TransportStatus::Paused);
    assert_eq!(deck.player().loaded_track(), Some(&id("a")));
}

#[test]
fn clicking_same_row_matches_toggle() {
    let mut via_row = create_deck(&["a"]);
    let mut via_toggle = create_deck(&["a"]);

    via_row.play_track(&id("a")).unwrap();
    via_toggle.play_track(&id("a")).unwrap();
    via_row.drain_events();
    via_toggle.drain_events();

    via_row.play_track(&id("a")).unwrap();
    via_toggle.toggle();

    assert_eq!(via_row.status(), via_toggle.status());
    assert_eq!(via_row.drain_events(), via_toggle.drain_events());
}

#[test]
fn previous_after_two_plays_returns_to_first() {
    let mut deck = create_deck(&["a", "b", "c"]);
    deck.play_track(&id("a")).unwrap();
    deck.play_track(&id("b")).unwrap();

    assert!(deck.previous().unwrap());
    assert_eq!(deck.player().loaded_track(), Some(&id("a")));
    assert_eq!(deck.status(), TransportStatus::Playing);
}

#[test]
fn next_at_end_changes_nothing() {
    let mut deck = create_deck(&["a", "b"]);
    deck.play_track(&id("b")).unwrap();
    deck.drain_events();

    assert!(!deck.next().unwrap());
    assert_eq!(deck.player().loaded_track(), Some(&id("b")));
    assert!(deck.drain_events().is_empty());
}

#[test]
fn loaded_track_missing_from_list_blocks_navigation() {
    let mut deck = create_deck(&["1", "2"]);
    deck.load_and_play(&create_test_track("3")).unwrap();
    deck.drain_events();

    assert!(!deck.next().unwrap());
    assert!(!deck.previous().unwrap());
    assert_eq!(deck.player().loaded_track(), Some(&id("3")));
    assert!(deck.drain_events().is_empty());
}

#[test]
fn seek_half_of_three_minutes() {
    let mut deck = create_deck(&["a"]);
    deck.play_track(&id("a")).unwrap();
    deck.handle_media_event(MediaEvent::MetadataLoaded {
        duration_secs: 180.0,
    });

    deck.seek(0.5);
    assert_eq!(deck.player().position(), 90.0);
}

#[test]
fn seek_before_metadata_is_ignored() {
    let mut deck = create_deck(&["a"]);
    deck.play_track(&id("a")).unwrap();
    deck.drain_events();

    deck.seek(0.5);
    assert_eq!(deck.player().position(), 0.0);
    assert!(deck.drain_events().is_empty());
}

#[test]
fn sampler_runs_only_while_playing() {
    let mut deck = create_deck(&["a", "b", "c"]);

    deck.play_track(&id("a")).unwrap();
    assert!(deck.reporter().is_active());

    deck.play_track(&id("b")).unwrap();
    deck.next().unwrap();
    deck.previous().unwrap();
    assert!(deck.reporter().is_active());
    assert_eq!(deck.reporter().scheduler().running.len(), 1);

    deck.toggle();
    assert!(!deck.reporter().is_active());
    assert!(deck.reporter().scheduler().running.is_empty());

    deck.toggle();
    deck.handle_media_event(MediaEvent::Ended);
    assert!(!deck.reporter().is_active());

    assert_eq!(deck.reporter().scheduler().max_running, 1);
}

#[test]
fn late_rejection_of_skipped_track_keeps_current_playing() {
    let mut deck = create_deck(&["a", "b", "c"]);
    deck.play_track(&id("a")).unwrap();
    deck.next().unwrap();
    deck.next().unwrap();
    deck.drain_events();

    // Browser rejects the first play() once the second load interrupts it
    deck.handle_media_event(MediaEvent::PlayRejected {
        source: "https://p.scdn.co/mp3-preview/a".into(),
        message: "AbortError: The play() request was interrupted by a new load request.".into(),
    });

    assert_eq!(deck.player().loaded_track(), Some(&id("c")));
    assert_eq!(deck.status(), TransportStatus::Playing);
    assert!(deck.reporter().is_active());
    assert!(deck.player().media().playing);
    assert!(deck.drain_events().is_empty());
}

#[test]
fn pause_from_outside_stops_sampler() {
    let mut deck = create_deck(&["a"]);
    deck.play_track(&id("a")).unwrap();
    deck.drain_events();

    deck.handle_media_event(MediaEvent::Paused);
    assert_eq!(deck.status(), TransportStatus::Paused);
    assert!(!deck.reporter().is_active());
    assert_eq!(deck.drain_events(), vec![PlayerEvent::Pause { track_id: id("a") }]);

    deck.handle_media_event(MediaEvent::Playing);
    assert_eq!(deck.status(), TransportStatus::Playing);
    assert!(deck.reporter().is_active());
    assert_eq!(deck.reporter().scheduler().max_running, 1);
}

#[test]
fn sampler_uses_configured_period() {
    let mut deck = create_deck(&["a"]);
    deck.play_track(&id("a")).unwrap();
    assert_eq!(
        deck.reporter().scheduler().periods,
        vec![Duration::from_millis(100)]
    );
}

#[test]
fn progress_follows_position() {
    let mut deck = create_deck(&["a"]);
    deck.play_track(&id("a")).unwrap();
    deck.handle_media_event(MediaEvent::MetadataLoaded { duration_secs: 30.0 });
    deck.drain_events();

    // 0.25 of 30s = 7.5s
    deck.seek(0.25);
    deck.drain_events();
    deck.tick();

    assert_eq!(
        deck.drain_events(),
        vec![PlayerEvent::Progress {
            elapsed_label: "0:07".into(),
            fraction: 0.25,
        }]
    );
}

#[test]
fn ticks_while_paused_publish_nothing() {
    let mut deck = create_deck(&["a"]);
    deck.play_track(&id("a")).unwrap();
    deck.handle_media_event(MediaEvent::MetadataLoaded { duration_secs: 30.0 });
    deck.toggle();
    deck.drain_events();

    deck.tick();
    assert!(deck.drain_events().is_empty());
}

#[test]
fn refused_play_surfaces_error() {
    let mut deck: TestDeck = deck_playback::Deck::new(
        FakeMedia {
            refuse_play: true,
            ..FakeMedia::default()
        },
        RecordingScheduler::default(),
        MemoryStore::new(),
        deck_playback::PlayerConfig::default(),
    );
    deck.replace_tracks(vec![create_test_track("a")]).unwrap();

    deck.play_track(&id("a")).unwrap();
    assert_eq!(deck.status(), TransportStatus::Paused);
    assert!(!deck.reporter().is_active());
    assert!(deck
        .drain_events()
        .iter()
        .any(|e| matches!(e, PlayerEvent::PlaybackError { message, .. } if message.contains("NotAllowedError"))));
}

#[test]
fn track_without_preview_cannot_be_played() {
    let mut deck = create_deck(&["a"]);
    let silent = Track::new("x", "Silent");

    let result = deck.load_and_play(&silent);
    assert!(matches!(result, Err(PlaybackError::MissingPreview(_))));
    assert_eq!(deck.status(), TransportStatus::Idle);
}

#[test]
fn track_list_survives_reload() {
    let deck = create_deck(&["a", "b"]);
    let snapshot = deck
        .tracks()
        .backend()
        .get(keys::LOADED_TRACKS)
        .unwrap()
        .unwrap();

    let mut store = MemoryStore::new();
    store.set(keys::LOADED_TRACKS, &snapshot).unwrap();
    let mut reloaded = create_deck_with_store(&[], store);

    assert_eq!(reloaded.tracks().len(), 2);
    reloaded.play_track(&id("a")).unwrap();
    assert!(reloaded.next().unwrap());
    assert_eq!(reloaded.player().loaded_track(), Some(&id("b")));
}

#[test]
fn view_sees_consistent_sequence() {
    #[derive(Default)]
    struct View {
        title: String,
        playing_row: Option<TrackId>,
        log: Vec<&'static str>,
    }

    impl ViewSynchronizer for View {
        fn on_now_playing(&mut self, now: &NowPlaying) {
            self.title = now.title.clone();
            self.log.push("now");
        }

        fn on_play_start(&mut self, track_id: &TrackId) {
            self.playing_row = Some(track_id.clone());
            self.log.push("play");
        }

        fn on_pause(&mut self, _track_id: &TrackId) {
            self.playing_row = None;
            self.log.push("pause");
        }
    }

    let mut deck = create_deck(&["a", "b"]);
    let mut view = View::default();

    deck.play_track(&id("a")).unwrap();
    deck.next().unwrap();
    deck.sync_view(&mut view);

    assert_eq!(view.title, "Track b");
    assert_eq!(view.playing_row, Some(id("b")));
    assert_eq!(view.log, vec!["now", "play", "pause", "now", "play"]);
}
