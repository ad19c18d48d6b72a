//! Property-based tests for navigation and progress
//!
//! Uses proptest to check the index arithmetic and sampler lifecycle over
//! random track lists and random button mashing.

mod common;

use common::*;
use deck_core::{Track, TrackId};
use deck_playback::{navigation, MediaEvent, ProgressUpdate, TransportStatus};
use proptest::prelude::*;

fn track_list() -> impl Strategy<Value = Vec<Track>> {
    (1usize..30).prop_map(|len| {
        (0..len)
            .map(|i| create_test_track(&format!("t{i}")))
            .collect()
    })
}

#[derive(Debug, Clone)]
enum Action {
    PlayRow(usize),
    Toggle,
    Next,
    Previous,
    Seek(f64),
    Metadata(f64),
    Ended,
    Tick,
    ExternalPause,
    ExternalPlay,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0usize..10).prop_map(Action::PlayRow),
        Just(Action::Toggle),
        Just(Action::Next),
        Just(Action::Previous),
        (0.0f64..=1.0).prop_map(Action::Seek),
        (1.0f64..600.0).prop_map(Action::Metadata),
        Just(Action::Ended),
        Just(Action::Tick),
        Just(Action::ExternalPause),
        Just(Action::ExternalPlay),
    ]
}

proptest! {
    /// Property: next is the element at index + 1, or nothing at the end
    #[test]
    fn next_is_index_plus_one(tracks in track_list(), pick in any::<prop::sample::Index>()) {
        let i = pick.index(tracks.len());
        let loaded = tracks[i].id.clone();

        let next = navigation::next_of(&tracks, Some(&loaded));
        if i + 1 < tracks.len() {
            prop_assert_eq!(&next.unwrap().id, &tracks[i + 1].id);
        } else {
            prop_assert!(next.is_none());
        }
    }

    /// Property: previous is the element at index - 1, or nothing at the start
    #[test]
    fn previous_is_index_minus_one(tracks in track_list(), pick in any::<prop::sample::Index>()) {
        let i = pick.index(tracks.len());
        let loaded = tracks[i].id.clone();

        let previous = navigation::previous_of(&tracks, Some(&loaded));
        if i > 0 {
            prop_assert_eq!(&previous.unwrap().id, &tracks[i - 1].id);
        } else {
            prop_assert!(previous.is_none());
        }
    }

    /// Property: an id outside the list has no neighbours
    #[test]
    fn foreign_id_has_no_neighbours(tracks in track_list()) {
        let foreign = TrackId::new("not-in-list");
        prop_assert!(navigation::next_of(&tracks, Some(&foreign)).is_none());
        prop_assert!(navigation::previous_of(&tracks, Some(&foreign)).is_none());
    }

    /// Property: whatever the user does, at most one sampler exists and it
    /// exists exactly while playing
    #[test]
    fn one_sampler_exactly_while_playing(actions in prop::collection::vec(action(), 1..60)) {
        let ids: Vec<String> = (0..10).map(|i| format!("t{i}")).collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let mut deck = create_deck(&id_refs);

        for action in actions {
            match action {
                Action::PlayRow(row) => deck.play_track(&TrackId::new(ids[row].clone())).unwrap(),
                Action::Toggle => deck.toggle(),
                Action::Next => {
                    deck.next().unwrap();
                }
                Action::Previous => {
                    deck.previous().unwrap();
                }
                Action::Seek(fraction) => deck.seek(fraction),
                Action::Metadata(duration_secs) => {
                    deck.handle_media_event(MediaEvent::MetadataLoaded { duration_secs });
                }
                Action::Ended => deck.handle_media_event(MediaEvent::Ended),
                Action::Tick => deck.tick(),
                Action::ExternalPause => deck.handle_media_event(MediaEvent::Paused),
                Action::ExternalPlay => deck.handle_media_event(MediaEvent::Playing),
            }

            let playing = deck.status() == TransportStatus::Playing;
            prop_assert_eq!(deck.reporter().is_active(), playing);
            prop_assert!(deck.reporter().scheduler().running.len() <= 1);
            if deck.status() != TransportStatus::Idle {
                prop_assert!(deck.player().loaded_track().is_some());
            }
        }
        prop_assert!(deck.reporter().scheduler().max_running <= 1);
    }

    /// Property: progress fractions stay within [0, 1]
    #[test]
    fn fraction_is_bounded(position in -100.0f64..1000.0, duration in 0.1f64..600.0) {
        let update = ProgressUpdate::measure(position, Some(duration)).unwrap();
        prop_assert!((0.0..=1.0).contains(&update.fraction));
    }
}
