//! Tests for the `deck play` session
//!
//! Commands are fed as text and the printed transcript is checked, with the
//! simulated clock standing in for audio.

use deck_cli::commands::run_session;
use deck_cli::simulator::Simulator;
use deck_core::storage::{self, keys};
use deck_core::{JsonFileStore, KeyValueStore, MemoryStore, Track};
use deck_playback::{PlayerConfig, TransportStatus};
use tempfile::TempDir;

fn create_test_track(id: &str, name: &str, artist: &str) -> Track {
    Track::new(id, name)
        .with_artists([artist])
        .with_album("Album")
        .with_duration_ms(180_000)
        .with_preview_url(format!("https://p.scdn.co/mp3-preview/{id}"))
}

fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    let tracks = vec![
        create_test_track("1", "One", "A"),
        create_test_track("2", "Two", "B"),
    ];
    storage::set_json(&mut store, keys::LOADED_TRACKS, &tracks).unwrap();
    store
}

fn transcript<K: KeyValueStore>(simulator: &mut Simulator<K>, input: &str) -> Vec<String> {
    let mut out = Vec::new();
    run_session(simulator, input.as_bytes(), &mut out).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn play_wait_and_skip() {
    let mut simulator = Simulator::new(seeded_store(), PlayerConfig::default());
    let lines = transcript(
        &mut simulator,
        "play 1\nwait 7.5\nstatus\nnext\nquit\nplay 2\n",
    );

    assert_eq!(lines[0], "2 tracks loaded, `help` lists commands");
    assert_eq!(lines[1], "Now playing: One - A");
    assert_eq!(lines[2], "> playing 1");
    assert!(lines[3].starts_with("0:07 ["), "got {}", lines[3]);
    assert!(lines[3].ends_with("] 0:30"), "got {}", lines[3]);
    assert_eq!(lines[4], "playing 1 at 0:07 volume 100");
    assert_eq!(lines[5], "|| paused 1");
    assert_eq!(lines[6], "Now playing: Two - B");
    assert_eq!(lines[7], "> playing 2");
    assert_eq!(lines.len(), 8, "nothing runs after quit");

    let loaded = simulator.deck().player().loaded_track().unwrap();
    assert_eq!(loaded.as_str(), "2");
}

#[test]
fn clip_end_pauses_and_stops_sampling() {
    let mut simulator = Simulator::new(seeded_store(), PlayerConfig::default());
    let lines = transcript(&mut simulator, "play 2\nwait 31\n");

    assert!(lines.iter().any(|line| line.starts_with("0:30 [")));
    assert_eq!(lines.last().map(String::as_str), Some("|| paused 2"));
    assert_eq!(simulator.deck().status(), TransportStatus::Paused);
    assert!(!simulator.deck().reporter().is_active());
}

#[test]
fn same_row_twice_toggles() {
    let mut simulator = Simulator::new(seeded_store(), PlayerConfig::default());
    let lines = transcript(&mut simulator, "play 1\nplay 1\n");

    assert_eq!(lines[3], "|| paused 1");
    assert_eq!(simulator.deck().status(), TransportStatus::Paused);
}

#[test]
fn seek_shows_position_immediately() {
    let mut simulator = Simulator::new(seeded_store(), PlayerConfig::default());
    let lines = transcript(&mut simulator, "play 1\ntoggle\nseek 50%\n");

    assert!(lines.last().unwrap().starts_with("0:15 ["));
    assert_eq!(simulator.deck().player().position(), 15.0);
}

#[test]
fn previous_at_first_track_does_nothing() {
    let mut simulator = Simulator::new(seeded_store(), PlayerConfig::default());
    let lines = transcript(&mut simulator, "play 1\nprev\n");

    assert_eq!(lines.len(), 3);
    assert_eq!(
        simulator.deck().player().loaded_track().unwrap().as_str(),
        "1"
    );
}

#[test]
fn bad_input_is_reported_and_session_continues() {
    let mut simulator = Simulator::new(seeded_store(), PlayerConfig::default());
    let lines = transcript(&mut simulator, "dance\nplay 9\nplay 2\n");

    assert_eq!(lines[1], "unknown command: dance");
    assert_eq!(lines[2], "error: Unknown track: 9");
    assert_eq!(lines[3], "Now playing: Two - B");
}

#[test]
fn list_marks_loaded_track() {
    let mut simulator = Simulator::new(seeded_store(), PlayerConfig::default());
    let lines = transcript(&mut simulator, "play 2\nlist\n");

    assert_eq!(lines[3], "   1  3:00  One - A");
    assert_eq!(lines[4], "*  2  3:00  Two - B");
}

#[test]
fn volume_reaches_media_element() {
    let mut simulator = Simulator::new(seeded_store(), PlayerConfig::default());
    transcript(&mut simulator, "vol 40\n");

    assert_eq!(simulator.deck().player().volume(), 40);
    assert!((simulator.deck().player().media().volume() - 0.4).abs() < f64::EPSILON);
}

#[test]
fn track_list_is_read_from_state_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    {
        let mut store = JsonFileStore::open(&path).unwrap();
        let tracks = vec![create_test_track("7", "Seven", "C")];
        storage::set_json(&mut store, keys::LOADED_TRACKS, &tracks).unwrap();
    }

    let store = JsonFileStore::open(&path).unwrap();
    let mut simulator = Simulator::new(store, PlayerConfig::default());
    let lines = transcript(&mut simulator, "play 1\n");

    assert_eq!(lines[0], "1 tracks loaded, `help` lists commands");
    assert_eq!(lines[1], "Now playing: Seven - C");
}
