//! Shared test doubles for deck-playback integration tests

#![allow(dead_code)]

use deck_core::{MemoryStore, Track};
use deck_playback::{
    Deck, IntervalScheduler, MediaElement, PlaybackError, PlayerConfig, Result, TimerId,
};
use std::time::Duration;

/// Media element with a hand-cranked clock
#[derive(Debug, Default)]
pub struct FakeMedia {
    pub source: Option<String>,
    pub playing: bool,
    pub position: f64,
    pub volume: f64,
    pub refuse_play: bool,
}

impl FakeMedia {
    /// Let `secs` of audio play (only while playing)
    pub fn advance(&mut self, secs: f64) {
        if self.playing {
            self.position += secs;
        }
    }
}

impl MediaElement for FakeMedia {
    fn set_source(&mut self, url: &str) {
        self.source = Some(url.to_string());
        self.position = 0.0;
        self.playing = false;
    }

    fn play(&mut self) -> Result<()> {
        if self.refuse_play {
            return Err(PlaybackError::media("NotAllowedError"));
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

/// Scheduler recording running timers
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    next_id: u32,
    pub running: Vec<TimerId>,
    pub max_running: usize,
    pub periods: Vec<Duration>,
}

impl IntervalScheduler for RecordingScheduler {
    fn start(&mut self, period: Duration) -> Result<TimerId> {
        self.next_id += 1;
        let timer = TimerId(self.next_id);
        self.running.push(timer);
        self.periods.push(period);
        self.max_running = self.max_running.max(self.running.len());
        Ok(timer)
    }

    fn cancel(&mut self, timer: TimerId) {
        self.running.retain(|t| *t != timer);
    }
}

pub type TestDeck = Deck<FakeMedia, RecordingScheduler, MemoryStore>;

pub fn create_test_track(id: &str) -> Track {
    Track::new(id, format!("Track {id}"))
        .with_artists(["Test Artist"])
        .with_album("Test Album")
        .with_duration_ms(30_000)
        .with_preview_url(format!("https://p.scdn.co/mp3-preview/{id}"))
}

pub fn create_deck(ids: &[&str]) -> TestDeck {
    create_deck_with_store(ids, MemoryStore::new())
}

pub fn create_deck_with_store(ids: &[&str], store: MemoryStore) -> TestDeck {
    let mut deck = Deck::new(
        FakeMedia::default(),
        RecordingScheduler::default(),
        store,
        PlayerConfig::default(),
    );
    if !ids.is_empty() {
        deck.replace_tracks(ids.iter().map(|id| create_test_track(id)))
            .unwrap();
    }
    deck
}
