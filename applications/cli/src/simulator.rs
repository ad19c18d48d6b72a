//! Simulated transport for `deck play`
//!
//! [`SimulatedMedia`] keeps a virtual clock instead of producing sound;
//! [`VirtualInterval`] only records whether the sampler runs. `wait` commands
//! advance the clock and deliver sampler ticks.

use deck_core::{KeyValueStore, TrackId};
use deck_playback::{
    Deck, IntervalScheduler, MediaElement, MediaEvent, PlayerConfig, PlayerEvent,
    ViewSynchronizer, TimerId,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Length reported for every preview clip
pub const PREVIEW_LENGTH_SECS: f64 = 30.0;

#[derive(Debug, Default)]
struct ClockState {
    source: Option<String>,
    playing: bool,
    position: f64,
    volume: f64,
}

/// Media element with a virtual clock
///
/// Clones share the clock, so the simulator keeps one to advance time while
/// the deck owns the other.
#[derive(Debug, Clone, Default)]
pub struct SimulatedMedia {
    state: Rc<RefCell<ClockState>>,
}

impl SimulatedMedia {
    /// Let `secs` pass; returns true when the clip reached its end
    pub fn advance(&self, secs: f64) -> bool {
        let mut state = self.state.borrow_mut();
        if !state.playing {
            return false;
        }
        state.position = (state.position + secs).min(PREVIEW_LENGTH_SECS);
        if state.position >= PREVIEW_LENGTH_SECS {
            state.playing = false;
            return true;
        }
        false
    }

    pub fn is_playing(&self) -> bool {
        self.state.borrow().playing
    }

    pub fn volume(&self) -> f64 {
        self.state.borrow().volume
    }
}

impl MediaElement for SimulatedMedia {
    fn set_source(&mut self, url: &str) {
        let mut state = self.state.borrow_mut();
        state.source = Some(url.to_string());
        state.position = 0.0;
        state.playing = false;
    }

    fn play(&mut self) -> deck_playback::Result<()> {
        let mut state = self.state.borrow_mut();
        if state.source.is_none() {
            return Err(deck_playback::PlaybackError::media("no source"));
        }
        // Playing an ended clip restarts it
        if state.position >= PREVIEW_LENGTH_SECS {
            state.position = 0.0;
        }
        state.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.state.borrow_mut().playing = false;
    }

    fn current_time(&self) -> f64 {
        self.state.borrow().position
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.state.borrow_mut().position = seconds.clamp(0.0, PREVIEW_LENGTH_SECS);
    }

    fn set_volume(&mut self, volume: f64) {
        self.state.borrow_mut().volume = volume;
    }
}

/// Scheduler that never fires on its own
#[derive(Debug, Default)]
pub struct VirtualInterval {
    next_id: u32,
    running: Option<TimerId>,
}

impl IntervalScheduler for VirtualInterval {
    fn start(&mut self, _period: Duration) -> deck_playback::Result<TimerId> {
        self.next_id += 1;
        let timer = TimerId(self.next_id);
        self.running = Some(timer);
        Ok(timer)
    }

    fn cancel(&mut self, timer: TimerId) {
        if self.running == Some(timer) {
            self.running = None;
        }
    }
}

/// One line of input at the `deck play` prompt
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Row number (1-based) or track id
    Play(String),
    Toggle,
    Next,
    Previous,
    /// Fraction of the clip, 0.0 - 1.0
    Seek(f64),
    Volume(u8),
    /// Seconds of simulated time
    Wait(f64),
    List,
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err("empty command".to_string());
        };
        let arg = words.next();

        let command = match (verb, arg) {
            ("play" | "p", Some(target)) => Self::Play(target.to_string()),
            ("toggle" | "t" | "pause", None) => Self::Toggle,
            ("next" | "n", None) => Self::Next,
            ("prev" | "previous", None) => Self::Previous,
            ("seek", Some(value)) => Self::Seek(parse_fraction(value)?),
            ("vol" | "volume", Some(value)) => Self::Volume(
                value
                    .parse::<u8>()
                    .ok()
                    .filter(|percent| *percent <= 100)
                    .ok_or_else(|| format!("volume must be 0-100, got {value}"))?,
            ),
            ("wait" | "w", Some(value)) => Self::Wait(
                value
                    .parse::<f64>()
                    .ok()
                    .filter(|secs| secs.is_finite() && *secs >= 0.0)
                    .ok_or_else(|| format!("not a number of seconds: {value}"))?,
            ),
            ("list" | "ls", None) => Self::List,
            ("status" | "s", None) => Self::Status,
            ("help" | "?", None) => Self::Help,
            ("quit" | "q" | "exit", None) => Self::Quit,
            _ => return Err(format!("unknown command: {line}")),
        };

        if words.next().is_some() {
            return Err(format!("too many arguments: {line}"));
        }
        Ok(command)
    }
}

/// Accepts `0.25` or `25%`
fn parse_fraction(value: &str) -> Result<f64, String> {
    let parsed = match value.strip_suffix('%') {
        Some(percent) => percent.parse::<f64>().map(|p| p / 100.0),
        None => value.parse::<f64>(),
    };
    parsed
        .ok()
        .filter(|f| (0.0..=1.0).contains(f))
        .ok_or_else(|| format!("seek position must be between 0 and 1, got {value}"))
}

/// The deck wired to the simulated media element
pub struct Simulator<K: KeyValueStore> {
    deck: Deck<SimulatedMedia, VirtualInterval, K>,
    clock: SimulatedMedia,
    period: Duration,
}

impl<K: KeyValueStore> Simulator<K> {
    pub fn new(store: K, config: PlayerConfig) -> Self {
        let clock = SimulatedMedia::default();
        let period = config.progress_interval;
        Self {
            deck: Deck::new(clock.clone(), VirtualInterval::default(), store, config),
            clock,
            period,
        }
    }

    pub fn deck(&self) -> &Deck<SimulatedMedia, VirtualInterval, K> {
        &self.deck
    }

    /// Run one command; returns false when the session should end
    pub fn execute<V>(&mut self, command: Command, view: &mut V) -> deck_playback::Result<bool>
    where
        V: ViewSynchronizer + ?Sized,
    {
        debug!(?command, "Executing");
        match command {
            Command::Play(target) => {
                let id = self.resolve(&target);
                self.deck.play_track(&id)?;
            }
            Command::Toggle => self.deck.toggle(),
            Command::Next => {
                self.deck.next()?;
            }
            Command::Previous => {
                self.deck.previous()?;
            }
            Command::Seek(fraction) => self.deck.seek(fraction),
            Command::Volume(percent) => self.deck.set_volume(percent),
            Command::Wait(secs) => self.wait(secs),
            Command::Quit => return Ok(false),
            Command::List | Command::Status | Command::Help => {}
        }

        self.publish(view);
        Ok(true)
    }

    /// Row number (1-based) or literal id
    fn resolve(&self, target: &str) -> TrackId {
        target
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| self.deck.tracks().get(index))
            .map_or_else(|| TrackId::new(target), |track| track.id.clone())
    }

    fn wait(&mut self, secs: f64) {
        let step = self.period.as_secs_f64();
        let mut remaining = secs;
        while remaining > 0.0 && self.clock.is_playing() {
            let elapsed = remaining.min(step);
            remaining -= elapsed;
            if self.clock.advance(elapsed) {
                self.deck.tick();
                self.deck.handle_media_event(MediaEvent::Ended);
                break;
            }
            self.deck.tick();
        }
    }

    /// Hand queued events to `view`
    ///
    /// A newly loaded clip gets its metadata straight away, and of a run of
    /// progress samples only the last is shown.
    fn publish<V>(&mut self, view: &mut V)
    where
        V: ViewSynchronizer + ?Sized,
    {
        let mut events = self.deck.drain_events();
        if events
            .iter()
            .any(|event| matches!(event, PlayerEvent::NowPlaying(_)))
        {
            self.deck.handle_media_event(MediaEvent::MetadataLoaded {
                duration_secs: PREVIEW_LENGTH_SECS,
            });
            events.extend(self.deck.drain_events());
        }

        let last_progress = events
            .iter()
            .rposition(|event| matches!(event, PlayerEvent::Progress { .. }));
        for (index, event) in events.iter().enumerate() {
            let is_progress = matches!(event, PlayerEvent::Progress { .. });
            if !is_progress || Some(index) == last_progress {
                event.dispatch(view);
            }
        }
    }
}
