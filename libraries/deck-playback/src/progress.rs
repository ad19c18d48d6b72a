//! Progress Reporter
//!
//! While the player is playing, a periodic sampler reads the position and
//! publishes an elapsed label plus a progress fraction. At most one sampler
//! runs at any time.

use crate::{error::Result, events::PlayerEvent, time::format_elapsed};
use std::time::Duration;
use tracing::{debug, warn};

/// Handle of a running periodic timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

/// Platform timer facility
///
/// The platform calls back into [`Deck::tick`](crate::Deck::tick) every
/// `period` until the timer is cancelled.
pub trait IntervalScheduler {
    /// Start a periodic timer
    fn start(&mut self, period: Duration) -> Result<TimerId>;

    /// Stop a timer; cancelling an unknown timer is a no-op
    fn cancel(&mut self, timer: TimerId);
}

/// One progress sample
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    /// Elapsed time as m:ss
    pub elapsed_label: String,
    /// Position divided by duration, clamped to [0, 1]
    pub fraction: f64,
}

impl ProgressUpdate {
    /// Compute a sample, or `None` while the duration is unknown, zero or not finite
    pub fn measure(position_secs: f64, duration_secs: Option<f64>) -> Option<Self> {
        let duration = duration_secs.filter(|d| d.is_finite() && *d > 0.0)?;
        let fraction = if position_secs.is_finite() {
            (position_secs / duration).clamp(0.0, 1.0)
        } else {
            0.0
        };

        Some(Self {
            elapsed_label: format_elapsed(position_secs),
            fraction,
        })
    }

    pub fn into_event(self) -> PlayerEvent {
        PlayerEvent::Progress {
            elapsed_label: self.elapsed_label,
            fraction: self.fraction,
        }
    }
}

/// Owns the progress sampler and its lifecycle
pub struct ProgressReporter<S: IntervalScheduler> {
    scheduler: S,
    period: Duration,
    active: Option<TimerId>,
}

impl<S: IntervalScheduler> ProgressReporter<S> {
    pub fn new(scheduler: S, period: Duration) -> Self {
        Self {
            scheduler,
            period,
            active: None,
        }
    }

    /// React to a player event
    ///
    /// Playback start activates the sampler; pause, track change and
    /// playback errors deactivate it.
    pub fn observe(&mut self, event: &PlayerEvent) {
        match event {
            PlayerEvent::PlayStart { .. } => self.activate(),
            PlayerEvent::Pause { .. }
            | PlayerEvent::NowPlaying(_)
            | PlayerEvent::PlaybackError { .. } => self.deactivate(),
            PlayerEvent::MetadataLoaded { .. } | PlayerEvent::Progress { .. } => {}
        }
    }

    /// Start sampling, replacing any running sampler
    pub fn activate(&mut self) {
        self.deactivate();
        match self.scheduler.start(self.period) {
            Ok(timer) => {
                debug!(?timer, period_ms = self.period.as_millis() as u64, "Progress sampler started");
                self.active = Some(timer);
            }
            Err(e) => warn!(error = %e, "Could not start progress sampler"),
        }
    }

    /// Stop sampling
    pub fn deactivate(&mut self) {
        if let Some(timer) = self.active.take() {
            self.scheduler.cancel(timer);
            debug!(?timer, "Progress sampler stopped");
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_timer(&self) -> Option<TimerId> {
        self.active
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Sample once; `None` while inactive or the duration is unusable
    pub fn sample(&self, position_secs: f64, duration_secs: Option<f64>) -> Option<ProgressUpdate> {
        if !self.is_active() {
            return None;
        }
        ProgressUpdate::measure(position_secs, duration_secs)
    }
}

impl<S: IntervalScheduler> Drop for ProgressReporter<S> {
    fn drop(&mut self) {
        self.deactivate();
    }
}

/// Scheduler that only records what it was asked to do
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ManualScheduler {
    pub next_id: u32,
    pub running: Vec<TimerId>,
    pub started: usize,
}

#[cfg(test)]
impl IntervalScheduler for ManualScheduler {
    fn start(&mut self, _period: Duration) -> Result<TimerId> {
        self.next_id += 1;
        self.started += 1;
        let timer = TimerId(self.next_id);
        self.running.push(timer);
        Ok(timer)
    }

    fn cancel(&mut self, timer: TimerId) {
        self.running.retain(|t| *t != timer);
    }
}
