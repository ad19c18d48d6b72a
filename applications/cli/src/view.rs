//! Plain-text rendering
//!
//! [`TerminalView`] prints player events as they happen; the free functions
//! render dashboard sections.

use deck_core::{Track, TrackId};
use deck_dashboard::{DashboardView, PlaylistView};
use deck_playback::{time, NowPlaying, ViewSynchronizer};
use std::io::Write;

/// Width of the text progress bar
const BAR_WIDTH: usize = 30;

/// Writes one line per player event
pub struct TerminalView<W: Write> {
    out: W,
    duration_label: Option<String>,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            duration_label: None,
        }
    }

    /// The underlying writer, for output that is not a player event
    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // Terminal output is best effort; a closed pipe must not stop playback
    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }
}

impl<W: Write> ViewSynchronizer for TerminalView<W> {
    fn on_now_playing(&mut self, now: &NowPlaying) {
        self.duration_label = None;
        self.line(&format!("Now playing: {} - {}", now.title, now.artists));
    }

    fn on_play_start(&mut self, track_id: &TrackId) {
        self.line(&format!("> playing {track_id}"));
    }

    fn on_pause(&mut self, track_id: &TrackId) {
        self.line(&format!("|| paused {track_id}"));
    }

    fn on_progress(&mut self, elapsed_label: &str, fraction: f64) {
        let total = self.duration_label.as_deref().unwrap_or("-:--");
        let text = format!("{elapsed_label} {} {total}", progress_bar(fraction));
        self.line(&text);
    }

    fn on_metadata_loaded(&mut self, duration_secs: f64) {
        self.duration_label = Some(time::format_elapsed(duration_secs));
    }

    fn on_playback_error(&mut self, track_id: Option<&TrackId>, message: &str) {
        match track_id {
            Some(id) => self.line(&format!("! cannot play {id}: {message}")),
            None => self.line(&format!("! playback error: {message}")),
        }
    }
}

/// `[#####-----]` for a fraction in 0.0 - 1.0
pub fn progress_bar(fraction: f64) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

pub fn render_dashboard(view: &DashboardView) -> String {
    let mut text = format!("{}\n", view.greeting);
    if let Some(message) = &view.featured_message {
        text.push_str(&format!("{message}\n"));
    }
    for shelf in &view.shelves {
        text.push_str(&format!("\n{}\n", shelf.title));
        for playlist in &shelf.playlists {
            text.push_str(&format!("  {}  {}\n", playlist.id, playlist.name));
        }
    }
    text
}

pub fn render_playlist(view: &PlaylistView) -> String {
    let mut text = format!("{} ({})\n", view.name, view.song_count);
    if let Some(description) = &view.description {
        text.push_str(&format!("{description}\n"));
    }
    text.push('\n');
    for row in &view.rows {
        text.push_str(&format!(
            "{:>3}  {}  {} - {}  [{}]\n",
            row.number, row.duration, row.title, row.artists, row.album
        ));
    }
    text
}

/// Numbered track list, marking the loaded track with `*`
pub fn render_tracks(tracks: &[Track], loaded: Option<&TrackId>) -> String {
    let mut text = String::new();
    for (index, track) in tracks.iter().enumerate() {
        let marker = if Some(&track.id) == loaded { '*' } else { ' ' };
        text.push_str(&format!(
            "{marker}{:>3}  {}  {} - {}\n",
            index + 1,
            time::format_track_duration(track.duration_ms),
            track.name,
            track.artists_display()
        ));
    }
    text
}
