//! Section router
//!
//! The dashboard is a single page with two kinds of section. Opening one
//! pushes a history entry, like `history.pushState`; going back pops to the
//! previous entry, like `popstate`.

use deck_core::PlaylistId;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Base path of the dashboard
pub const DASHBOARD_PATH: &str = "/dashboard";

/// A client-side route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Section {
    /// Greeting plus featured and top playlists
    Dashboard,
    /// One playlist with its tracks
    Playlist { playlist: PlaylistId },
}

impl Section {
    pub fn playlist(id: impl Into<PlaylistId>) -> Self {
        Self::Playlist {
            playlist: id.into(),
        }
    }

    /// URL path shown in the address bar
    pub fn path(&self) -> String {
        match self {
            Self::Dashboard => DASHBOARD_PATH.to_string(),
            Self::Playlist { playlist } => format!("{DASHBOARD_PATH}/playlist/{playlist}"),
        }
    }

    /// Resolve a URL path back to a section
    pub fn from_path(path: &str) -> Option<Self> {
        let rest = path.trim_end_matches('/').strip_prefix(DASHBOARD_PATH)?;
        if rest.is_empty() {
            return Some(Self::Dashboard);
        }

        let id = rest.strip_prefix("/playlist/")?;
        if id.is_empty() || id.contains('/') {
            return None;
        }
        Some(Self::playlist(id))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// History of visited sections with a cursor
#[derive(Debug, Clone)]
pub struct Router {
    entries: Vec<Section>,
    cursor: usize,
}

impl Router {
    /// Start on the dashboard
    pub fn new() -> Self {
        Self::starting_at(Section::Dashboard)
    }

    /// Start on `section` (deep link)
    pub fn starting_at(section: Section) -> Self {
        Self {
            entries: vec![section],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &Section {
        &self.entries[self.cursor]
    }

    /// Visit `section`, discarding any forward history
    pub fn push(&mut self, section: Section) -> &Section {
        self.entries.truncate(self.cursor + 1);
        debug!(path = %section, "Push section");
        self.entries.push(section);
        self.cursor = self.entries.len() - 1;
        self.current()
    }

    /// Step back; `None` at the first entry
    pub fn back(&mut self) -> Option<&Section> {
        self.cursor = self.cursor.checked_sub(1)?;
        debug!(path = %self.current(), "Back");
        Some(self.current())
    }

    /// Step forward; `None` at the latest entry
    pub fn forward(&mut self) -> Option<&Section> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    /// Number of history entries
    pub fn depth(&self) -> usize {
        self.entries.len()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
