//! View models for the two dashboard sections
//!
//! Plain data, ready for whatever renders it (HTML templates, a terminal).

use deck_api_client::FeaturedPlaylists;
use deck_core::{Playlist, PlaylistId, PlaylistSummary, Track, TrackId, UserProfile};
use deck_playback::time::format_track_duration;
use serde::Serialize;

/// A titled row of playlist cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shelf {
    pub title: String,
    pub playlists: Vec<PlaylistSummary>,
}

/// Landing section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// "Hello {name}"
    pub greeting: String,
    pub display_name: String,
    /// Otherwise a default avatar is shown
    pub has_avatar: bool,
    pub featured_message: Option<String>,
    /// "featured" then "top playlists"
    pub shelves: Vec<Shelf>,
}

impl DashboardView {
    pub fn new(
        profile: &UserProfile,
        featured: FeaturedPlaylists,
        top: Vec<PlaylistSummary>,
    ) -> Self {
        let display_name = profile.greeting_name().to_string();
        Self {
            greeting: format!("Hello {display_name}"),
            display_name,
            has_avatar: profile.has_avatar(),
            featured_message: featured.message,
            shelves: vec![
                Shelf {
                    title: "featured".to_string(),
                    playlists: featured.playlists,
                },
                Shelf {
                    title: "top playlists".to_string(),
                    playlists: top,
                },
            ],
        }
    }
}

/// One line of the track table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackRow {
    /// 1-based position among the previewable tracks
    pub number: usize,
    pub track_id: TrackId,
    pub title: String,
    pub artists: String,
    pub album: String,
    /// m:ss
    pub duration: String,
    pub image_url: Option<String>,
}

impl TrackRow {
    pub fn new(number: usize, track: &Track) -> Self {
        Self {
            number,
            track_id: track.id.clone(),
            title: track.name.clone(),
            artists: track.artists_display(),
            album: track.album.clone(),
            duration: format_track_duration(track.duration_ms),
            image_url: track.image.as_ref().map(|image| image.url.clone()),
        }
    }
}

/// Playlist section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistView {
    pub id: PlaylistId,
    pub name: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    /// "N songs"
    pub song_count: String,
    pub rows: Vec<TrackRow>,
    /// Previewable tracks in row order, for the track store
    pub tracks: Vec<Track>,
}

impl From<Playlist> for PlaylistView {
    fn from(playlist: Playlist) -> Self {
        let rows = playlist
            .tracks
            .iter()
            .enumerate()
            .map(|(i, track)| TrackRow::new(i + 1, track))
            .collect();

        let summary = playlist.summary;
        Self {
            id: summary.id,
            name: summary.name,
            description: summary.description,
            cover_url: summary.image.map(|image| image.url),
            song_count: format!("{} songs", playlist.total_tracks),
            rows,
            tracks: playlist.tracks,
        }
    }
}

/// What a loaded section renders
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum SectionView {
    Dashboard(DashboardView),
    Playlist(PlaylistView),
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{Image, PlaylistSummary};

    fn summary(id: &str) -> PlaylistSummary {
        PlaylistSummary {
            id: PlaylistId::new(id),
            name: format!("Playlist {id}"),
            description: None,
            image: Some(Image::new(format!("https://i.scdn.co/{id}"))),
        }
    }

    #[test]
    fn dashboard_greets_by_display_name() {
        let profile = UserProfile {
            id: "wizzler".into(),
            display_name: Some("Wiz".into()),
            images: vec![],
        };
        let view = DashboardView::new(
            &profile,
            FeaturedPlaylists {
                message: Some("Editor's picks".into()),
                playlists: vec![summary("f1")],
            },
            vec![summary("t1"), summary("t2")],
        );

        assert_eq!(view.greeting, "Hello Wiz");
        assert!(!view.has_avatar);
        assert_eq!(view.shelves[0].title, "featured");
        assert_eq!(view.shelves[1].playlists.len(), 2);
    }

    #[test]
    fn playlist_rows_are_numbered_and_formatted() {
        let playlist = Playlist {
            summary: summary("p1"),
            total_tracks: 5,
            tracks: vec![
                Track::new("a", "Alpha")
                    .with_artists(["X", "Y"])
                    .with_album("First")
                    .with_duration_ms(213_573)
                    .with_preview_url("https://p.scdn.co/a"),
                Track::new("b", "Beta")
                    .with_duration_ms(29_500)
                    .with_preview_url("https://p.scdn.co/b"),
            ],
        };

        let view = PlaylistView::from(playlist);
        assert_eq!(view.song_count, "5 songs");
        assert_eq!(view.cover_url.as_deref(), Some("https://i.scdn.co/p1"));
        assert_eq!(view.rows[0].number, 1);
        assert_eq!(view.rows[0].artists, "X, Y");
        assert_eq!(view.rows[0].duration, "3:34");
        assert_eq!(view.rows[1].number, 2);
        assert_eq!(view.rows[1].duration, "0:30");
        assert_eq!(view.tracks.len(), 2);
    }
}
