//! Navigation Controller
//!
//! Moves the player to the neighbouring track of the one loaded, by position
//! in the track list. There is no wraparound: the ends of the list are hard
//! stops, and a loaded track that is not in the list has no neighbours.

use crate::{error::Result, media::MediaElement, player::PlayerState};
use deck_core::{Track, TrackId};
use tracing::debug;

/// Index of `loaded` in `tracks`
pub fn current_index(tracks: &[Track], loaded: Option<&TrackId>) -> Option<usize> {
    let loaded = loaded?;
    tracks.iter().position(|track| &track.id == loaded)
}

/// Track after `loaded`, if any
pub fn next_of<'a>(tracks: &'a [Track], loaded: Option<&TrackId>) -> Option<&'a Track> {
    let index = current_index(tracks, loaded)?;
    tracks.get(index + 1)
}

/// Track before `loaded`, if any
pub fn previous_of<'a>(tracks: &'a [Track], loaded: Option<&TrackId>) -> Option<&'a Track> {
    let index = current_index(tracks, loaded)?;
    index.checked_sub(1).and_then(|i| tracks.get(i))
}

pub fn has_next(tracks: &[Track], loaded: Option<&TrackId>) -> bool {
    next_of(tracks, loaded).is_some()
}

pub fn has_previous(tracks: &[Track], loaded: Option<&TrackId>) -> bool {
    previous_of(tracks, loaded).is_some()
}

/// Load and play the track after the loaded one
///
/// Returns `false` (and leaves the player untouched) when there is none.
pub fn play_next<M: MediaElement>(player: &mut PlayerState<M>, tracks: &[Track]) -> Result<bool> {
    let Some(next) = next_of(tracks, player.loaded_track()) else {
        debug!("No next track");
        return Ok(false);
    };
    player.load_and_play(next)?;
    Ok(true)
}

/// Load and play the track before the loaded one
///
/// Returns `false` (and leaves the player untouched) when there is none.
pub fn play_previous<M: MediaElement>(
    player: &mut PlayerState<M>,
    tracks: &[Track],
) -> Result<bool> {
    let Some(previous) = previous_of(tracks, player.loaded_track()) else {
        debug!("No previous track");
        return Ok(false);
    };
    player.load_and_play(previous)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::FakeMedia;

    fn tracks(ids: &[&str]) -> Vec<Track> {
        ids.iter()
            .map(|id| Track::new(*id, *id).with_preview_url(format!("https://p.scdn.co/{id}")))
            .collect()
    }

    #[test]
    fn neighbours_by_position() {
        let list = tracks(&["a", "b", "c"]);
        let b = TrackId::new("b");

        assert_eq!(next_of(&list, Some(&b)).unwrap().id.as_str(), "c");
        assert_eq!(previous_of(&list, Some(&b)).unwrap().id.as_str(), "a");
    }

    #[test]
    fn ends_are_hard_stops() {
        let list = tracks(&["a", "b"]);
        assert!(!has_previous(&list, Some(&TrackId::new("a"))));
        assert!(!has_next(&list, Some(&TrackId::new("b"))));
    }

    #[test]
    fn nothing_loaded_has_no_neighbours() {
        let list = tracks(&["a", "b"]);
        assert!(next_of(&list, None).is_none());
        assert!(previous_of(&list, None).is_none());
    }

    #[test]
    fn play_next_moves_the_player() {
        let list = tracks(&["a", "b"]);
        let mut player = PlayerState::new(FakeMedia::default());
        player.load_and_play(&list[0]).unwrap();

        assert!(play_next(&mut player, &list).unwrap());
        assert_eq!(player.loaded_track(), Some(&TrackId::new("b")));

        assert!(!play_next(&mut player, &list).unwrap());
        assert_eq!(player.loaded_track(), Some(&TrackId::new("b")));

        assert!(play_previous(&mut player, &list).unwrap());
        assert_eq!(player.loaded_track(), Some(&TrackId::new("a")));
    }

    #[test]
    fn loaded_track_outside_list_is_a_no_op() {
        let list = tracks(&["1", "2"]);
        let mut player = PlayerState::new(FakeMedia::default());
        player.load_and_play(&tracks(&["3"])[0]).unwrap();
        player.drain_events();

        assert!(!play_next(&mut player, &list).unwrap());
        assert!(!play_previous(&mut player, &list).unwrap());
        assert_eq!(player.loaded_track(), Some(&TrackId::new("3")));
        assert!(!player.has_pending_events());
    }
}
