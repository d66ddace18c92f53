//! Ordered track list
//!
//! Insertion order is playback order when shuffle is off. The playlist is
//! built and edited by the caller; the sequencer only reads it and keeps a
//! position into it.

use crate::types::{Track, TrackId};
use serde::{Deserialize, Serialize};

/// Ordered sequence of tracks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Create an empty playlist
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Track at `index`, if any
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All tracks in playback order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// Index of the first track with the given ID
    ///
    /// Used to turn a track-list row click into an explicit selection.
    pub fn position(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|track| &track.id == id)
    }

    /// Append a track at the end
    pub fn push(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Remove the track at `index`, shifting later tracks down
    pub fn remove(&mut self, index: usize) -> Option<Track> {
        if index < self.tracks.len() {
            Some(self.tracks.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}

impl From<Vec<Track>> for Playlist {
    fn from(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }
}

impl FromIterator<Track> for Playlist {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        Self {
            tracks: iter.into_iter().collect(),
        }
    }
}

impl Extend<Track> for Playlist {
    fn extend<I: IntoIterator<Item = Track>>(&mut self, iter: I) {
        self.tracks.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn create_test_track(id: &str) -> Track {
        Track {
            id: TrackId::new(id),
            title: format!("Track {}", id),
            artist: "Test Artist".to_string(),
            album: Some("Test Album".to_string()),
            artwork: None,
            source: format!("/audio/{}.mp3", id),
            duration: Duration::from_secs(180),
        }
    }

    #[test]
    fn keeps_insertion_order() {
        let playlist: Playlist = ["a", "b", "c"].into_iter().map(create_test_track).collect();

        let ids: Vec<&str> = playlist.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(playlist.len(), 3);
    }

    #[test]
    fn position_finds_first_match() {
        let mut playlist = Playlist::new();
        playlist.push(create_test_track("a"));
        playlist.push(create_test_track("b"));
        playlist.push(create_test_track("b"));

        assert_eq!(playlist.position(&TrackId::new("b")), Some(1));
        assert_eq!(playlist.position(&TrackId::new("z")), None);
    }

    #[test]
    fn remove_shifts_later_tracks() {
        let mut playlist = Playlist::from(vec![
            create_test_track("a"),
            create_test_track("b"),
            create_test_track("c"),
        ]);

        let removed = playlist.remove(1).unwrap();
        assert_eq!(removed.id.as_str(), "b");
        assert_eq!(playlist.get(1).unwrap().id.as_str(), "c");
        assert!(playlist.remove(5).is_none());
    }

    #[test]
    fn extend_and_clear() {
        let mut playlist = Playlist::new();
        assert!(playlist.is_empty());

        playlist.extend(vec![create_test_track("a"), create_test_track("b")]);
        assert_eq!(playlist.len(), 2);

        playlist.clear();
        assert!(playlist.is_empty());
    }
}
