//! Core types for playback sequencing

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Track identifier
///
/// The only part of a [`Track`] the sequencer interprets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create a new track ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A playable track
///
/// Everything except `id` is payload for the audio engine and the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name (optional)
    pub album: Option<String>,

    /// Cover art reference (optional)
    pub artwork: Option<String>,

    /// Locator handed to the audio engine (URL or path)
    pub source: String,

    /// Track duration
    pub duration: Duration,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when the playlist ends
    #[default]
    None,

    /// Wrap around at either end
    All,

    /// Replay the current track when it finishes naturally
    One,
}

impl RepeatMode {
    /// Next mode in the `None -> All -> One -> None` cycle
    pub fn cycled(self) -> Self {
        match self {
            RepeatMode::None => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::None,
        }
    }
}

/// Direction of a manual skip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

/// What caused an advance request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    /// User pressed next/previous
    Manual(Direction),

    /// The audio engine reported that the current track finished
    EndOfTrack,
}

impl Trigger {
    /// Direction the trigger moves in. End of track always moves forward.
    pub fn direction(self) -> Direction {
        match self {
            Trigger::Manual(direction) => direction,
            Trigger::EndOfTrack => Direction::Forward,
        }
    }
}

/// Outcome of an advance request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advance {
    /// The track at this index was selected and handed to the engine
    Selected(usize),

    /// The current track was restarted from the beginning
    Restarted(usize),

    /// No legal move; state unchanged, engine not signalled
    NoMovement,
}

impl Advance {
    /// Index that is now playing, if the request moved anything
    pub fn index(self) -> Option<usize> {
        match self {
            Advance::Selected(index) | Advance::Restarted(index) => Some(index),
            Advance::NoMovement => None,
        }
    }

    pub fn is_movement(self) -> bool {
        self != Advance::NoMovement
    }
}

/// Coarse sequencer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequencerStatus {
    /// No track selected (playlist may still hold tracks)
    Empty,

    /// A track is selected
    Loaded,
}

/// Read-only view of the sequencer for player surfaces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencerSnapshot {
    pub current_index: Option<usize>,
    pub current_track_id: Option<TrackId>,
    pub length: usize,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub can_go_next: bool,
    pub can_go_previous: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_cycles_none_all_one() {
        assert_eq!(RepeatMode::None.cycled(), RepeatMode::All);
        assert_eq!(RepeatMode::All.cycled(), RepeatMode::One);
        assert_eq!(RepeatMode::One.cycled(), RepeatMode::None);
        assert_eq!(RepeatMode::default(), RepeatMode::None);
    }

    #[test]
    fn end_of_track_moves_forward() {
        assert_eq!(Trigger::EndOfTrack.direction(), Direction::Forward);
        assert_eq!(
            Trigger::Manual(Direction::Backward).direction(),
            Direction::Backward
        );
    }

    #[test]
    fn advance_index() {
        assert_eq!(Advance::Selected(2).index(), Some(2));
        assert_eq!(Advance::Restarted(0).index(), Some(0));
        assert_eq!(Advance::NoMovement.index(), None);
        assert!(!Advance::NoMovement.is_movement());
    }

    #[test]
    fn repeat_mode_serializes_lowercase() {
        let json = serde_json::to_string(&RepeatMode::All).unwrap();
        assert_eq!(json, "\"all\"");

        let mode: RepeatMode = serde_json::from_str("\"one\"").unwrap();
        assert_eq!(mode, RepeatMode::One);
    }

    #[test]
    fn track_id_is_transparent() {
        let id = TrackId::new("track1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"track1\"");
        assert_eq!(id.to_string(), "track1");
    }
}
