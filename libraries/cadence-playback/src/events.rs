//! Sequencer Events
//!
//! Event-based communication so every player surface (mini player, full
//! screen player, track list) can follow one shared sequencer.
//! Events are queued on each state change and drained by the host.

use crate::types::{RepeatMode, TrackId};
use serde::{Deserialize, Serialize};

/// Events emitted by the sequencer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequencerEvent {
    /// A track was selected and handed to the audio engine
    ///
    /// Also emitted when repeat-one replays the same index.
    TrackChanged {
        /// Index of the new current track
        index: usize,
        /// ID of the new current track
        track_id: TrackId,
        /// Index that was current before (if any)
        previous_index: Option<usize>,
    },

    /// The current track was restarted from the beginning
    TrackRestarted {
        index: usize,
        track_id: TrackId,
    },

    /// Track ended and there is nothing left to play
    PlaybackFinished,

    /// Playlist was replaced or edited
    PlaylistChanged {
        /// New playlist length
        length: usize,
    },

    /// The selected track was removed; nothing is selected now
    SelectionCleared,

    /// Shuffle flag changed
    ShuffleChanged { enabled: bool },

    /// Repeat mode changed
    RepeatChanged { mode: RepeatMode },

    /// The audio engine reported that playback failed
    PlaybackFailed {
        /// Track that was selected when the failure arrived
        track_id: Option<TrackId>,
        /// Error message from the engine
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serialization_roundtrip() {
        let event = SequencerEvent::TrackChanged {
            index: 2,
            track_id: TrackId::new("track-3"),
            previous_index: Some(1),
        };

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: SequencerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, event);
    }

    #[test]
    fn repeat_change_uses_lowercase_mode() {
        let event = SequencerEvent::RepeatChanged {
            mode: RepeatMode::One,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"one\""));
    }
}
