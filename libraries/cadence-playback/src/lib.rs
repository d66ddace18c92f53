//! Cadence - Playback Sequencing
//!
//! Platform-agnostic track navigation for the Cadence player.
//!
//! This crate provides:
//! - Playlist position tracking (explicit selection, next/previous)
//! - Shuffle (random pick, never the current track twice in a row)
//! - Repeat modes (None, All, One)
//! - End-of-track handling driven by the audio engine
//! - Events for keeping several player surfaces in sync
//! - Visualizer sampling from a frequency analyser
//!
//! # Architecture
//!
//! `cadence-playback` knows nothing about how audio is produced. The host
//! implements [`AudioEngine`] (a browser media element, a CPAL stream, a
//! mobile bridge) and injects it into one [`PlaybackSequencer`] that every
//! player surface shares.
//!
//! # Example: Basic Navigation
//!
//! ```rust
//! use cadence_playback::{AudioEngine, PlaybackSequencer, Playlist, Track, TrackId};
//! use std::time::Duration;
//!
//! #[derive(Default)]
//! struct PrintEngine;
//!
//! impl AudioEngine for PrintEngine {
//!     fn load_and_play(&mut self, track: &Track) {
//!         println!("now playing {}", track.title);
//!     }
//! }
//!
//! let track = |id: &str| Track {
//!     id: TrackId::new(id),
//!     title: format!("Song {id}"),
//!     artist: "Artist Name".to_string(),
//!     album: None,
//!     artwork: None,
//!     source: format!("/audio/{id}.mp3"),
//!     duration: Duration::from_secs(180),
//! };
//!
//! let mut sequencer = PlaybackSequencer::new(PrintEngine);
//! sequencer.load_playlist(vec![track("a"), track("b")]);
//!
//! sequencer.select_track(0).unwrap();
//! sequencer.next();
//! assert_eq!(sequencer.current_index(), Some(1));
//!
//! // End of the playlist with repeat off: nothing more to play
//! assert!(!sequencer.has_next());
//! ```
//!
//! # Example: Shuffle and Repeat
//!
//! ```rust
//! use cadence_playback::{AudioEngine, PlaybackSequencer, RepeatMode, Track};
//!
//! struct SilentEngine;
//!
//! impl AudioEngine for SilentEngine {
//!     fn load_and_play(&mut self, _track: &Track) {}
//! }
//!
//! let mut sequencer = PlaybackSequencer::new(SilentEngine);
//!
//! sequencer.toggle_shuffle();
//! assert_eq!(sequencer.cycle_repeat(), RepeatMode::All);
//! assert_eq!(sequencer.cycle_repeat(), RepeatMode::One);
//! ```

mod engine;
mod error;
mod events;
mod playlist;
mod sequencer;
mod settings;
mod shuffle;
pub mod types;
pub mod visualizer;

// Public exports
pub use engine::AudioEngine;
pub use error::{Result, SequencerError};
pub use events::SequencerEvent;
pub use playlist::Playlist;
pub use sequencer::PlaybackSequencer;
pub use settings::{SequencerConfig, DEFAULT_RESTART_THRESHOLD_MS, ENV_PREFIX};
pub use types::{
    Advance, Direction, RepeatMode, SequencerSnapshot, SequencerStatus, Track, TrackId, Trigger,
};
pub use visualizer::{AmplitudeSnapshot, FrequencyAnalyser, Snapshots, VisualizerSampler};
