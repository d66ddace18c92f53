//! Playback sequencer
//!
//! Owns the playlist, the current position and the playback modes, and
//! decides which track plays next on a manual skip or when a track ends.
//!
//! Transition rules:
//!
//! | repeat   | trigger          | shuffle | next index                          |
//! |----------|------------------|---------|-------------------------------------|
//! | One      | end of track     | any     | same index (replay)                 |
//! | One      | manual           | any     | as None                             |
//! | None/All | any              | on      | random, distinct from current       |
//! | None     | forward          | off     | `current + 1`, or no movement at end|
//! | All      | forward          | off     | `(current + 1) mod len`             |
//! | None     | backward         | off     | `current - 1`, or no movement at 0  |
//! | All      | backward         | off     | `(current - 1 + len) mod len`       |

use crate::engine::AudioEngine;
use crate::error::{Result, SequencerError};
use crate::events::SequencerEvent;
use crate::playlist::Playlist;
use crate::settings::SequencerConfig;
use crate::shuffle;
use crate::types::{
    Advance, Direction, RepeatMode, SequencerSnapshot, SequencerStatus, Track, Trigger,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Where an advance request leads, before any randomness is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    To(usize),
    Shuffle,
    Hold,
}

/// Track navigation and playback-mode state for one player surface
///
/// The audio engine is injected at construction; every surface that needs
/// navigation holds a reference to the same sequencer instead of keeping
/// its own copy of the rules.
pub struct PlaybackSequencer<E: AudioEngine> {
    playlist: Playlist,
    current: Option<usize>,

    // Slot of a removed current track; the engine is still playing it
    resume_at: Option<usize>,

    // Modes
    shuffle: bool,
    repeat: RepeatMode,
    restart_threshold: Option<Duration>,

    engine: E,
    rng: StdRng,

    // Event queue for UI synchronization
    pending_events: Vec<SequencerEvent>,
}

impl<E: AudioEngine> PlaybackSequencer<E> {
    /// Create a sequencer with default configuration
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, &SequencerConfig::default())
    }

    /// Create a sequencer from configuration
    pub fn with_config(engine: E, config: &SequencerConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        Self {
            playlist: Playlist::new(),
            current: None,
            resume_at: None,
            shuffle: config.shuffle,
            repeat: config.repeat,
            restart_threshold: config.restart_threshold(),
            engine,
            rng,
            pending_events: Vec::new(),
        }
    }

    // ===== Playlist =====

    /// Replace the playlist
    ///
    /// Clears the selection; a subsequent [`select_track`](Self::select_track)
    /// or advance picks the first track to play.
    pub fn load_playlist(&mut self, playlist: impl Into<Playlist>) {
        self.playlist = playlist.into();
        self.resume_at = None;
        if self.current.take().is_some() {
            self.pending_events.push(SequencerEvent::SelectionCleared);
        }

        debug!("Loaded playlist with {} tracks", self.playlist.len());
        self.emit_playlist_changed();
    }

    /// Append tracks to the end of the playlist
    ///
    /// The current selection is unaffected.
    pub fn append_tracks(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.playlist.extend(tracks);
        self.emit_playlist_changed();
    }

    /// Remove the track at `index`
    ///
    /// Removing the current track clears the selection; the next forward
    /// move (skip or end of track) continues with the track that took its
    /// place. Removing an earlier track keeps the same track selected at
    /// its shifted index.
    pub fn remove_track(&mut self, index: usize) -> Result<Track> {
        let len = self.playlist.len();
        let removed = self
            .playlist
            .remove(index)
            .ok_or(SequencerError::OutOfRange { index, len })?;

        match self.current {
            Some(current) if current == index => {
                debug!("Removed current track {}", removed.id);
                self.current = None;
                self.resume_at = Some(index);
                self.pending_events.push(SequencerEvent::SelectionCleared);
            }
            Some(current) if index < current => {
                self.current = Some(current - 1);
            }
            None => {
                if let Some(slot) = self.resume_at.filter(|&slot| index < slot) {
                    self.resume_at = Some(slot - 1);
                }
            }
            _ => {}
        }

        self.emit_playlist_changed();
        Ok(removed)
    }

    /// Remove every track and clear the selection
    pub fn clear_playlist(&mut self) {
        self.playlist.clear();
        self.resume_at = None;
        if self.current.take().is_some() {
            self.pending_events.push(SequencerEvent::SelectionCleared);
        }
        self.emit_playlist_changed();
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    // ===== Navigation =====

    /// Select the track at `index` and hand it to the audio engine
    ///
    /// Out-of-range indices are a caller bug and are never clamped.
    pub fn select_track(&mut self, index: usize) -> Result<()> {
        let len = self.playlist.len();
        let Some(track) = self.playlist.get(index) else {
            return Err(SequencerError::OutOfRange { index, len });
        };

        let previous_index = self.current.replace(index);
        self.resume_at = None;
        debug!("Selected track {} ({}) at index {}", track.title, track.id, index);

        self.engine.load_and_play(track);
        self.pending_events.push(SequencerEvent::TrackChanged {
            index,
            track_id: track.id.clone(),
            previous_index,
        });

        Ok(())
    }

    /// Move the playback position
    ///
    /// Applies the transition table. When there is no legal move, state is
    /// left untouched and the engine is not signalled; after a natural end of
    /// track that means playback stops.
    pub fn advance(&mut self, trigger: Trigger) -> Advance {
        let target = match self.plan(trigger) {
            Step::To(index) => index,
            Step::Shuffle => shuffle::pick_index(&mut self.rng, self.playlist.len(), self.current),
            Step::Hold => {
                if trigger == Trigger::EndOfTrack {
                    info!("Reached end of playlist, stopping");
                    self.pending_events.push(SequencerEvent::PlaybackFinished);
                } else {
                    debug!("No track to move to for {:?}", trigger);
                }
                return Advance::NoMovement;
            }
        };

        let selected = self.select_track(target);
        debug_assert!(selected.is_ok(), "planned target {target} out of range");

        match selected {
            Ok(()) => Advance::Selected(target),
            Err(e) => {
                warn!("Advance produced an invalid target: {}", e);
                Advance::NoMovement
            }
        }
    }

    /// Skip to the next track
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Advance {
        self.advance(Trigger::Manual(Direction::Forward))
    }

    /// Skip to the previous track
    pub fn previous(&mut self) -> Advance {
        self.advance(Trigger::Manual(Direction::Backward))
    }

    /// "Previous" button aware of the playback position
    ///
    /// If more than the restart threshold has played, restarts the current
    /// track instead of moving back.
    pub fn previous_at(&mut self, elapsed: Duration) -> Advance {
        if let (Some(threshold), Some(index)) = (self.restart_threshold, self.current) {
            if elapsed > threshold {
                if let Some(track) = self.playlist.get(index) {
                    debug!("Restarting {} after {:?}", track.id, elapsed);
                    self.engine.restart(track);
                    self.pending_events.push(SequencerEvent::TrackRestarted {
                        index,
                        track_id: track.id.clone(),
                    });
                    return Advance::Restarted(index);
                }
            }
        }

        self.previous()
    }

    /// The audio engine finished the current track
    pub fn on_ended(&mut self) -> Advance {
        self.advance(Trigger::EndOfTrack)
    }

    /// The audio engine failed to play the selected track
    ///
    /// Reported asynchronously by the engine; navigation state is unchanged.
    pub fn on_playback_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        let track_id = self.current_track().map(|track| track.id.clone());

        warn!("Playback failed for {:?}: {}", track_id, message);
        self.pending_events
            .push(SequencerEvent::PlaybackFailed { track_id, message });
    }

    /// Whether a manual skip in `direction` would move
    ///
    /// Used to enable or disable next/previous controls.
    pub fn can_advance(&self, direction: Direction) -> bool {
        self.plan(Trigger::Manual(direction)) != Step::Hold
    }

    pub fn has_next(&self) -> bool {
        self.can_advance(Direction::Forward)
    }

    pub fn has_previous(&self) -> bool {
        self.can_advance(Direction::Backward)
    }

    fn plan(&self, trigger: Trigger) -> Step {
        let len = self.playlist.len();
        if len == 0 {
            return Step::Hold;
        }

        if trigger == Trigger::EndOfTrack && self.repeat == RepeatMode::One {
            match (self.current, self.resume_at) {
                (Some(current), _) => return Step::To(current),
                (None, None) => return Step::Hold,
                // Replayed track is gone; carry on as repeat off
                (None, Some(_)) => {}
            }
        }

        if self.shuffle {
            return Step::Shuffle;
        }

        // Repeat-one only affects natural end of track
        let wrap = self.repeat == RepeatMode::All;

        // Neighbouring slots of the current position
        let (ahead, behind) = match (self.current, self.resume_at) {
            (Some(current), _) => (current + 1, current.checked_sub(1)),
            (None, Some(slot)) => (slot, slot.checked_sub(1)),
            (None, None) => (0, None),
        };

        match (trigger.direction(), behind) {
            (Direction::Forward, _) if ahead < len => Step::To(ahead),
            (Direction::Forward, _) if wrap => Step::To(0),
            (Direction::Backward, Some(behind)) => Step::To(behind),
            (Direction::Backward, None) if wrap => Step::To(len - 1),
            _ => Step::Hold,
        }
    }

    // ===== Shuffle & Repeat =====

    /// Flip shuffle, returning the new value
    pub fn toggle_shuffle(&mut self) -> bool {
        self.set_shuffle(!self.shuffle);
        self.shuffle
    }

    pub fn set_shuffle(&mut self, enabled: bool) {
        if self.shuffle == enabled {
            return;
        }

        self.shuffle = enabled;
        debug!("Shuffle {}", if enabled { "on" } else { "off" });
        self.pending_events
            .push(SequencerEvent::ShuffleChanged { enabled });
    }

    pub fn is_shuffle_enabled(&self) -> bool {
        self.shuffle
    }

    /// Step repeat through `None -> All -> One -> None`, returning the new mode
    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.set_repeat(self.repeat.cycled());
        self.repeat
    }

    pub fn set_repeat(&mut self, mode: RepeatMode) {
        if self.repeat == mode {
            return;
        }

        self.repeat = mode;
        debug!("Repeat mode {:?}", mode);
        self.pending_events
            .push(SequencerEvent::RepeatChanged { mode });
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    // ===== State Queries =====

    /// Index of the selected track
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|index| self.playlist.get(index))
    }

    pub fn status(&self) -> SequencerStatus {
        if self.current.is_some() {
            SequencerStatus::Loaded
        } else {
            SequencerStatus::Empty
        }
    }

    /// Serializable view for player surfaces
    pub fn snapshot(&self) -> SequencerSnapshot {
        SequencerSnapshot {
            current_index: self.current,
            current_track_id: self.current_track().map(|track| track.id.clone()),
            length: self.playlist.len(),
            shuffle: self.shuffle,
            repeat: self.repeat,
            can_go_next: self.has_next(),
            can_go_previous: self.has_previous(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    // ===== Events =====

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<SequencerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn emit_playlist_changed(&mut self) {
        self.pending_events.push(SequencerEvent::PlaylistChanged {
            length: self.playlist.len(),
        });
    }
}

impl<E: AudioEngine + Default> Default for PlaybackSequencer<E> {
    fn default() -> Self {
        Self::new(E::default())
    }
}
