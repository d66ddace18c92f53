//! Audio engine trait
//!
//! Platform-specific playback (browser media element, CPAL output, mobile
//! bridge) implements this trait. The sequencer only tells it what to play.

use crate::types::Track;

/// Audio engine driven by the sequencer
///
/// Calls are fire-and-forget: the sequencer does not wait for playback to
/// start. A later failure is reported back through
/// [`PlaybackSequencer::on_playback_error`](crate::PlaybackSequencer::on_playback_error),
/// and natural completion through
/// [`PlaybackSequencer::on_ended`](crate::PlaybackSequencer::on_ended).
pub trait AudioEngine {
    /// Load the track's source and start playing it
    fn load_and_play(&mut self, track: &Track);

    /// Play the already loaded track again from the beginning
    ///
    /// Engines that can seek should override this; the default reloads.
    fn restart(&mut self, track: &Track) {
        self.load_and_play(track);
    }
}

impl<E: AudioEngine + ?Sized> AudioEngine for &mut E {
    fn load_and_play(&mut self, track: &Track) {
        (**self).load_and_play(track);
    }

    fn restart(&mut self, track: &Track) {
        (**self).restart(track);
    }
}

impl<E: AudioEngine + ?Sized> AudioEngine for Box<E> {
    fn load_and_play(&mut self, track: &Track) {
        (**self).load_and_play(track);
    }

    fn restart(&mut self, track: &Track) {
        (**self).restart(track);
    }
}
