//! Error types for playback sequencing

use thiserror::Error;

/// Sequencer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequencerError {
    /// Explicit index does not point into the playlist
    #[error("Index {index} out of range for playlist of {len} tracks")]
    OutOfRange { index: usize, len: usize },

    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for sequencer operations
pub type Result<T> = std::result::Result<T, SequencerError>;
