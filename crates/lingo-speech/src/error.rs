//! Playback error types.

use lingo_core::EngineError;

/// Errors returned by playback commands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    /// A sentence or batch is already playing.
    #[error("Playback is already active")]
    Busy,

    /// `play_all` was called with no sentences.
    #[error("Cannot play an empty batch")]
    EmptyBatch,

    /// The engine refused an utterance; playback was reset.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
