//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core expects from infrastructure. They
//! contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - Engine ports report asynchronously through handles, never by blocking
//! - Emitters never block the caller
//! - One engine instance per playback controller (injected, never global)

pub mod event_emitter;
pub mod speech_engine;
pub mod translator;

use thiserror::Error;

pub use event_emitter::{ChannelPlaybackEmitter, NoopPlaybackEmitter, PlaybackEventEmitter};
pub use speech_engine::{
    EngineError, EngineEvent, EngineEventKind, EngineEventReceiver, EngineEventSender,
    SpeechEngine, Utterance, UtteranceEvents, UtteranceId,
};
pub use translator::{TranslationError, Translator};

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (CLI exit codes, UI
/// messages).
#[derive(Debug, Error)]
pub enum CoreError {
    /// A sentence batch failed validation.
    #[error(transparent)]
    Batch(#[from] crate::batch::BatchError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    /// Speech engine error.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Translation lookup failed.
    #[error(transparent)]
    Translation(#[from] TranslationError),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}
