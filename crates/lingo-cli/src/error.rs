//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from core and playback errors to exit codes.

use lingo_core::CoreError;
use lingo_speech::PlaybackError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Argument error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Input data rejected (malformed batch, request or glossary).
    #[error("Invalid input: {0}")]
    Data(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Speech engine or playback error.
    #[error("Playback error: {0}")]
    Playback(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where one fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2,
            Self::Data(_) => 65,     // EX_DATAERR
            Self::Playback(_) => 69, // EX_UNAVAILABLE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Batch(batch_err) => Self::Data(batch_err.to_string()),
            CoreError::Settings(settings_err) => Self::Config(settings_err.to_string()),
            CoreError::Engine(engine_err) => Self::Playback(engine_err.to_string()),
            CoreError::Translation(e) => Self::Core(format!("Translation: {e}")),
            CoreError::Validation(msg) => Self::Arguments(msg),
            CoreError::Internal(msg) => Self::Core(msg),
        }
    }
}

impl From<PlaybackError> for CliError {
    fn from(err: PlaybackError) -> Self {
        match err {
            PlaybackError::EmptyBatch => Self::Data(err.to_string()),
            PlaybackError::Busy | PlaybackError::Engine(_) => Self::Playback(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_core::{BatchError, EngineError, SettingsError};

    #[test]
    fn batch_errors_are_data_errors() {
        let err: CliError = CoreError::from(BatchError::NotAnObject { index: 3 }).into();
        assert!(matches!(err, CliError::Data(_)));
        assert_eq!(err.exit_code(), 65);
    }

    #[test]
    fn settings_errors_are_config_errors() {
        let err: CliError = CoreError::from(SettingsError::InvalidWordsPerMinute(1)).into();
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn playback_errors_map() {
        assert_eq!(CliError::from(PlaybackError::EmptyBatch).exit_code(), 65);
        let err = CliError::from(PlaybackError::Engine(EngineError::Closed));
        assert_eq!(err.exit_code(), 69);
        assert!(err.to_string().contains("not running"));
    }
}
