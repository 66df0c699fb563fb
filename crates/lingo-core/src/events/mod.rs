//! Canonical playback event union.
//!
//! Presenters subscribe to these instead of polling the controller.
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag:
//!
//! ```json
//! { "type": "word_changed", "sentenceId": "sentence-2", "wordIndex": 3 }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::SentenceId;

/// How a batch was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    /// A single sentence via the per-row play trigger.
    Single,
    /// The whole list, queued back-to-back.
    Queue,
}

/// Events emitted by the playback controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackEvent {
    /// A batch was submitted to the engine.
    PlaybackStarted {
        /// Single sentence or whole list.
        mode: PlaybackMode,
        /// Number of utterances submitted.
        #[serde(rename = "sentenceCount")]
        sentence_count: usize,
    },

    /// The engine began speaking a sentence.
    SentenceStarted {
        #[serde(rename = "sentenceId")]
        sentence_id: SentenceId,
    },

    /// The highlighted word moved.
    WordChanged {
        #[serde(rename = "sentenceId")]
        sentence_id: SentenceId,
        /// Index into the sentence's word spans.
        #[serde(rename = "wordIndex")]
        word_index: usize,
    },

    /// The engine finished speaking a sentence.
    SentenceFinished {
        #[serde(rename = "sentenceId")]
        sentence_id: SentenceId,
    },

    /// Output was paused.
    Paused,

    /// Output was resumed.
    Resumed,

    /// Playback was stopped by the user before it finished.
    Stopped,

    /// The last sentence of the batch finished; the controller is idle.
    PlaybackFinished,

    /// The engine reported a failure; the controller is idle.
    EngineFailed {
        /// Engine-provided description.
        reason: String,
    },

    /// An engine event from a cancelled batch arrived and was ignored.
    StaleEventDropped {
        /// Lease of the batch the event belonged to.
        lease: u64,
    },
}

impl PlaybackEvent {
    /// Whether this event leaves the controller idle.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Stopped | Self::PlaybackFinished | Self::EngineFailed { .. }
        )
    }
}
