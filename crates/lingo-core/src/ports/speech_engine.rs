//! Speech engine port: a narrow interface over an asynchronous TTS engine.
//!
//! # Design Rules
//!
//! - `speak` only enqueues; it never waits for audio.
//! - Everything the engine reports about an utterance flows through the
//!   [`UtteranceEvents`] handle it was given, tagged with the utterance id.
//! - After `cancel_all` the engine must not report anything further for
//!   previously enqueued utterances. Consumers still tolerate late events
//!   by comparing the batch lease carried in [`UtteranceId`].

use std::fmt;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::LanguageCode;

/// Identifies one utterance: the batch lease it was submitted under and its
/// position in that batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtteranceId {
    /// Lease of the submitting batch. A new lease is taken for every batch.
    pub lease: u64,
    /// 0-based index within the batch.
    pub index: usize,
}

impl UtteranceId {
    /// Create an utterance id.
    pub const fn new(lease: u64, index: usize) -> Self {
        Self { lease, index }
    }
}

impl fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.lease, self.index)
    }
}

/// Text handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    /// Identity used to tag every reported event.
    pub id: UtteranceId,
    /// Text to speak.
    pub text: String,
    /// Language tag for voice selection.
    pub language: LanguageCode,
}

/// What the engine reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEventKind {
    /// Audible output for the utterance began.
    Started,
    /// A word boundary was reached at this character offset.
    Progress { char_offset: usize },
    /// The utterance finished naturally.
    Ended,
    /// The engine could not speak the utterance.
    Failed { reason: String },
}

/// An event reported by the engine for one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineEvent {
    /// Utterance the event belongs to.
    pub utterance: UtteranceId,
    /// Event payload.
    pub kind: EngineEventKind,
}

/// Sending half used by [`UtteranceEvents`].
pub type EngineEventSender = mpsc::UnboundedSender<EngineEvent>;

/// Receiving half drained by the playback controller.
pub type EngineEventReceiver = mpsc::UnboundedReceiver<EngineEvent>;

/// Per-utterance callback handle given to the engine with each `speak`.
///
/// Reporting is fire-and-forget: if the consumer has gone away the event
/// is discarded.
#[derive(Debug, Clone)]
pub struct UtteranceEvents {
    id: UtteranceId,
    tx: EngineEventSender,
}

impl UtteranceEvents {
    /// Create a handle reporting into `tx` for utterance `id`.
    pub const fn new(id: UtteranceId, tx: EngineEventSender) -> Self {
        Self { id, tx }
    }

    /// The utterance this handle reports for.
    pub const fn id(&self) -> UtteranceId {
        self.id
    }

    /// Report that audible output began.
    pub fn started(&self) {
        self.send(EngineEventKind::Started);
    }

    /// Report a word boundary at `char_offset`.
    pub fn progress(&self, char_offset: usize) {
        self.send(EngineEventKind::Progress { char_offset });
    }

    /// Report natural completion.
    pub fn ended(&self) {
        self.send(EngineEventKind::Ended);
    }

    /// Report a failure.
    pub fn failed(&self, reason: impl Into<String>) {
        self.send(EngineEventKind::Failed {
            reason: reason.into(),
        });
    }

    fn send(&self, kind: EngineEventKind) {
        let event = EngineEvent {
            utterance: self.id,
            kind,
        };
        if self.tx.send(event).is_err() {
            tracing::trace!(utterance = %self.id, "Engine event receiver dropped");
        }
    }
}

/// Errors returned synchronously by engine commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The engine refused the utterance (unsupported language, bad text).
    #[error("Engine rejected utterance: {0}")]
    Rejected(String),

    /// The engine is no longer running.
    #[error("Speech engine is not running")]
    Closed,
}

/// Port trait for the speech synthesis engine.
///
/// One engine instance is injected into one playback controller. The engine
/// serialises utterances in submission order; `cancel_all` affects every
/// utterance submitted so far, whichever batch it came from.
pub trait SpeechEngine: Send {
    /// Enqueue an utterance. Returns as soon as it is queued.
    fn speak(&mut self, utterance: Utterance, events: UtteranceEvents)
    -> Result<(), EngineError>;

    /// Flush the in-flight and all queued utterances.
    fn cancel_all(&mut self);

    /// Suspend audible output (best effort).
    fn pause(&mut self);

    /// Continue output without re-speaking already spoken content.
    fn resume(&mut self);
}

impl<E: SpeechEngine + ?Sized> SpeechEngine for Box<E> {
    fn speak(
        &mut self,
        utterance: Utterance,
        events: UtteranceEvents,
    ) -> Result<(), EngineError> {
        (**self).speak(utterance, events)
    }

    fn cancel_all(&mut self) {
        (**self).cancel_all();
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn resume(&mut self) {
        (**self).resume();
    }
}
