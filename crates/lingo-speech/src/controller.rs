//! Playback controller that sequences sentences through a speech engine.
//!
//! The controller is a state machine driven by two sources: user commands
//! (`play_sentence`, `play_all`, `stop`, `toggle_pause_resume`) and engine
//! events delivered through its own channel.
//!
//! ```text
//!   Idle ──play_sentence──▶ PlayingOne ──end──────────▶ Idle
//!   Idle ──play_all───────▶ PlayingAll ──end of last──▶ Idle
//! ```
//!
//! Commands run to completion without waiting on the engine. Engine events
//! are applied in arrival order by [`PlaybackController::handle_event`].
//!
//! # Leases
//!
//! Each batch is submitted under a fresh lease carried in every
//! [`UtteranceId`]. Events whose lease does not match the active batch are
//! dropped, which keeps a late `end` from a cancelled batch from touching
//! the batch that replaced it.

use std::sync::Arc;

use lingo_core::{
    EngineEvent, EngineEventKind, EngineEventReceiver, EngineEventSender, NO_WORD, PlaybackEvent,
    PlaybackEventEmitter, PlaybackMode, PlaybackState, Sentence, SpeechEngine, Utterance,
    UtteranceEvents, UtteranceId,
};
use tokio::sync::mpsc;

use crate::error::PlaybackError;
use crate::segment::{segment, word_index_at};

// ── Phase ──────────────────────────────────────────────────────────

/// Coarse controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// Nothing is playing.
    Idle,
    /// A single sentence is playing.
    PlayingOne,
    /// A whole list is playing.
    PlayingAll,
}

/// Invoked with each sentence whose end the engine reported.
pub type CompletionHook = Box<dyn FnMut(&Sentence) + Send + 'static>;

/// The batch currently submitted to the engine.
#[derive(Debug)]
struct ActiveBatch {
    lease: u64,
    mode: PlaybackMode,
    sentences: Vec<Sentence>,
    /// Index of the sentence the engine is speaking, once known.
    current: Option<usize>,
}

impl ActiveBatch {
    fn is_last(&self, index: usize) -> bool {
        match self.mode {
            PlaybackMode::Single => true,
            PlaybackMode::Queue => index + 1 == self.sentences.len(),
        }
    }
}

// ── Controller ─────────────────────────────────────────────────────

/// Owns the playback state for one rendered sentence list.
pub struct PlaybackController {
    engine: Box<dyn SpeechEngine>,
    emitter: Arc<dyn PlaybackEventEmitter>,
    state: PlaybackState,
    batch: Option<ActiveBatch>,
    next_lease: u64,
    events_tx: EngineEventSender,
    events_rx: EngineEventReceiver,
    on_complete: Option<CompletionHook>,
}

impl PlaybackController {
    /// Create an idle controller over `engine`.
    pub fn new(engine: Box<dyn SpeechEngine>, emitter: Arc<dyn PlaybackEventEmitter>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            engine,
            emitter,
            state: PlaybackState::idle(),
            batch: None,
            next_lease: 0,
            events_tx,
            events_rx,
            on_complete: None,
        }
    }

    /// Register a hook called with every completed sentence.
    #[must_use]
    pub fn with_completion_hook(mut self, hook: impl FnMut(&Sentence) + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    /// Replace or clear the completion hook.
    pub fn set_completion_hook(&mut self, hook: Option<CompletionHook>) {
        self.on_complete = hook;
    }

    /// The current playback state.
    #[must_use]
    pub const fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// A copy of the current playback state for presenters.
    #[must_use]
    pub fn snapshot(&self) -> PlaybackState {
        self.state.clone()
    }

    /// Coarse controller state.
    #[must_use]
    pub fn phase(&self) -> PlaybackPhase {
        match self.batch.as_ref().map(|b| b.mode) {
            None => PlaybackPhase::Idle,
            Some(PlaybackMode::Single) => PlaybackPhase::PlayingOne,
            Some(PlaybackMode::Queue) => PlaybackPhase::PlayingAll,
        }
    }

    /// Whether a batch is playing.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.batch.is_some()
    }

    // ── Commands ───────────────────────────────────────────────────

    /// Speak one sentence with word highlighting.
    ///
    /// Rejected with [`PlaybackError::Busy`] while anything is playing.
    pub fn play_sentence(&mut self, sentence: Sentence) -> Result<(), PlaybackError> {
        if self.is_active() {
            tracing::debug!(sentence = %sentence.id, "Rejecting play while busy");
            return Err(PlaybackError::Busy);
        }

        let lease = self.mint_lease();
        tracing::info!(sentence = %sentence.id, lease, "Playing sentence");

        self.activate(&sentence);
        let utterance = Self::utterance(lease, 0, &sentence);
        self.batch = Some(ActiveBatch {
            lease,
            mode: PlaybackMode::Single,
            sentences: vec![sentence],
            current: Some(0),
        });
        self.emit(PlaybackEvent::PlaybackStarted {
            mode: PlaybackMode::Single,
            sentence_count: 1,
        });

        self.submit(utterance)
    }

    /// Speak every sentence back-to-back in list order.
    ///
    /// Cancels whatever is playing first. The first sentence is marked
    /// active immediately; later ones become active as the engine starts
    /// them.
    pub fn play_all(&mut self, sentences: Vec<Sentence>) -> Result<(), PlaybackError> {
        let Some(first) = sentences.first() else {
            return Err(PlaybackError::EmptyBatch);
        };
        let first = first.clone();

        self.cancel_current();

        let lease = self.mint_lease();
        tracing::info!(count = sentences.len(), lease, "Playing all sentences");

        self.activate(&first);
        let utterances: Vec<Utterance> = sentences
            .iter()
            .enumerate()
            .map(|(index, sentence)| Self::utterance(lease, index, sentence))
            .collect();
        let count = sentences.len();
        self.batch = Some(ActiveBatch {
            lease,
            mode: PlaybackMode::Queue,
            sentences,
            current: None,
        });
        self.emit(PlaybackEvent::PlaybackStarted {
            mode: PlaybackMode::Queue,
            sentence_count: count,
        });

        for utterance in utterances {
            self.submit(utterance)?;
        }
        Ok(())
    }

    /// Cancel all engine work and return to idle.
    ///
    /// Safe to call in any state.
    pub fn stop(&mut self) {
        self.engine.cancel_all();
        if self.clear() {
            tracing::info!("Playback stopped");
            self.emit(PlaybackEvent::Stopped);
        }
    }

    /// Pause if playing, resume if paused. Returns the new paused flag.
    ///
    /// Does nothing while idle.
    pub fn toggle_pause_resume(&mut self) -> bool {
        if !self.is_active() {
            tracing::debug!("Ignoring pause toggle while idle");
            return false;
        }

        if self.state.paused {
            self.engine.resume();
            self.state.paused = false;
            self.emit(PlaybackEvent::Resumed);
        } else {
            self.engine.pause();
            self.state.paused = true;
            self.emit(PlaybackEvent::Paused);
        }
        tracing::debug!(paused = self.state.paused, "Pause toggled");
        self.state.paused
    }

    // ── Engine events ──────────────────────────────────────────────

    /// Apply one engine event.
    pub fn handle_event(&mut self, event: EngineEvent) {
        let EngineEvent { utterance, kind } = event;

        let Some(batch) = self.batch.as_mut() else {
            self.drop_stale(utterance, "no active batch");
            return;
        };
        if batch.lease != utterance.lease {
            self.drop_stale(utterance, "lease mismatch");
            return;
        }
        let Some(sentence) = batch.sentences.get(utterance.index).cloned() else {
            tracing::warn!(utterance = %utterance, "Engine event for unknown utterance");
            return;
        };

        match kind {
            EngineEventKind::Started => {
                batch.current = Some(utterance.index);
                if batch.mode == PlaybackMode::Queue {
                    self.state.active_sentence_id = Some(sentence.id.clone());
                    self.state.word_spans = segment(&sentence.text);
                    self.state.active_word_index = NO_WORD;
                }
                tracing::debug!(sentence = %sentence.id, "Sentence started");
                self.emit(PlaybackEvent::SentenceStarted {
                    sentence_id: sentence.id,
                });
            }

            EngineEventKind::Progress { char_offset } => {
                if batch.current != Some(utterance.index) {
                    tracing::trace!(utterance = %utterance, "Progress for a sentence not yet started");
                    return;
                }
                let Some(index) = word_index_at(&self.state.word_spans, char_offset) else {
                    return;
                };
                let Ok(word_index) = i32::try_from(index) else {
                    return;
                };
                if self.state.active_word_index != word_index {
                    self.state.active_word_index = word_index;
                    self.emit(PlaybackEvent::WordChanged {
                        sentence_id: sentence.id,
                        word_index: index,
                    });
                }
            }

            EngineEventKind::Ended => {
                let is_last = batch.is_last(utterance.index);
                tracing::debug!(sentence = %sentence.id, is_last, "Sentence ended");

                if let Some(hook) = self.on_complete.as_mut() {
                    hook(&sentence);
                }
                self.emit(PlaybackEvent::SentenceFinished {
                    sentence_id: sentence.id,
                });

                if is_last {
                    self.clear();
                    tracing::info!("Playback finished");
                    self.emit(PlaybackEvent::PlaybackFinished);
                }
            }

            EngineEventKind::Failed { reason } => {
                tracing::warn!(sentence = %sentence.id, %reason, "Speech engine failed");
                self.engine.cancel_all();
                self.clear();
                self.emit(PlaybackEvent::EngineFailed { reason });
            }
        }
    }

    /// Apply every engine event already delivered. Returns how many ran.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next engine event and apply it.
    ///
    /// Returns `false` without waiting when nothing is playing.
    pub async fn advance(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        match self.events_rx.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    // ── Internals ──────────────────────────────────────────────────

    fn mint_lease(&mut self) -> u64 {
        self.next_lease += 1;
        self.next_lease
    }

    fn utterance(lease: u64, index: usize, sentence: &Sentence) -> Utterance {
        Utterance {
            id: UtteranceId::new(lease, index),
            text: sentence.text.clone(),
            language: sentence.language_code.clone(),
        }
    }

    /// Make `sentence` the active one with fresh spans.
    fn activate(&mut self, sentence: &Sentence) {
        self.state.active_sentence_id = Some(sentence.id.clone());
        self.state.word_spans = segment(&sentence.text);
        self.state.active_word_index = NO_WORD;
        self.state.paused = false;
    }

    /// Hand one utterance to the engine, resetting on refusal.
    fn submit(&mut self, utterance: Utterance) -> Result<(), PlaybackError> {
        let events = UtteranceEvents::new(utterance.id, self.events_tx.clone());
        let id = utterance.id;
        if let Err(e) = self.engine.speak(utterance, events) {
            tracing::warn!(utterance = %id, error = %e, "Engine refused utterance");
            self.engine.cancel_all();
            self.clear();
            self.emit(PlaybackEvent::EngineFailed {
                reason: e.to_string(),
            });
            return Err(e.into());
        }
        Ok(())
    }

    /// The cancel step of `play_all`.
    fn cancel_current(&mut self) {
        self.engine.cancel_all();
        if self.clear() {
            tracing::debug!("Replacing active batch");
            self.emit(PlaybackEvent::Stopped);
        }
    }

    /// Forget the batch and reset state. Returns whether anything was active.
    fn clear(&mut self) -> bool {
        let was_active = self.batch.take().is_some() || !self.state.is_idle();
        self.state.reset();
        was_active
    }

    fn drop_stale(&self, utterance: UtteranceId, reason: &'static str) {
        tracing::debug!(utterance = %utterance, reason, "Dropping stale engine event");
        self.emit(PlaybackEvent::StaleEventDropped {
            lease: utterance.lease,
        });
    }

    fn emit(&self, event: PlaybackEvent) {
        self.emitter.emit(event);
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.engine.cancel_all();
    }
}
