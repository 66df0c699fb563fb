//! Observable playback state.

use serde::{Deserialize, Serialize};

use super::sentence::{SentenceId, WordSpan};

/// Sentinel for "no word highlighted".
pub const NO_WORD: i32 = -1;

/// Snapshot of what the playback controller is currently reading.
///
/// One instance lives inside each controller; presenters only ever see
/// clones of it.
///
/// # Invariants
///
/// - `active_word_index` is [`NO_WORD`] unless `active_sentence_id` is set
///   and `word_spans` is non-empty.
/// - `paused` is false whenever `active_sentence_id` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    /// Sentence currently being spoken.
    pub active_sentence_id: Option<SentenceId>,
    /// Index into `word_spans` of the highlighted word, or [`NO_WORD`].
    pub active_word_index: i32,
    /// Word spans of the active sentence.
    pub word_spans: Vec<WordSpan>,
    /// Whether output is paused.
    pub paused: bool,
}

impl PlaybackState {
    /// The idle state.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            active_sentence_id: None,
            active_word_index: NO_WORD,
            word_spans: Vec::new(),
            paused: false,
        }
    }

    /// Reset every field to its idle default.
    pub fn reset(&mut self) {
        *self = Self::idle();
    }

    /// Whether no sentence is active.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.active_sentence_id.is_none()
    }

    /// Whether `id` is the active sentence.
    #[must_use]
    pub fn is_active(&self, id: &SentenceId) -> bool {
        self.active_sentence_id.as_ref() == Some(id)
    }

    /// The highlighted word, if any.
    #[must_use]
    pub fn active_word(&self) -> Option<&WordSpan> {
        usize::try_from(self.active_word_index)
            .ok()
            .and_then(|index| self.word_spans.get(index))
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::idle()
    }
}
