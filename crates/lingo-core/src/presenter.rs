//! View model for a rendered sentence list.
//!
//! Frontends (terminal, GUI) render [`SentenceRow`]s and never inspect
//! [`PlaybackState`] directly, so the "one active sentence disables every
//! play trigger" rule lives in one place.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{PlaybackState, Sentence, SentenceId, TextDirection, WordSpan};

/// Everything needed to draw one sentence row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceRow {
    pub id: SentenceId,
    pub text: String,
    pub language_code: String,
    /// Layout direction for the row.
    pub direction: TextDirection,
    /// Whether this row's sentence is being spoken.
    pub is_active: bool,
    /// Whether the per-sentence play trigger is enabled.
    pub can_play: bool,
    /// Whether playback is paused on this row.
    pub paused: bool,
    /// Highlighted word, for the active row only.
    pub highlighted_word: Option<HighlightedWord>,
    /// Translation overlay, when one was produced.
    pub translation: Option<String>,
}

/// The word currently being spoken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightedWord {
    /// Position in the row's word list.
    pub index: usize,
    pub word: String,
    /// Character offset where the word begins.
    pub start: usize,
}

impl HighlightedWord {
    fn from_span(index: usize, span: &WordSpan) -> Self {
        Self {
            index,
            word: span.word.clone(),
            start: span.start,
        }
    }
}

/// Build one row per sentence, in list order.
#[must_use]
pub fn sentence_rows(sentences: &[Sentence], state: &PlaybackState) -> Vec<SentenceRow> {
    sentence_rows_with_translations(sentences, state, &HashMap::new())
}

/// Build rows and attach translations joined by sentence id.
#[must_use]
pub fn sentence_rows_with_translations(
    sentences: &[Sentence],
    state: &PlaybackState,
    translations: &HashMap<SentenceId, String>,
) -> Vec<SentenceRow> {
    let can_play = state.is_idle();

    sentences
        .iter()
        .map(|sentence| {
            let is_active = state.is_active(&sentence.id);
            let highlighted_word = if is_active {
                usize::try_from(state.active_word_index)
                    .ok()
                    .and_then(|index| {
                        state
                            .word_spans
                            .get(index)
                            .map(|span| HighlightedWord::from_span(index, span))
                    })
            } else {
                None
            };

            SentenceRow {
                id: sentence.id.clone(),
                text: sentence.text.clone(),
                language_code: sentence.language_code.as_str().to_string(),
                direction: sentence.direction(),
                is_active,
                can_play,
                paused: is_active && state.paused,
                highlighted_word,
                translation: translations.get(&sentence.id).cloned(),
            }
        })
        .collect()
}
