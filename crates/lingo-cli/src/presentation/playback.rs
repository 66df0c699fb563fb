//! Playback progress lines.

use std::collections::HashMap;

use lingo_core::{PlaybackEvent, PlaybackMode, Sentence, SentenceId};

use super::rows::{highlight_word, isolate};

/// Turns playback events into terminal lines for one batch.
#[derive(Debug, Clone, Default)]
pub struct PlaybackRenderer {
    sentences: HashMap<SentenceId, Sentence>,
    translations: HashMap<SentenceId, String>,
}

impl PlaybackRenderer {
    /// Renderer for `sentences`, with optional translations by id.
    pub fn new(sentences: &[Sentence], translations: HashMap<SentenceId, String>) -> Self {
        Self {
            sentences: sentences
                .iter()
                .map(|s| (s.id.clone(), s.clone()))
                .collect(),
            translations,
        }
    }

    /// The line to print for `event`, if any.
    pub fn render(&self, event: &PlaybackEvent) -> Option<String> {
        match event {
            PlaybackEvent::PlaybackStarted {
                mode,
                sentence_count,
            } => Some(match mode {
                PlaybackMode::Single => "Playing 1 sentence".to_string(),
                PlaybackMode::Queue => format!("Playing {sentence_count} sentences"),
            }),

            PlaybackEvent::SentenceStarted { sentence_id } => {
                let sentence = self.sentences.get(sentence_id)?;
                Some(format!(
                    "> {} [{} {}] {}",
                    sentence_id,
                    sentence.language_code,
                    sentence.direction().as_str(),
                    isolate(&sentence.text, sentence.direction())
                ))
            }

            PlaybackEvent::WordChanged {
                sentence_id,
                word_index,
            } => {
                let sentence = self.sentences.get(sentence_id)?;
                Some(format!(
                    "    {}",
                    isolate(
                        &highlight_word(&sentence.text, *word_index),
                        sentence.direction()
                    )
                ))
            }

            PlaybackEvent::SentenceFinished { sentence_id } => self
                .translations
                .get(sentence_id)
                .map(|t| format!("    = {t}")),

            PlaybackEvent::Paused => Some("(paused)".to_string()),
            PlaybackEvent::Resumed => Some("(resumed)".to_string()),
            PlaybackEvent::Stopped => Some("Stopped.".to_string()),
            PlaybackEvent::PlaybackFinished => Some("Done.".to_string()),
            PlaybackEvent::EngineFailed { reason } => {
                Some(format!("Speech engine failed: {reason}"))
            }
            PlaybackEvent::StaleEventDropped { .. } => None,
        }
    }
}
