//! Sentences and word spans.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::language::{LanguageCode, TextDirection};

/// Stable identifier of a sentence within a playback session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SentenceId(String);

impl SentenceId {
    /// Wrap an identifier supplied by the sentence producer.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Positional identifier for the sentence at `index` (0-based).
    ///
    /// Produces `sentence-1` for index 0.
    #[must_use]
    pub fn positional(index: usize) -> Self {
        Self(format!("sentence-{}", index + 1))
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SentenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One line of the generated dialogue.
///
/// Immutable once accepted into a playback batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Unique, stable identifier.
    pub id: SentenceId,
    /// Language the text is written in.
    #[serde(rename = "lang_code")]
    pub language_code: LanguageCode,
    /// Sentence text (non-empty).
    pub text: String,
}

impl Sentence {
    /// Create a sentence.
    pub fn new(id: SentenceId, language_code: LanguageCode, text: impl Into<String>) -> Self {
        Self {
            id,
            language_code,
            text: text.into(),
        }
    }

    /// Layout direction for this sentence's row.
    #[must_use]
    pub fn direction(&self) -> TextDirection {
        self.language_code.direction()
    }
}

/// A word of a sentence with its character offsets.
///
/// `end` is `start + word length`, so it covers the separator slot that
/// follows the word and sits one below the next word's `start`. The last
/// word has no separator, so its `end` is its final character. Engine
/// progress offsets are matched against these stored bounds inclusively
/// (see [`WordSpan::contains`]); an offset landing on the separator
/// highlights the word before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSpan {
    /// The word text.
    pub word: String,
    /// Character offset of the first character.
    pub start: usize,
    /// Inclusive end bound; the separator slot for all but the last word.
    pub end: usize,
}

impl WordSpan {
    /// Create a span.
    pub fn new(word: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            word: word.into(),
            start,
            end,
        }
    }

    /// Inclusive range test against the stored bounds.
    #[must_use]
    pub const fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end
    }
}
