//! Translation overlay service.
//!
//! Produces a translation for every sentence of a batch so the presenter
//! can show it under the original line. Lookups run concurrently; a failed
//! lookup only affects its own sentence.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::join_all;

use crate::domain::{LanguageCode, Sentence, SentenceId};
use crate::ports::translator::Translator;

/// Text shown in place of a translation that could not be produced.
pub const TRANSLATION_ERROR_TEXT: &str = "translation error";

/// A sentence paired with its overlay text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedSentence {
    pub sentence: Sentence,
    /// Translated text, or [`TRANSLATION_ERROR_TEXT`] on failure.
    pub translation: String,
    /// Whether the lookup failed.
    pub failed: bool,
}

/// Service translating sentence batches through the [`Translator`] port.
pub struct TranslationService {
    translator: Arc<dyn Translator>,
}

impl TranslationService {
    /// Create a new translation service.
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }

    /// Translate every sentence into `target`, preserving order.
    ///
    /// Sentences already written in `target` are passed through without a
    /// lookup.
    pub async fn overlay(
        &self,
        sentences: &[Sentence],
        target: &LanguageCode,
    ) -> Vec<TranslatedSentence> {
        let lookups = sentences.iter().map(|sentence| self.translate_one(sentence, target));
        let translated = join_all(lookups).await;

        let failures = translated.iter().filter(|t| t.failed).count();
        tracing::debug!(
            target = %target,
            sentences = sentences.len(),
            failures,
            "Translation overlay complete"
        );

        translated
    }

    /// Translate a batch and index the overlay text by sentence id.
    pub async fn overlay_by_id(
        &self,
        sentences: &[Sentence],
        target: &LanguageCode,
    ) -> HashMap<SentenceId, String> {
        self.overlay(sentences, target)
            .await
            .into_iter()
            .map(|t| (t.sentence.id, t.translation))
            .collect()
    }

    async fn translate_one(&self, sentence: &Sentence, target: &LanguageCode) -> TranslatedSentence {
        if &sentence.language_code == target {
            return TranslatedSentence {
                sentence: sentence.clone(),
                translation: sentence.text.clone(),
                failed: false,
            };
        }

        match self
            .translator
            .translate(&sentence.text, &sentence.language_code, target)
            .await
        {
            Ok(text) => TranslatedSentence {
                sentence: sentence.clone(),
                translation: text,
                failed: false,
            },
            Err(e) => {
                tracing::warn!(
                    sentence = %sentence.id,
                    from = %sentence.language_code,
                    to = %target,
                    error = %e,
                    "Translation lookup failed"
                );
                TranslatedSentence {
                    sentence: sentence.clone(),
                    translation: TRANSLATION_ERROR_TEXT.to_string(),
                    failed: true,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::translator::{MockTranslator, TranslationError};

    fn lang(tag: &str) -> LanguageCode {
        LanguageCode::new(tag).unwrap()
    }

    fn sentence(index: usize, tag: &str, text: &str) -> Sentence {
        Sentence::new(SentenceId::positional(index), lang(tag), text)
    }

    #[tokio::test]
    async fn translates_in_order() {
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .times(2)
            .returning(|text, _, _| Ok(format!("[{text}]")));

        let service = TranslationService::new(Arc::new(translator));
        let batch = vec![sentence(0, "ar", "one"), sentence(1, "he", "two")];
        let out = service.overlay(&batch, &lang("en")).await;

        let texts: Vec<_> = out.iter().map(|t| t.translation.as_str()).collect();
        assert_eq!(texts, vec!["[one]", "[two]"]);
        assert!(out.iter().all(|t| !t.failed));
    }

    #[tokio::test]
    async fn failure_only_affects_its_sentence() {
        let mut translator = MockTranslator::new();
        translator.expect_translate().returning(|text, _, _| {
            if text == "bad" {
                Err(TranslationError::Service("timeout".to_string()))
            } else {
                Ok(text.to_uppercase())
            }
        });

        let service = TranslationService::new(Arc::new(translator));
        let batch = vec![sentence(0, "ar", "good"), sentence(1, "ar", "bad")];
        let out = service.overlay(&batch, &lang("en")).await;

        assert_eq!(out[0].translation, "GOOD");
        assert_eq!(out[1].translation, TRANSLATION_ERROR_TEXT);
        assert!(out[1].failed);
    }

    #[tokio::test]
    async fn same_language_skips_lookup() {
        let mut translator = MockTranslator::new();
        translator.expect_translate().never();

        let service = TranslationService::new(Arc::new(translator));
        let batch = vec![sentence(0, "en", "Hello")];
        let by_id = service.overlay_by_id(&batch, &lang("en")).await;

        assert_eq!(by_id.get(&SentenceId::new("sentence-1")).map(String::as_str), Some("Hello"));
    }
}
