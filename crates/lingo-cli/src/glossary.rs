//! File-backed translator.
//!
//! A glossary file maps target language → source text → translation:
//!
//! ```json
//! { "en": { "تحب تشرب شاي؟": "Would you like some tea?" } }
//! ```
//!
//! Lookups are exact matches on the trimmed sentence text.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use lingo_core::{LanguageCode, TranslationError, Translator};

use crate::error::CliError;

/// [`Translator`] answering from a glossary loaded into memory.
#[derive(Debug, Clone, Default)]
pub struct GlossaryTranslator {
    entries: HashMap<String, HashMap<String, String>>,
}

impl GlossaryTranslator {
    /// Parse a glossary from JSON.
    pub fn from_json(json: &str) -> Result<Self, CliError> {
        let raw: HashMap<String, HashMap<String, String>> = serde_json::from_str(json)
            .map_err(|e| CliError::Data(format!("invalid glossary: {e}")))?;

        let entries = raw
            .into_iter()
            .map(|(target, phrases)| {
                let phrases = phrases
                    .into_iter()
                    .map(|(source, text)| (source.trim().to_string(), text))
                    .collect();
                (target.trim().to_string(), phrases)
            })
            .collect();

        Ok(Self { entries })
    }

    /// Load a glossary file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
        let glossary = Self::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            targets = glossary.entries.len(),
            "Loaded glossary"
        );
        Ok(glossary)
    }
}

#[async_trait]
impl Translator for GlossaryTranslator {
    async fn translate(
        &self,
        text: &str,
        from: &LanguageCode,
        to: &LanguageCode,
    ) -> Result<String, TranslationError> {
        self.entries
            .get(to.as_str())
            .and_then(|phrases| phrases.get(text.trim()))
            .cloned()
            .ok_or_else(|| TranslationError::Unavailable {
                from: from.to_string(),
                to: to.to_string(),
            })
    }
}
