//! Settings domain types and validation.
//!
//! These are pure domain types; loading them from files or the environment
//! is the adapter's job.

use serde::{Deserialize, Serialize};

/// Default speaking pace for paced engines.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 160;

/// Default pause between queued utterances, in milliseconds.
pub const DEFAULT_UTTERANCE_GAP_MS: u64 = 250;

/// Default language for prompts and new sentences.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Application settings structure.
///
/// All fields are optional to support partial files and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Speaking pace used by the paced engine.
    pub words_per_minute: Option<u32>,

    /// Pause inserted between queued utterances.
    pub utterance_gap_ms: Option<u64>,

    /// Target language for translation overlays (no overlay when unset).
    pub translate_to: Option<String>,

    /// Default input language for dialogue prompts.
    pub default_language: Option<String>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            words_per_minute: Some(DEFAULT_WORDS_PER_MINUTE),
            utterance_gap_ms: Some(DEFAULT_UTTERANCE_GAP_MS),
            translate_to: None,
            default_language: Some(DEFAULT_LANGUAGE.to_string()),
        }
    }

    /// Get the effective speaking pace (with default fallback).
    #[must_use]
    pub const fn effective_words_per_minute(&self) -> u32 {
        match self.words_per_minute {
            Some(wpm) => wpm,
            None => DEFAULT_WORDS_PER_MINUTE,
        }
    }

    /// Get the effective gap between utterances (with default fallback).
    #[must_use]
    pub const fn effective_utterance_gap_ms(&self) -> u64 {
        match self.utterance_gap_ms {
            Some(gap) => gap,
            None => DEFAULT_UTTERANCE_GAP_MS,
        }
    }

    /// Get the effective default language.
    #[must_use]
    pub fn effective_default_language(&self) -> &str {
        self.default_language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Merge an update into this one, only touching fields that are Some.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(wpm) = other.words_per_minute {
            self.words_per_minute = wpm;
        }
        if let Some(gap) = other.utterance_gap_ms {
            self.utterance_gap_ms = gap;
        }
        if let Some(ref target) = other.translate_to {
            self.translate_to.clone_from(target);
        }
        if let Some(ref lang) = other.default_language {
            self.default_language.clone_from(lang);
        }
    }
}

/// Partial settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = set field to None/null
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub words_per_minute: Option<Option<u32>>,
    pub utterance_gap_ms: Option<Option<u64>>,
    pub translate_to: Option<Option<String>>,
    pub default_language: Option<Option<String>>,
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Words per minute must be between 40 and 600, got {0}")]
    InvalidWordsPerMinute(u32),

    #[error("Utterance gap must be at most 10000 ms, got {0}")]
    InvalidUtteranceGap(u64),

    #[error("Language tag for `{0}` cannot be empty")]
    EmptyLanguage(&'static str),
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if let Some(wpm) = settings.words_per_minute {
        if !(40..=600).contains(&wpm) {
            return Err(SettingsError::InvalidWordsPerMinute(wpm));
        }
    }

    if let Some(gap) = settings.utterance_gap_ms {
        if gap > 10_000 {
            return Err(SettingsError::InvalidUtteranceGap(gap));
        }
    }

    if settings
        .translate_to
        .as_ref()
        .is_some_and(|t| t.trim().is_empty())
    {
        return Err(SettingsError::EmptyLanguage("translate_to"));
    }

    if settings
        .default_language
        .as_ref()
        .is_some_and(|l| l.trim().is_empty())
    {
        return Err(SettingsError::EmptyLanguage("default_language"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::with_defaults();
        assert_eq!(settings.words_per_minute, Some(DEFAULT_WORDS_PER_MINUTE));
        assert_eq!(settings.utterance_gap_ms, Some(DEFAULT_UTTERANCE_GAP_MS));
        assert!(settings.translate_to.is_none());
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_effective_fallbacks() {
        let settings = Settings::default();
        assert_eq!(settings.effective_words_per_minute(), DEFAULT_WORDS_PER_MINUTE);
        assert_eq!(settings.effective_utterance_gap_ms(), DEFAULT_UTTERANCE_GAP_MS);
        assert_eq!(settings.effective_default_language(), "en");
    }

    #[test]
    fn test_wpm_bounds() {
        let mut settings = Settings::with_defaults();
        settings.words_per_minute = Some(20);
        assert_eq!(
            validate_settings(&settings),
            Err(SettingsError::InvalidWordsPerMinute(20))
        );
        settings.words_per_minute = Some(600);
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_gap_bound() {
        let settings = Settings {
            utterance_gap_ms: Some(20_000),
            ..Settings::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::InvalidUtteranceGap(20_000))
        ));
    }

    #[test]
    fn test_empty_translate_target() {
        let settings = Settings {
            translate_to: Some("  ".to_string()),
            ..Settings::default()
        };
        assert_eq!(
            validate_settings(&settings),
            Err(SettingsError::EmptyLanguage("translate_to"))
        );
    }

    #[test]
    fn test_merge_only_touches_some_fields() {
        let mut settings = Settings::with_defaults();
        let update = SettingsUpdate {
            words_per_minute: Some(Some(220)),
            translate_to: Some(Some("he".to_string())),
            ..SettingsUpdate::default()
        };
        settings.merge(&update);

        assert_eq!(settings.words_per_minute, Some(220));
        assert_eq!(settings.translate_to.as_deref(), Some("he"));
        assert_eq!(settings.utterance_gap_ms, Some(DEFAULT_UTTERANCE_GAP_MS));
    }

    #[test]
    fn test_merge_can_clear() {
        let mut settings = Settings::with_defaults();
        settings.merge(&SettingsUpdate {
            default_language: Some(None),
            ..SettingsUpdate::default()
        });
        assert!(settings.default_language.is_none());
    }

    #[test]
    fn test_partial_json() {
        let settings: Settings = serde_json::from_str(r#"{"words_per_minute": 200}"#).unwrap();
        assert_eq!(settings.words_per_minute, Some(200));
        assert!(settings.utterance_gap_ms.is_none());
    }
}
