//! Translator port for the external translation lookup.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::LanguageCode;

/// Errors returned by [`Translator`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// The lookup service could not be reached or answered with an error.
    #[error("Translation service error: {0}")]
    Service(String),

    /// The service answered but the payload had no translation in it.
    #[error("Translation response had no text")]
    EmptyResponse,

    /// No translation exists for this text / language pair.
    #[error("No translation available for {from} -> {to}")]
    Unavailable { from: String, to: String },
}

/// Port trait for translating a single piece of text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `from` into `to`.
    async fn translate(
        &self,
        text: &str,
        from: &LanguageCode,
        to: &LanguageCode,
    ) -> Result<String, TranslationError>;
}
