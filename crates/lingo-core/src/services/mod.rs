//! Core services - orchestration over ports.
//!
//! Services depend only on port traits and domain types; adapters supply
//! the concrete implementations.

mod translation;

pub use translation::{TRANSLATION_ERROR_TEXT, TranslatedSentence, TranslationService};
