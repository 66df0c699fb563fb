#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod batch;
pub mod domain;
pub mod events;
pub mod ports;
pub mod presenter;
pub mod prompt;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use batch::{BatchError, parse_sentence_batch, parse_sentence_response};
pub use domain::{
    LanguageCode, LanguageOption, NO_WORD, PlaybackState, RTL_LANGUAGE_CODES, SUPPORTED_LANGUAGES,
    Sentence, SentenceId, TextDirection, WordSpan,
};
pub use events::{PlaybackEvent, PlaybackMode};
pub use ports::{
    ChannelPlaybackEmitter, CoreError, EngineError, EngineEvent, EngineEventKind,
    EngineEventReceiver, EngineEventSender, NoopPlaybackEmitter, PlaybackEventEmitter,
    SpeechEngine, TranslationError, Translator, Utterance, UtteranceEvents, UtteranceId,
};
pub use presenter::{HighlightedWord, SentenceRow, sentence_rows, sentence_rows_with_translations};
pub use prompt::{DialogueRequest, EXPECTED_RESPONSE_FORMAT, PromptField, compile_instructions};
pub use services::{TRANSLATION_ERROR_TEXT, TranslatedSentence, TranslationService};
pub use settings::{
    DEFAULT_LANGUAGE, DEFAULT_UTTERANCE_GAP_MS, DEFAULT_WORDS_PER_MINUTE, Settings, SettingsError,
    SettingsUpdate, validate_settings,
};

#[cfg(test)]
use tokio_test as _;
