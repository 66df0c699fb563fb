//! Domain types shared by every lingo crate.
//!
//! These are pure data types with no infrastructure dependencies.

mod language;
mod playback;
mod sentence;

pub use language::{
    LanguageCode, LanguageOption, RTL_LANGUAGE_CODES, SUPPORTED_LANGUAGES, TextDirection,
};
pub use playback::{NO_WORD, PlaybackState};
pub use sentence::{Sentence, SentenceId, WordSpan};
