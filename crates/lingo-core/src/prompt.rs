//! Dialogue prompt configuration and instruction compilation.
//!
//! A [`DialogueRequest`] describes the dialogue the generative service should
//! produce. [`compile_instructions`] turns the enabled fields into the
//! natural-language instruction string sent alongside it.

use serde::{Deserialize, Serialize};

/// Response shape the service is asked to produce.
pub const EXPECTED_RESPONSE_FORMAT: &str = r#"[{ "lang_code": "string", "text": "string" }]"#;

/// Everything the user configures about the dialogue to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DialogueRequest {
    /// What the dialogue should be about.
    pub current_message: String,
    /// Persona for the generator.
    pub role: Option<String>,
    /// Setting the dialogue takes place in.
    pub scene: Option<String>,
    pub max_sentences: Option<u32>,
    pub min_sentences: Option<u32>,
    pub max_words_in_sentence: Option<u32>,
    pub max_total_response_chars: Option<u32>,
    pub min_total_response_chars: Option<u32>,
    /// Language the user writes the request in.
    pub input_language: String,
    /// Languages the speakers use, one per speaker.
    pub output_languages: Vec<String>,
    /// Free-form extra guidance.
    #[serde(rename = "special_notes")]
    pub special_notes: Option<String>,
    /// Shape the response must parse as.
    #[serde(rename = "expected_response_format_to_feed_json_parse")]
    pub expected_response_format: String,
}

impl DialogueRequest {
    /// A request for a short two-language beginner dialogue.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            current_message: "one speaker offers the other a cup of tea".to_string(),
            role: Some(
                "You are a language teacher who favours words the two languages share."
                    .to_string(),
            ),
            scene: Some("two neighbours meet for the first time".to_string()),
            max_sentences: Some(10),
            min_sentences: Some(10),
            max_words_in_sentence: Some(50),
            max_total_response_chars: Some(500),
            min_total_response_chars: None,
            input_language: "en".to_string(),
            output_languages: Vec::new(),
            special_notes: Some("return pure text and not markdown".to_string()),
            expected_response_format: EXPECTED_RESPONSE_FORMAT.to_string(),
        }
    }
}

impl Default for DialogueRequest {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// A request field that can be switched on or off in the instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PromptField {
    CurrentMessage,
    Scene,
    MinTotalResponseChars,
    MaxTotalResponseChars,
    MinSentences,
    MaxSentences,
    MaxWordsInSentence,
    OutputLanguages,
    SpecialNotes,
}

impl PromptField {
    /// Every field, in the order the form presents them.
    pub const ALL: &'static [Self] = &[
        Self::CurrentMessage,
        Self::Scene,
        Self::MinTotalResponseChars,
        Self::MaxTotalResponseChars,
        Self::MinSentences,
        Self::MaxSentences,
        Self::MaxWordsInSentence,
        Self::OutputLanguages,
        Self::SpecialNotes,
    ];

    /// Parse a field from its camelCase form name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "currentMessage" => Self::CurrentMessage,
            "scene" => Self::Scene,
            "minTotalResponseChars" => Self::MinTotalResponseChars,
            "maxTotalResponseChars" => Self::MaxTotalResponseChars,
            "minSentences" => Self::MinSentences,
            "maxSentences" => Self::MaxSentences,
            "maxWordsInSentence" => Self::MaxWordsInSentence,
            "outputLanguages" => Self::OutputLanguages,
            "specialNotes" | "special_notes" => Self::SpecialNotes,
            _ => return None,
        })
    }
}

/// Compile the enabled fields into one instruction string.
///
/// Instructions follow the order of `enabled`, are joined with `". "` and
/// end with a period. Optional text fields that are unset or blank
/// contribute nothing; numeric limits that are unset are skipped as well.
#[must_use]
pub fn compile_instructions(request: &DialogueRequest, enabled: &[PromptField]) -> String {
    let parts: Vec<String> = enabled
        .iter()
        .filter_map(|field| instruction_for(request, *field))
        .collect();

    format!("{}.", parts.join(". "))
}

fn instruction_for(request: &DialogueRequest, field: PromptField) -> Option<String> {
    match field {
        PromptField::CurrentMessage => Some(format!(
            "please generate such dialog: \"{}\"",
            request.current_message
        )),
        PromptField::Scene => non_blank(request.scene.as_deref()).map(|s| format!("Context: {s}")),
        PromptField::MinTotalResponseChars => request
            .min_total_response_chars
            .map(|n| format!("Use at least {n} characters")),
        PromptField::MaxTotalResponseChars => request
            .max_total_response_chars
            .map(|n| format!("Use no more than {n} characters")),
        PromptField::MinSentences => request
            .min_sentences
            .map(|n| format!("Include at least {n} sentences")),
        PromptField::MaxSentences => request
            .max_sentences
            .map(|n| format!("Include no more than {n} sentences")),
        PromptField::MaxWordsInSentence => request
            .max_words_in_sentence
            .map(|n| format!("Keep each sentence under {n} words")),
        PromptField::OutputLanguages => Some(format!(
            "Use the following languages (each person know only one language and tries to communicate with it): {}",
            request.output_languages.join(", ")
        )),
        PromptField::SpecialNotes => non_blank(request.special_notes.as_deref())
            .map(|notes| format!("Additional notes: {notes}")),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
