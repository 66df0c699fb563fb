//! Validation of sentence batches returned by the generative service.
//!
//! The service is asked for `[{ "lang_code": "...", "text": "..." }]`. A batch
//! is accepted only if every element is well formed; a single bad element
//! rejects the whole batch so no partial dialogue is ever played.

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

use crate::domain::{LanguageCode, Sentence, SentenceId};

/// Why a sentence batch was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    /// The payload is not valid JSON.
    #[error("Response is not valid JSON: {0}")]
    InvalidJson(String),

    /// The payload is not a JSON array.
    #[error("Expected an array of sentences, got {0}")]
    NotAnArray(&'static str),

    /// An element is not a JSON object.
    #[error("Element {index} is not an object")]
    NotAnObject { index: usize },

    /// An element lacks a required field or has it with the wrong type.
    #[error("Element {index}: field `{field}` must be a string")]
    InvalidField { index: usize, field: &'static str },

    /// An element's text or language tag is blank.
    #[error("Element {index}: field `{field}` must not be empty")]
    EmptyField { index: usize, field: &'static str },

    /// Two elements carry the same id.
    #[error("Element {index}: duplicate id `{id}`")]
    DuplicateId { index: usize, id: String },
}

/// Parse a raw response body into a validated batch.
pub fn parse_sentence_response(body: &str) -> Result<Vec<Sentence>, BatchError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| BatchError::InvalidJson(e.to_string()))?;
    parse_sentence_batch(&value)
}

/// Validate a JSON value as a sentence batch.
///
/// Elements without an `id` get the positional id `sentence-<n>`; supplied
/// ids are kept but must be strings and unique within the batch.
pub fn parse_sentence_batch(value: &Value) -> Result<Vec<Sentence>, BatchError> {
    let Value::Array(elements) = value else {
        return Err(BatchError::NotAnArray(json_kind(value)));
    };

    let mut seen = HashSet::with_capacity(elements.len());
    let mut sentences = Vec::with_capacity(elements.len());

    for (index, element) in elements.iter().enumerate() {
        let sentence = parse_element(index, element)?;
        if !seen.insert(sentence.id.clone()) {
            return Err(BatchError::DuplicateId {
                index,
                id: sentence.id.to_string(),
            });
        }
        sentences.push(sentence);
    }

    Ok(sentences)
}

fn parse_element(index: usize, element: &Value) -> Result<Sentence, BatchError> {
    let Value::Object(fields) = element else {
        return Err(BatchError::NotAnObject { index });
    };

    let lang = string_field(index, fields.get("lang_code"), "lang_code")?;
    let text = string_field(index, fields.get("text"), "text")?;

    let language_code = LanguageCode::new(lang).ok_or(BatchError::EmptyField {
        index,
        field: "lang_code",
    })?;
    if text.trim().is_empty() {
        return Err(BatchError::EmptyField {
            index,
            field: "text",
        });
    }

    let id = match fields.get("id") {
        None | Some(Value::Null) => SentenceId::positional(index),
        Some(Value::String(id)) => SentenceId::new(id.clone()),
        Some(_) => return Err(BatchError::InvalidField { index, field: "id" }),
    };

    Ok(Sentence::new(id, language_code, text))
}

fn string_field<'a>(
    index: usize,
    value: Option<&'a Value>,
    field: &'static str,
) -> Result<&'a str, BatchError> {
    match value {
        Some(Value::String(s)) => Ok(s),
        _ => Err(BatchError::InvalidField { index, field }),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
