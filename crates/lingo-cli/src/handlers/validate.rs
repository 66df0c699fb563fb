//! Validate command handler.
//!
//! Also hosts [`load_batch`], which every command that reads a batch
//! file goes through.

use std::path::Path;

use anyhow::Result;
use lingo_core::{CoreError, PlaybackState, Sentence, parse_sentence_response, sentence_rows};

use crate::error::CliError;
use crate::presentation::format_row;

/// Read and validate a batch file.
///
/// One malformed element rejects the whole file.
pub fn load_batch(path: &Path) -> Result<Vec<Sentence>, CliError> {
    let body = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
    let sentences = parse_sentence_response(&body).map_err(CoreError::from)?;
    tracing::debug!(path = %path.display(), count = sentences.len(), "Batch loaded");
    Ok(sentences)
}

/// Check a batch file and list its sentences.
pub fn execute(file: &Path) -> Result<()> {
    let sentences = load_batch(file)?;

    println!("Valid batch: {} sentence(s)\n", sentences.len());
    for row in sentence_rows(&sentences, &PlaybackState::idle()) {
        println!("{}", format_row(&row));
    }
    Ok(())
}
