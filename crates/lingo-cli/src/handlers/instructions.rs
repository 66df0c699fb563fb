//! Instructions command handler.

use std::path::Path;

use anyhow::Result;
use lingo_core::{DialogueRequest, PromptField, compile_instructions};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Load a request file, or the defaults with the configured input language.
pub fn load_request(ctx: &CliContext, path: Option<&Path>) -> Result<DialogueRequest, CliError> {
    let Some(path) = path else {
        return Ok(DialogueRequest {
            input_language: ctx.settings().effective_default_language().to_string(),
            ..DialogueRequest::with_defaults()
        });
    };

    let json = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&json)
        .map_err(|e| CliError::Data(format!("invalid request in {}: {e}", path.display())))
}

/// Resolve field names; every field when none are given.
pub fn parse_fields(names: &[String]) -> Result<Vec<PromptField>, CliError> {
    if names.is_empty() {
        return Ok(PromptField::ALL.to_vec());
    }
    names
        .iter()
        .map(|name| {
            PromptField::from_name(name)
                .ok_or_else(|| CliError::Arguments(format!("unknown field `{name}`")))
        })
        .collect()
}

/// Print the compiled instruction string.
pub fn execute(ctx: &CliContext, request: Option<&Path>, fields: &[String]) -> Result<()> {
    let request = load_request(ctx, request)?;
    let fields = parse_fields(fields)?;
    println!("{}", compile_instructions(&request, &fields));
    Ok(())
}
