#![doc = include_str!("README.md")]

//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub fn execute(ctx: &CliContext, ...) -> Result<()>`
//!   (async where the command waits on playback or translation)
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call core and speech APIs
//!   3. Format output through `presentation`

pub mod instructions;
pub mod languages;
pub mod play;
pub mod segment;
pub mod validate;
