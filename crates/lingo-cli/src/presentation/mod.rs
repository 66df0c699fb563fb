#![doc = include_str!("README.md")]

//! Shared CLI presentation utilities.
//!
//! # Guidelines
//!
//! - Keep this module format-only: no playback decisions
//! - View-model transforms belong in `lingo_core::presenter`

pub mod playback;
pub mod rows;
pub mod tables;

// Re-export commonly used items
pub use playback::PlaybackRenderer;
pub use rows::{format_row, highlight_word, isolate};
pub use tables::{print_separator, truncate_chars};
