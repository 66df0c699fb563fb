#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod controller;
pub mod engine;
pub mod error;
pub mod segment;
pub mod session;

// Re-export key types for convenience
pub use controller::{CompletionHook, PlaybackController, PlaybackPhase};
pub use engine::{PacedEngineConfig, PacedSpeechEngine};
pub use error::PlaybackError;
pub use segment::{segment, word_index_at};
pub use session::PlaybackSession;

#[cfg(test)]
use tokio_test as _;
