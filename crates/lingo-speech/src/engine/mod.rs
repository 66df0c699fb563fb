//! Speech engine adapters.
//!
//! Implementations of [`lingo_core::SpeechEngine`]. Platform voices plug in
//! here; the crate ships a paced engine that reports word boundaries on a
//! timer, which is what the terminal front end and the tests use.

mod paced;

pub use paced::{PacedEngineConfig, PacedSpeechEngine};
