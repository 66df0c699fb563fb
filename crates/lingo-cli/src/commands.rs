//! Main commands enum.
//!
//! This module defines the available commands for the CLI tool.

use std::path::PathBuf;

use clap::Subcommand;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Play a sentence batch with word highlighting
    Play {
        /// Batch file: JSON array of { "lang_code", "text" } objects
        file: PathBuf,
        /// Play only this sentence (1-based) instead of the whole list
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        index: Option<u32>,
        /// Show a translation under each sentence in this language
        #[arg(short, long)]
        translate_to: Option<String>,
        /// Glossary file used for translations
        #[arg(short, long)]
        glossary: Option<PathBuf>,
        /// Override the speaking rate
        #[arg(long = "wpm")]
        words_per_minute: Option<u32>,
    },

    /// Check a sentence batch and list its sentences
    Validate {
        /// Batch file to check
        file: PathBuf,
    },

    /// Show how a text is split into highlighted words
    Segment {
        /// Text to segment
        text: String,
    },

    /// Print the instruction string for a dialogue request
    Instructions {
        /// Request file (JSON); built-in defaults when omitted
        #[arg(short, long)]
        request: Option<PathBuf>,
        /// Field to include (repeatable); all fields when omitted
        #[arg(short, long = "field")]
        fields: Vec<String>,
    },

    /// List built-in languages
    Languages,
}
