//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for playing generated dialogues.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "lingo")]
#[command(about = "Play multi-language dialogues with word-by-word highlighting")]
#[command(version)]
pub struct Cli {
    /// Settings file (JSON)
    #[arg(long = "config", global = true, env = "LINGO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from(["lingo", "--verbose", "--config", "/tmp/lingo.json", "languages"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/lingo.json")));
        assert!(matches!(cli.command, Some(Commands::Languages)));
    }

    #[test]
    fn test_play_args() {
        let cli = Cli::parse_from([
            "lingo",
            "play",
            "dialogue.json",
            "--index",
            "2",
            "--translate-to",
            "en",
            "--glossary",
            "glossary.json",
        ]);
        let Some(Commands::Play {
            file,
            index,
            translate_to,
            glossary,
            words_per_minute,
        }) = cli.command
        else {
            panic!("expected play command");
        };
        assert_eq!(file, PathBuf::from("dialogue.json"));
        assert_eq!(index, Some(2));
        assert_eq!(translate_to.as_deref(), Some("en"));
        assert_eq!(glossary, Some(PathBuf::from("glossary.json")));
        assert_eq!(words_per_minute, None);
    }

    #[test]
    fn test_index_is_one_based() {
        let result = Cli::try_parse_from(["lingo", "play", "d.json", "--index", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_instruction_fields_repeat() {
        let cli = Cli::parse_from([
            "lingo",
            "instructions",
            "--field",
            "currentMessage",
            "--field",
            "maxSentences",
        ]);
        let Some(Commands::Instructions { request, fields }) = cli.command else {
            panic!("expected instructions command");
        };
        assert!(request.is_none());
        assert_eq!(fields, vec!["currentMessage", "maxSentences"]);
    }
}
