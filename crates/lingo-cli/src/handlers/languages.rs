//! Languages command handler.

use anyhow::Result;
use lingo_core::{LanguageCode, SUPPORTED_LANGUAGES, TextDirection};

use crate::presentation::print_separator;

/// List the built-in languages with their layout direction.
pub fn execute() -> Result<()> {
    println!("{:<6} {:<10} Direction", "Code", "Name");
    print_separator(28);

    for language in SUPPORTED_LANGUAGES {
        let direction = LanguageCode::new(language.code)
            .map_or(TextDirection::Ltr, |code| code.direction());
        println!("{:<6} {:<10} {}", language.code, language.name, direction.as_str());
    }
    Ok(())
}
