//! Segment command handler.
//!
//! Shows the word spans the controller highlights against.

use anyhow::Result;
use lingo_speech::segment;

use crate::presentation::print_separator;

/// Print every word span of `text`.
pub fn execute(text: &str) -> Result<()> {
    let spans = segment(text);

    println!("{:<5} {:<6} {:<6} Word", "#", "Start", "End");
    print_separator(40);
    for (index, span) in spans.iter().enumerate() {
        println!(
            "{:<5} {:<6} {:<6} {:?}",
            index, span.start, span.end, span.word
        );
    }
    Ok(())
}
