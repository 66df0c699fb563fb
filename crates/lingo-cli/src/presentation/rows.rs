//! Sentence row formatting.

use lingo_core::{SentenceRow, TextDirection};

/// Right-to-left isolate.
const RLI: char = '\u{2067}';
/// Pop directional isolate.
const PDI: char = '\u{2069}';

/// Wrap right-to-left text in a bidi isolate.
pub fn isolate(text: &str, direction: TextDirection) -> String {
    match direction {
        TextDirection::Rtl => format!("{RLI}{text}{PDI}"),
        TextDirection::Ltr => text.to_string(),
    }
}

/// Bracket the word at `index`, splitting the same way as the segmenter.
///
/// ```rust
/// use lingo_cli::presentation::highlight_word;
///
/// assert_eq!(highlight_word("Hello there friend", 1), "Hello [there] friend");
/// ```
pub fn highlight_word(text: &str, index: usize) -> String {
    text.split(' ')
        .enumerate()
        .map(|(i, word)| {
            if i == index {
                format!("[{word}]")
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line per row, plus an indented translation line when present.
pub fn format_row(row: &SentenceRow) -> String {
    let marker = if row.is_active { '>' } else { ' ' };
    let text = match &row.highlighted_word {
        Some(word) => highlight_word(&row.text, word.index),
        None => row.text.clone(),
    };

    let mut line = format!(
        "{marker} {:<12} {:<4} {:<3} {}",
        row.id.as_str(),
        row.language_code,
        row.direction.as_str(),
        isolate(&text, row.direction)
    );
    if let Some(translation) = &row.translation {
        line.push_str(&format!("\n  {:<12} = {translation}", ""));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_core::{
        LanguageCode, PlaybackState, Sentence, SentenceId, WordSpan, sentence_rows,
    };

    #[test]
    fn rtl_text_is_isolated() {
        assert_eq!(isolate("שלום", TextDirection::Rtl), "\u{2067}שלום\u{2069}");
        assert_eq!(isolate("hi", TextDirection::Ltr), "hi");
    }

    #[test]
    fn highlight_keeps_empty_words() {
        assert_eq!(highlight_word("a  b", 2), "a  [b]");
        assert_eq!(highlight_word("a b", 5), "a b");
    }

    #[test]
    fn active_row_shows_marker_and_highlight() {
        let sentences = vec![Sentence::new(
            SentenceId::new("s1"),
            LanguageCode::new("en").unwrap(),
            "Hello there",
        )];
        let mut state = PlaybackState::idle();
        state.active_sentence_id = Some(SentenceId::new("s1"));
        state.word_spans = vec![WordSpan::new("Hello", 0, 5), WordSpan::new("there", 6, 11)];
        state.active_word_index = 0;

        let rows = sentence_rows(&sentences, &state);
        let line = format_row(&rows[0]);

        assert!(line.starts_with("> s1"));
        assert!(line.ends_with("[Hello] there"));
        assert!(line.contains(" ltr "));
    }
}
