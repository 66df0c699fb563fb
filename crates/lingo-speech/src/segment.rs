//! Word segmentation for highlight tracking.
//!
//! Offsets are counted in characters (Unicode scalar values), the unit
//! engines use when reporting word boundaries.

use lingo_core::WordSpan;

/// Split `text` into word spans.
///
/// Splits on `' '` only, so consecutive spaces produce empty words. The
/// stored `end` is `start + len(word)`, which is one less than the next
/// word's `start`. The last word has no separator after it, so its `end`
/// is its final character: `text.chars().count() - 1` for text that does
/// not end in a space.
#[must_use]
pub fn segment(text: &str) -> Vec<WordSpan> {
    let mut words = text.split(' ').peekable();
    let mut spans = Vec::new();
    let mut offset = 0;

    while let Some(word) = words.next() {
        let len = word.chars().count();
        let end = if words.peek().is_some() {
            offset + len
        } else {
            offset + len.saturating_sub(1)
        };
        spans.push(WordSpan::new(word, offset, end));
        offset += len + 1;
    }
    spans
}

/// Index of the first span whose inclusive range contains `offset`.
///
/// Because `end` sits on the separator slot, an offset pointing at a space
/// resolves to the word before it.
#[must_use]
pub fn word_index_at(spans: &[WordSpan], offset: usize) -> Option<usize> {
    spans.iter().position(|span| span.contains(offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(spans: &[WordSpan]) -> Vec<(&str, usize, usize)> {
        spans
            .iter()
            .map(|s| (s.word.as_str(), s.start, s.end))
            .collect()
    }

    #[test]
    fn splits_on_single_spaces() {
        let spans = segment("Hello there friend");
        assert_eq!(
            bounds(&spans),
            vec![("Hello", 0, 5), ("there", 6, 11), ("friend", 12, 17)]
        );
    }

    #[test]
    fn progress_offset_maps_to_word() {
        let spans = segment("Hello there friend");
        assert_eq!(word_index_at(&spans, 7), Some(1));
        assert_eq!(word_index_at(&spans, 0), Some(0));
        assert_eq!(word_index_at(&spans, 17), Some(2));
        assert_eq!(word_index_at(&spans, 18), None);
    }

    #[test]
    fn separator_offset_resolves_to_previous_word() {
        let spans = segment("Hi you");
        assert_eq!(word_index_at(&spans, 2), Some(0));
        assert_eq!(word_index_at(&spans, 3), Some(1));
    }

    #[test]
    fn consecutive_spaces_keep_empty_words() {
        let spans = segment("a  b");
        assert_eq!(bounds(&spans), vec![("a", 0, 1), ("", 2, 2), ("b", 3, 3)]);
    }

    #[test]
    fn empty_text_is_one_empty_word() {
        assert_eq!(bounds(&segment("")), vec![("", 0, 0)]);
    }

    #[test]
    fn offsets_count_characters() {
        let spans = segment("שלום עולם");
        assert_eq!(bounds(&spans), vec![("שלום", 0, 4), ("עולם", 5, 8)]);
    }

    #[test]
    fn last_word_ends_on_final_character() {
        let text = "Hello there friend";
        let spans = segment(text);
        assert_eq!(spans.last().map(|s| s.end), Some(text.chars().count() - 1));
        assert_eq!(word_index_at(&spans, 18), None);
    }

    #[test]
    fn trailing_space_leaves_empty_last_word() {
        let spans = segment("Hi ");
        assert_eq!(bounds(&spans), vec![("Hi", 0, 2), ("", 3, 3)]);
        assert_eq!(bounds(&segment("x")), vec![("x", 0, 0)]);
    }

    #[test]
    fn spans_strictly_increase_and_never_overlap() {
        let text = "  tea,  with mint and  sugar ";
        let spans = segment(text);
        for pair in spans.windows(2) {
            assert!(pair[0].start < pair[1].start);
            assert!(pair[0].end < pair[1].start);
        }
        assert_eq!(segment(text), spans);
    }
}
