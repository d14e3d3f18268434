//! Sentence segmentation for incremental synthesis.
//!
//! Text is cut after every `.`, `!` or `?` that is followed by whitespace or
//! the end of the text. Each piece is trimmed; whatever follows the last
//! terminator is emitted as a final sentence. The split is purely lexical, so
//! abbreviations such as "Dr." end a sentence like any other full stop.

use std::iter::FusedIterator;

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Lazy cursor over the sentences of a text.
///
/// Created by [`split_sentences`]. Yields trimmed slices of the input in the
/// order they appear. Cloning forks the cursor at its current position.
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    text: &'a str,
    pos: usize,
}

/// Split `text` into sentence-sized units suitable for streaming synthesis.
///
/// Empty or whitespace-only text yields nothing, and text without terminal
/// punctuation yields a single trimmed sentence.
pub fn split_sentences(text: &str) -> Sentences<'_> {
    Sentences { text, pos: 0 }
}

impl<'a> Sentences<'a> {
    /// The part of the input not yet consumed.
    pub fn remainder(&self) -> &'a str {
        &self.text[self.pos..]
    }
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.remainder();
        if rest.trim().is_empty() {
            self.pos = self.text.len();
            return None;
        }

        let mut chars = rest.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if !is_terminator(c) {
                continue;
            }
            let at_boundary = match chars.peek() {
                None => true,
                Some(&(_, next)) => next.is_whitespace(),
            };
            if at_boundary {
                let end = i + c.len_utf8();
                self.pos += end;
                return Some(rest[..end].trim());
            }
        }

        // Trailing fragment without terminal punctuation.
        self.pos = self.text.len();
        Some(rest.trim())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.remainder();
        if rest.trim().is_empty() {
            (0, Some(0))
        } else {
            (1, Some(rest.len()))
        }
    }
}

impl FusedIterator for Sentences<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<&str> {
        split_sentences(text).collect()
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        assert!(collect("").is_empty());
        assert!(collect("   \n\t ").is_empty());
    }

    #[test]
    fn test_text_without_terminator_is_one_sentence() {
        assert_eq!(collect("Hello world"), vec!["Hello world"]);
        assert_eq!(collect("  padded words \n"), vec!["padded words"]);
    }

    #[test]
    fn test_each_terminator_ends_a_sentence() {
        assert_eq!(collect("A. B! C?"), vec!["A.", "B!", "C?"]);
    }

    #[test]
    fn test_trailing_fragment_is_emitted() {
        assert_eq!(collect("One. Two"), vec!["One.", "Two"]);
        assert_eq!(collect("Hello world! I am Chirp 3"), vec!["Hello world!", "I am Chirp 3"]);
    }

    #[test]
    fn test_terminator_inside_word_does_not_split() {
        assert_eq!(collect("Pi is 3.14 roughly."), vec!["Pi is 3.14 roughly."]);
        assert_eq!(collect("see example.com now"), vec!["see example.com now"]);
    }

    #[test]
    fn test_consecutive_terminators_keep_all_text() {
        assert_eq!(collect("Wait... really?"), vec!["Wait...", "really?"]);
        assert_eq!(collect("What?! No."), vec!["What?!", "No."]);
    }

    #[test]
    fn test_abbreviations_split_literally() {
        assert_eq!(collect("Dr. Smith is in."), vec!["Dr.", "Smith is in."]);
    }

    #[test]
    fn test_newlines_count_as_whitespace() {
        let text = "\nFirst line.\nSecond line!\n\n* bullet without stop\n";
        assert_eq!(
            collect(text),
            vec!["First line.", "Second line!", "* bullet without stop"]
        );
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(collect("¡Hola mundo! Soy Chirp 3"), vec!["¡Hola mundo!", "Soy Chirp 3"]);
        // Full-width punctuation is not a terminator.
        assert_eq!(collect("你好世界！我是 Chirp 3"), vec!["你好世界！我是 Chirp 3"]);
    }

    #[test]
    fn test_segmenting_twice_is_identical() {
        let text = "Google Cloud TTS is an API. It converts text! Does it stream? Yes";
        let first: Vec<&str> = split_sentences(text).collect();
        let second: Vec<&str> = split_sentences(text).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn test_iterator_is_fused() {
        let mut it = split_sentences("Only one.");
        assert_eq!(it.next(), Some("Only one."));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
        assert_eq!(it.remainder(), "");
    }
}
