//! The segmentation seam and the two built-in segmenters.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::SegmentError;
use crate::token::{tokenize, Sentence, Token};

/// Turns document text into ordered sentences of ordered tokens.
///
/// Implementations must be deterministic and report character offsets into
/// the text they were given. Closures with the same signature implement the
/// trait, which is how tests feed synthetic token streams.
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Result<Vec<Sentence>, SegmentError>;
}

impl<F> Segmenter for F
where
    F: Fn(&str) -> Result<Vec<Sentence>, SegmentError> + Send + Sync,
{
    fn segment(&self, text: &str) -> Result<Vec<Sentence>, SegmentError> {
        self(text)
    }
}

/// UAX #29 segmentation: sentence boundaries first, then word boundaries
/// inside each sentence.
///
/// Punctuation becomes its own token and whitespace runs come out as blank
/// tokens (which downstream stages skip), close to what statistical NLP
/// tokenizers produce for clinical prose. Pieces glued by `/` or `:` with no
/// whitespace around them are kept whole, so dates (`01/02/2020`), times
/// (`10:30`) and shorthand like `y/o` stay single tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSegmenter;

impl Segmenter for UnicodeSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<Sentence>, SegmentError> {
        let mut offsets = CharOffsets::new(text);
        let mut sentences = Vec::new();
        for (sentence_start, sentence) in text.split_sentence_bound_indices() {
            let tokens = sentence
                .split_word_bound_indices()
                .map(|(word_start, word)| {
                    Token::new(word, offsets.char_offset(sentence_start + word_start))
                })
                .collect();
            sentences.push(Sentence::new(merge_joined(tokens)));
        }
        Ok(sentences)
    }
}

const JOINERS: [&str; 2] = ["/", ":"];

/// Folds `alnum JOINER alnum` runs of adjacent word pieces into one token.
/// Word-bound pieces tile the sentence, so neighbours are always contiguous.
fn merge_joined(tokens: Vec<Token>) -> Vec<Token> {
    let mut merged: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter().peekable();
    while let Some(token) = iter.next() {
        if JOINERS.contains(&token.text.as_str()) {
            let left_ok = merged
                .last()
                .and_then(|prev| prev.text.chars().last())
                .is_some_and(char::is_alphanumeric);
            let right_ok = iter
                .peek()
                .and_then(|next| next.text.chars().next())
                .is_some_and(char::is_alphanumeric);
            if left_ok && right_ok {
                if let (Some(prev), Some(next)) = (merged.last_mut(), iter.next()) {
                    prev.text.push_str(&token.text);
                    prev.text.push_str(&next.text);
                    continue;
                }
            }
        }
        merged.push(token);
    }
    merged
}

/// One sentence per non-blank line, tokens split on whitespace.
///
/// Useful for text that is already tokenized, one sentence per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceSegmenter;

impl Segmenter for WhitespaceSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<Sentence>, SegmentError> {
        let mut sentences = Vec::new();
        let mut line_start = 0usize;
        for line in text.split('\n') {
            let tokens = tokenize(line, line_start);
            if !tokens.is_empty() {
                sentences.push(Sentence::new(tokens));
            }
            // +1 for the consumed '\n'.
            line_start += line.chars().count() + 1;
        }
        Ok(sentences)
    }
}

/// Names the built-in segmenters in configuration files.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SegmenterKind {
    #[default]
    Unicode,
    Whitespace,
}

impl SegmenterKind {
    pub fn build(self) -> Box<dyn Segmenter> {
        match self {
            SegmenterKind::Unicode => Box::new(UnicodeSegmenter),
            SegmenterKind::Whitespace => Box::new(WhitespaceSegmenter),
        }
    }
}

/// Converts increasing byte offsets into character offsets without
/// rescanning the text from the start each time.
struct CharOffsets<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharOffsets<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            byte: 0,
            chars: 0,
        }
    }

    fn char_offset(&mut self, byte: usize) -> usize {
        if byte < self.byte {
            self.byte = 0;
            self.chars = 0;
        }
        self.chars += self.text[self.byte..byte].chars().count();
        self.byte = byte;
        self.chars
    }
}
