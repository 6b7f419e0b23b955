use serde::{Deserialize, Serialize};

/// A token with its character offset in the original document text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// Surface text exactly as it appears in the document.
    pub text: String,
    /// Character (Unicode scalar) offset of the first character.
    pub offset: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, offset: usize) -> Self {
        Self {
            text: text.into(),
            offset,
        }
    }

    /// True for tokens that consist only of whitespace (or nothing at all).
    /// Such tokens are never numbered, aligned or emitted.
    pub fn is_blank(&self) -> bool {
        is_blank(&self.text)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}

/// An ordered run of tokens forming one sentence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sentence {
    pub tokens: Vec<Token>,
}

impl Sentence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Tokens that take part in numbering and alignment.
    pub fn content_tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|token| !token.is_blank())
    }
}

impl FromIterator<Token> for Sentence {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

/// Returns true if `text` is empty or made only of Unicode whitespace.
pub fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Splits `text` on Unicode whitespace and reports character offsets.
///
/// `base` is added to every offset, so a caller can tokenize a slice of a
/// larger document and still get document-level offsets.
pub fn tokenize(text: &str, base: usize) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start: Option<(usize, usize)> = None;

    for (char_idx, (byte_idx, ch)) in text.char_indices().enumerate() {
        if ch.is_whitespace() {
            if let Some((byte_start, char_start)) = start.take() {
                tokens.push(Token::new(&text[byte_start..byte_idx], base + char_start));
            }
        } else if start.is_none() {
            start = Some((byte_idx, char_idx));
        }
    }

    if let Some((byte_start, char_start)) = start {
        tokens.push(Token::new(&text[byte_start..], base + char_start));
    }

    tokens
}
