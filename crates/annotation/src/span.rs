use serde::{Deserialize, Serialize};

/// A character-range annotation decoded from one text-bound brat record.
///
/// Offsets count Unicode scalar values (characters), not bytes, matching the
/// offsets brat writes. The range is half-open: `start` is covered, `stop`
/// is not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    /// Character offset (inclusive) of the first annotated character.
    pub start: usize,
    /// Character offset (exclusive) one past the last annotated character.
    pub stop: usize,
    /// Entity type assigned by the annotator, e.g. `DATE`.
    pub label: String,
    /// Surface text of the annotation as recorded in the `.ann` file.
    pub text: String,
}

impl Span {
    pub fn new(start: usize, stop: usize, label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            start,
            stop,
            label: label.into(),
            text: text.into(),
        }
    }

    /// Returns true if `offset` falls inside `[start, stop)`.
    pub fn covers(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.stop
    }
}
