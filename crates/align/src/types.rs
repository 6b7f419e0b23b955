use annotation::Span;
use serde::{Deserialize, Serialize};

/// The `(label, text)` pair a token inherits from the span covering it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Concept {
    pub label: String,
    pub text: String,
}

impl From<&Span> for Concept {
    fn from(span: &Span) -> Self {
        Self {
            label: span.label.clone(),
            text: span.text.clone(),
        }
    }
}

/// A non-blank token after alignment.
///
/// `sentence_index` and `token_index` are 0-based; `token_index` counts only
/// non-blank tokens and restarts at 0 in every sentence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabeledToken {
    pub text: String,
    pub offset: usize,
    pub sentence_index: usize,
    pub token_index: usize,
    pub concept: Option<Concept>,
}

impl LabeledToken {
    pub fn label(&self) -> Option<&str> {
        self.concept.as_ref().map(|c| c.label.as_str())
    }
}

/// A run of labeled tokens collapsed to a token range within one sentence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConceptGroup {
    pub annotation_text: String,
    pub label: String,
    pub sentence_index: usize,
    pub first_token_index: usize,
    pub last_token_index: usize,
}

/// How the span cursor moves past a span it has finished with.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CursorPolicy {
    /// Advance past every span the token has reached the end of, then test
    /// the same token against the new current span.
    #[default]
    Retry,
    /// Advance by at most one span, and only after a token lies strictly past
    /// the current span's stop. The token that triggers the advance is not
    /// tested against the next span. Matches legacy converter output.
    Legacy,
}

/// What makes two labeled tokens of one sentence part of the same group.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    /// Annotated surface text only. Same text under different labels
    /// collapses into one group carrying the last label seen.
    #[default]
    Text,
    /// Label and annotated surface text together.
    LabelAndText,
}

impl GroupKey {
    pub(crate) fn matches(self, group: &ConceptGroup, concept: &Concept) -> bool {
        match self {
            GroupKey::Text => group.annotation_text == concept.text,
            GroupKey::LabelAndText => {
                group.annotation_text == concept.text && group.label == concept.label
            }
        }
    }
}
