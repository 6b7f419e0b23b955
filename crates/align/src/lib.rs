//! Span-to-token alignment and concept grouping.
//!
//! Two passes turn character spans into i2b2 token ranges:
//!
//! 1. [`align`] merges a start-ordered span list against a token stream with a
//!    single forward cursor and labels each non-blank token with the span
//!    covering its first character (`[start, stop)`).
//! 2. [`group`] collapses the labeled tokens of each sentence into
//!    `(sentence, first token, last token)` ranges.
//!
//! ```rust
//! use align::{align, group, CursorPolicy, GroupKey};
//! use annotation::Span;
//! use segment::{Sentence, Token};
//!
//! let sentences = vec![Sentence::new(vec![
//!     Token::new("Seen", 0),
//!     Token::new("01/02/2020", 5),
//! ])];
//! let spans = vec![Span::new(5, 15, "DATE", "01/02/2020")];
//!
//! let labeled = align(&sentences, &spans, CursorPolicy::Retry);
//! let groups = group(&labeled, GroupKey::Text);
//! assert_eq!(groups[0].first_token_index, 1);
//! assert_eq!(groups[0].label, "DATE");
//! ```
//!
//! Spans are assumed sorted and non-overlapping; nothing here validates that,
//! and neither pass can fail.

mod aligner;
mod grouper;
mod types;

pub use crate::aligner::{align, SpanCursor};
pub use crate::grouper::group;
pub use crate::types::{Concept, ConceptGroup, CursorPolicy, GroupKey, LabeledToken};
