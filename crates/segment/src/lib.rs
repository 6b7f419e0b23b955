//! Sentence and token segmentation with character offsets.
//!
//! The aligner consumes a document as ordered sentences of ordered tokens,
//! each token carrying the character offset where it starts in the original
//! text. This crate defines that stream ([`Sentence`], [`Token`]), the
//! [`Segmenter`] seam that produces it, and two deterministic segmenters:
//!
//! - [`UnicodeSegmenter`]: UAX #29 sentence and word boundaries.
//! - [`WhitespaceSegmenter`]: one sentence per line, whitespace-split tokens.
//!
//! Offsets are characters (Unicode scalar values), never bytes, because that
//! is what brat annotation offsets count.
//!
//! ```rust
//! use segment::{Segmenter, UnicodeSegmenter};
//!
//! let sentences = UnicodeSegmenter.segment("Seen today. Stable.").unwrap();
//! assert_eq!(sentences.len(), 2);
//! assert_eq!(sentences[1].tokens[0].offset, 12);
//! ```

mod error;
mod segmenter;
mod token;
mod verify;

pub use crate::error::SegmentError;
pub use crate::segmenter::{Segmenter, SegmenterKind, UnicodeSegmenter, WhitespaceSegmenter};
pub use crate::token::{is_blank, tokenize, Sentence, Token};
pub use crate::verify::verify_offsets;
