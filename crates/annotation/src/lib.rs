//! brat standoff annotation decoding.
//!
//! A brat `.ann` file holds one record per line. Text-bound records look like
//!
//! ```text
//! T1<TAB>DATE 13 23<TAB>01/02/2020
//! ```
//!
//! and become a [`Span`] `{start: 13, stop: 23, label: "DATE", text: "01/02/2020"}`.
//! Everything else brat can store (relations, events, attributes, notes) is
//! outside what the i2b2 concept format can express and is skipped.
//!
//! ## Guarantees
//!
//! - Output is sorted ascending by `start`; equal starts keep file order.
//! - Offsets are character offsets, exactly as written in the record.
//! - Spans are not checked for overlap. The aligner assumes they do not.

mod error;
mod parser;
mod span;

pub use crate::error::AnnotationError;
pub use crate::parser::{parse_annotations, parse_record, RecordKind};
pub use crate::span::Span;
