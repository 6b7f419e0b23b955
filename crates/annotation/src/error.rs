//! Error types produced while decoding annotation records.
//!
//! Lines that do not look like annotation records at all (blank lines,
//! comments, anything without a tab separator) are skipped rather than
//! reported. An error is raised only for a line that claims to be a
//! text-bound record but whose offsets cannot be trusted.
//!
//! | Error | Raised when |
//! |-------|-------------|
//! | [`Malformed`](AnnotationError::Malformed) | start/stop missing or not a non-negative integer |
//! | [`InvertedSpan`](AnnotationError::InvertedSpan) | stop offset precedes start offset |
use thiserror::Error;

/// Errors that can occur while parsing a brat `.ann` payload.
///
/// Line numbers are 1-based so they can be matched against an editor view of
/// the offending file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnnotationError {
    /// A text-bound record whose offset field cannot be decoded.
    ///
    /// ```rust
    /// use annotation::{parse_annotations, AnnotationError};
    ///
    /// let err = parse_annotations("T1\tDATE thirteen 23\t01/02/2020").unwrap_err();
    /// assert!(matches!(err, AnnotationError::Malformed { line: 1, .. }));
    /// ```
    #[error("malformed annotation on line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    /// A record whose stop offset is smaller than its start offset.
    #[error("annotation on line {line} ends before it starts ({start} > {stop})")]
    InvertedSpan {
        line: usize,
        start: usize,
        stop: usize,
    },
}

impl AnnotationError {
    /// Line (1-based) of the record that failed to decode.
    pub fn line(&self) -> usize {
        match self {
            AnnotationError::Malformed { line, .. } | AnnotationError::InvertedSpan { line, .. } => {
                *line
            }
        }
    }
}
