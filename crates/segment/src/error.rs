use thiserror::Error;

/// Errors raised by a segmenter or by offset verification of its output.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SegmentError {
    /// An external segmentation backend failed.
    #[error("segmenter failed: {0}")]
    Backend(String),
    /// A token's offset does not point at its own text in the document.
    #[error("token {token:?} does not occur at character offset {offset}")]
    OffsetMismatch { token: String, offset: usize },
    /// Token offsets went backwards; alignment needs document order.
    #[error("token offsets are not monotonic: {offset} follows {previous}")]
    NonMonotonic { previous: usize, offset: usize },
}
