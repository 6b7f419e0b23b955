//! Error types produced by the ingest crate.
//!
//! I/O failures are flattened to a path plus message so every variant stays
//! cloneable and comparable, which keeps batch reports and tests simple.
//!
//! ```rust
//! use ingest::IngestError;
//!
//! let err = IngestError::MissingPair {
//!     doc_id: "note7".into(),
//!     missing: "ann".into(),
//! };
//! assert_eq!(err.to_string(), "document note7 has no .ann counterpart");
//! ```
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while discovering or loading brat documents.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    /// The input path is not a readable directory.
    #[error("input {0} is not a directory")]
    NotADirectory(PathBuf),

    /// Only one half of a `.txt`/`.ann` pair exists.
    #[error("document {doc_id} has no .{missing} counterpart")]
    MissingPair { doc_id: String, missing: String },

    /// A file could not be decoded as UTF-8.
    #[error("{path} is not valid UTF-8: {reason}")]
    InvalidUtf8 { path: PathBuf, reason: String },

    /// Reading a file or listing the directory failed.
    #[error("cannot read {path}: {reason}")]
    Io { path: PathBuf, reason: String },
}

impl IngestError {
    pub(crate) fn io(path: &Path, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }
}
