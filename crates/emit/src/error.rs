use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures while writing i2b2 output files.
///
/// I/O errors are kept as path plus message so the type stays cloneable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EmitError {
    /// Creating an output directory failed.
    #[error("cannot create output directory {path}: {reason}")]
    CreateDir { path: PathBuf, reason: String },
    /// Writing or renaming an output file failed.
    #[error("cannot write {path}: {reason}")]
    Io { path: PathBuf, reason: String },
    /// Document ids become file names and must not escape the layout.
    #[error("document id {0:?} is not a valid file stem")]
    InvalidDocId(String),
}

impl EmitError {
    pub(crate) fn create_dir(path: &Path, err: &std::io::Error) -> Self {
        Self::CreateDir {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn io(path: &Path, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }

    /// Path the failure is about, when there is one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::CreateDir { path, .. } | Self::Io { path, .. } => Some(path),
            Self::InvalidDocId(_) => None,
        }
    }
}
