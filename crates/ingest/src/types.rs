use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A document id with whatever halves of its brat pair were found on disk.
///
/// [`discover`](crate::discover) reports incomplete pairs instead of dropping
/// them, so the batch can account for every id; [`load`](crate::load) turns a
/// missing half into [`IngestError::MissingPair`](crate::IngestError::MissingPair).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPair {
    pub doc_id: String,
    pub text_path: Option<PathBuf>,
    pub ann_path: Option<PathBuf>,
}

impl DocumentPair {
    pub fn is_complete(&self) -> bool {
        self.text_path.is_some() && self.ann_path.is_some()
    }
}

/// A loaded document: the raw text plus its raw annotation file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub doc_id: String,
    pub text: String,
    pub annotations: String,
}

impl SourceDocument {
    pub fn new(
        doc_id: impl Into<String>,
        text: impl Into<String>,
        annotations: impl Into<String>,
    ) -> Self {
        Self {
            doc_id: doc_id.into(),
            text: text.into(),
            annotations: annotations.into(),
        }
    }
}
