use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::EmitError;

pub const DEFAULT_CONCEPT_DIR: &str = "con";
pub const DEFAULT_TEXT_DIR: &str = "txt";

/// Rendered contents of one document, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub doc_id: String,
    /// Contents of `<id>.con`.
    pub concepts: String,
    /// Contents of `<id>.txt`.
    pub text: String,
}

/// Where output files go: `<root>/<concept_dir>/<id>.con` and
/// `<root>/<text_dir>/<id>.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
    concept_dir: String,
    text_dir: String,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            concept_dir: DEFAULT_CONCEPT_DIR.to_owned(),
            text_dir: DEFAULT_TEXT_DIR.to_owned(),
        }
    }

    pub fn with_dirs(mut self, concept_dir: impl Into<String>, text_dir: impl Into<String>) -> Self {
        self.concept_dir = concept_dir.into();
        self.text_dir = text_dir.into();
        self
    }

    pub fn concept_dir(&self) -> PathBuf {
        self.root.join(&self.concept_dir)
    }

    pub fn text_dir(&self) -> PathBuf {
        self.root.join(&self.text_dir)
    }

    pub fn concept_path(&self, doc_id: &str) -> PathBuf {
        self.concept_dir().join(format!("{doc_id}.con"))
    }

    pub fn text_path(&self, doc_id: &str) -> PathBuf {
        self.text_dir().join(format!("{doc_id}.txt"))
    }

    /// Creates the root and both subdirectories if they are missing.
    pub fn prepare(&self) -> Result<(), EmitError> {
        for dir in [self.concept_dir(), self.text_dir()] {
            fs::create_dir_all(&dir).map_err(|err| EmitError::create_dir(&dir, &err))?;
        }
        Ok(())
    }
}

/// Paths produced by [`write_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub concept_path: PathBuf,
    pub text_path: PathBuf,
}

/// Writes both output files of a document.
///
/// Each file is written to a uniquely named temporary sibling and renamed
/// into place, so readers never observe a truncated file and concurrent runs
/// never share a temporary. If the text file cannot be
/// written, the concept file written just before is removed again and the
/// document leaves nothing behind. The layout directories must already
/// exist (see [`OutputLayout::prepare`]).
pub fn write_document(layout: &OutputLayout, doc: &RenderedDocument) -> Result<WrittenFiles, EmitError> {
    validate_doc_id(&doc.doc_id)?;
    let concept_path = layout.concept_path(&doc.doc_id);
    let text_path = layout.text_path(&doc.doc_id);

    write_atomic(&concept_path, doc.concepts.as_bytes())?;
    if let Err(err) = write_atomic(&text_path, doc.text.as_bytes()) {
        // Best effort; the write error is what gets reported.
        let _ = fs::remove_file(&concept_path);
        return Err(err);
    }

    debug!(
        doc_id = %doc.doc_id,
        concept_path = %concept_path.display(),
        text_path = %text_path.display(),
        concept_bytes = doc.concepts.len(),
        text_bytes = doc.text.len(),
        "document_written"
    );
    Ok(WrittenFiles {
        concept_path,
        text_path,
    })
}

fn validate_doc_id(doc_id: &str) -> Result<(), EmitError> {
    let bad = doc_id.is_empty()
        || doc_id == "."
        || doc_id == ".."
        || doc_id.contains(['/', '\\', '\0']);
    if bad {
        return Err(EmitError::InvalidDocId(doc_id.to_owned()));
    }
    Ok(())
}

/// Removes the output files an earlier run left for `doc_id`.
///
/// Missing files are fine. Returns whether anything was removed.
pub fn remove_document(layout: &OutputLayout, doc_id: &str) -> Result<bool, EmitError> {
    validate_doc_id(doc_id)?;
    let mut removed = false;
    for path in [layout.concept_path(doc_id), layout.text_path(doc_id)] {
        match fs::remove_file(&path) {
            Ok(()) => removed = true,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(EmitError::io(&path, &err)),
        }
    }
    if removed {
        debug!(doc_id, "stale_output_removed");
    }
    Ok(removed)
}

fn write_atomic(target: &Path, bytes: &[u8]) -> Result<(), EmitError> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(|err| EmitError::io(target, &err))?;
    tmp.write_all(bytes).map_err(|err| EmitError::io(target, &err))?;
    tmp.as_file()
        .sync_all()
        .map_err(|err| EmitError::io(target, &err))?;
    // On failure the temporary is handed back and deleted when dropped.
    tmp.persist(target)
        .map_err(|err| EmitError::io(target, &err.error))?;
    Ok(())
}
