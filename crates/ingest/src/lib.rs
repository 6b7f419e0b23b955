//! Brat corpus ingest.
//!
//! A brat directory holds `<id>.txt` documents next to `<id>.ann` standoff
//! annotation files, plus configuration files we do not care about.
//! [`discover`] pairs the files up by id and [`load`] reads one pair into a
//! [`SourceDocument`].
//!
//! A zero-length `.ann` file marks a document nobody annotated; [`load`]
//! returns `Ok(None)` for it and the document is left out of the output.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! for pair in ingest::discover(Path::new("brat/train"))? {
//!     if let Some(doc) = ingest::load(&pair)? {
//!         println!("{}: {} chars", doc.doc_id, doc.text.chars().count());
//!     }
//! }
//! # Ok::<(), ingest::IngestError>(())
//! ```
use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, warn};

mod discover;
mod error;
mod types;

pub use crate::discover::{discover, doc_id_of};
pub use crate::error::IngestError;
pub use crate::types::{DocumentPair, SourceDocument};

/// Reads both halves of a pair.
///
/// Returns `Ok(None)` when the `.ann` file is empty. Both files must be
/// UTF-8; nothing is normalized, since annotation offsets index the text as
/// it is on disk.
pub fn load(pair: &DocumentPair) -> Result<Option<SourceDocument>, IngestError> {
    let start = Instant::now();
    match load_inner(pair) {
        Ok(doc) => {
            let elapsed_micros = start.elapsed().as_micros();
            match &doc {
                Some(doc) => debug!(
                    doc_id = %doc.doc_id,
                    text_bytes = doc.text.len(),
                    ann_bytes = doc.annotations.len(),
                    elapsed_micros,
                    "load_success"
                ),
                None => debug!(doc_id = %pair.doc_id, elapsed_micros, "load_empty_annotations"),
            }
            Ok(doc)
        }
        Err(err) => {
            let elapsed_micros = start.elapsed().as_micros();
            warn!(doc_id = %pair.doc_id, error = %err, elapsed_micros, "load_failure");
            Err(err)
        }
    }
}

fn load_inner(pair: &DocumentPair) -> Result<Option<SourceDocument>, IngestError> {
    let missing = |half: &str| IngestError::MissingPair {
        doc_id: pair.doc_id.clone(),
        missing: half.to_owned(),
    };
    let text_path = pair.text_path.as_deref().ok_or_else(|| missing("txt"))?;
    let ann_path = pair.ann_path.as_deref().ok_or_else(|| missing("ann"))?;

    let annotations = read_utf8(ann_path)?;
    if annotations.is_empty() {
        return Ok(None);
    }
    let text = read_utf8(text_path)?;
    Ok(Some(SourceDocument {
        doc_id: pair.doc_id.clone(),
        text,
        annotations,
    }))
}

fn read_utf8(path: &Path) -> Result<String, IngestError> {
    let bytes = fs::read(path).map_err(|err| IngestError::io(path, &err))?;
    String::from_utf8(bytes).map_err(|err| IngestError::InvalidUtf8 {
        path: path.to_path_buf(),
        reason: err.utf8_error().to_string(),
    })
}
