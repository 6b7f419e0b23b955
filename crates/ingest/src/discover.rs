use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::IngestError;
use crate::types::DocumentPair;

/// Derives the document id from a file name: everything before the first `.`.
///
/// `note.final.txt` and `note.ann` therefore both belong to `note`.
pub fn doc_id_of(file_name: &str) -> Option<&str> {
    let id = file_name.split('.').next()?;
    (!id.is_empty()).then_some(id)
}

#[derive(Clone, Copy)]
enum Half {
    Text,
    Ann,
}

fn half_of(file_name: &str) -> Option<Half> {
    let ext = Path::new(file_name).extension()?.to_str()?;
    match ext {
        "txt" => Some(Half::Text),
        "ann" => Some(Half::Ann),
        _ => None,
    }
}

/// Lists the `.txt`/`.ann` pairs of a flat brat directory, sorted by id.
///
/// Files with other extensions (`annotation.conf`, `visual.conf`, ...) and
/// subdirectories are ignored. Ids with only one half are still returned,
/// with the other path unset.
pub fn discover(dir: &Path) -> Result<Vec<DocumentPair>, IngestError> {
    if !dir.is_dir() {
        return Err(IngestError::NotADirectory(dir.to_path_buf()));
    }

    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir).map_err(|err| IngestError::io(dir, &err))? {
        let entry = entry.map_err(|err| IngestError::io(dir, &err))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            warn!(path = %path.display(), "non_utf8_file_name_skipped");
            continue;
        };
        files.push((name.to_owned(), path));
    }
    // read_dir order is platform dependent.
    files.sort();

    let mut pairs: BTreeMap<String, DocumentPair> = BTreeMap::new();
    for (name, path) in files {
        let (Some(half), Some(doc_id)) = (half_of(&name), doc_id_of(&name)) else {
            debug!(file = %name, "non_document_file_skipped");
            continue;
        };
        let pair = pairs
            .entry(doc_id.to_owned())
            .or_insert_with(|| DocumentPair {
                doc_id: doc_id.to_owned(),
                text_path: None,
                ann_path: None,
            });
        let slot = match half {
            Half::Text => &mut pair.text_path,
            Half::Ann => &mut pair.ann_path,
        };
        if let Some(existing) = slot.as_ref() {
            warn!(
                doc_id,
                kept = %existing.display(),
                ignored = %path.display(),
                "duplicate_document_id"
            );
        } else {
            *slot = Some(path);
        }
    }

    let pairs: Vec<DocumentPair> = pairs.into_values().collect();
    debug!(
        dir = %dir.display(),
        documents = pairs.len(),
        incomplete = pairs.iter().filter(|pair| !pair.is_complete()).count(),
        "discover_complete"
    );
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).expect("write fixture");
    }

    #[test]
    fn doc_ids_stop_at_first_dot() {
        assert_eq!(doc_id_of("note1.txt"), Some("note1"));
        assert_eq!(doc_id_of("note1.v2.ann"), Some("note1"));
        assert_eq!(doc_id_of(".hidden.txt"), None);
    }

    #[test]
    fn pairs_are_sorted_and_other_files_ignored() {
        let dir = tempdir().expect("tempdir");
        for name in ["b.txt", "b.ann", "a.txt", "a.ann", "annotation.conf", "readme.md"] {
            touch(dir.path(), name, "x");
        }
        fs::create_dir(dir.path().join("c.txt")).expect("subdir");

        let pairs = discover(dir.path()).expect("discover");
        let ids: Vec<&str> = pairs.iter().map(|pair| pair.doc_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(pairs.iter().all(DocumentPair::is_complete));
        assert_eq!(pairs[0].ann_path.as_deref(), Some(dir.path().join("a.ann").as_path()));
    }

    #[test]
    fn lonely_halves_are_reported() {
        let dir = tempdir().expect("tempdir");
        touch(dir.path(), "only_text.txt", "x");
        touch(dir.path(), "only_ann.ann", "x");

        let pairs = discover(dir.path()).expect("discover");
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].doc_id, "only_ann");
        assert!(pairs[0].text_path.is_none());
        assert_eq!(pairs[1].doc_id, "only_text");
        assert!(pairs[1].ann_path.is_none());
    }

    #[test]
    fn duplicate_ids_keep_first_file_name() {
        let dir = tempdir().expect("tempdir");
        touch(dir.path(), "n.txt", "first");
        touch(dir.path(), "n.copy.txt", "second");
        touch(dir.path(), "n.ann", "");

        let pairs = discover(dir.path()).expect("discover");
        assert_eq!(pairs.len(), 1);
        // "n.copy.txt" sorts before "n.txt".
        assert_eq!(pairs[0].text_path.as_deref(), Some(dir.path().join("n.copy.txt").as_path()));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let missing = dir.path().join("nope");
        assert_eq!(discover(&missing), Err(IngestError::NotADirectory(missing)));
    }
}
