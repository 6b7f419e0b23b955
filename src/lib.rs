//! Workspace umbrella crate for brat2i2b2.
//!
//! This crate stitches the stage crates together: brat ingest, annotation
//! parsing, segmentation, span alignment and i2b2 emission. Callers convert a
//! single in-memory document with [`convert_document`] or a whole brat
//! directory with [`convert_directory`].
//!
//! ```rust
//! use brat2i2b2::{convert_document, ConvertOptions, SourceDocument, UnicodeSegmenter};
//!
//! let doc = SourceDocument::new(
//!     "note1",
//!     "Patient seen 01/02/2020 today.",
//!     "T1\tDATE 13 23\t01/02/2020\n",
//! );
//! let rendered = convert_document(&doc, &UnicodeSegmenter, &ConvertOptions::default())?;
//! assert_eq!(rendered.concepts, "c=\"01/02/2020\" 1:2 1:2||t=\"DATE\"\n");
//! assert_eq!(rendered.text, "Patient seen 01/02/2020 today .\n");
//! # Ok::<(), brat2i2b2::PipelineError>(())
//! ```

pub use align::{
    align, group, Concept, ConceptGroup, CursorPolicy, GroupKey, LabeledToken, SpanCursor,
};
pub use annotation::{parse_annotations, AnnotationError, Span};
pub use emit::{
    remove_document, render_concepts, render_text, write_document, EmitError, OutputLayout,
    RenderedDocument, WrittenFiles, DEFAULT_CONCEPT_DIR, DEFAULT_TEXT_DIR,
};
pub use ingest::{discover, load, DocumentPair, IngestError, SourceDocument};
pub use segment::{
    verify_offsets, Segmenter, SegmenterKind, SegmentError, Sentence, Token, UnicodeSegmenter,
    WhitespaceSegmenter,
};

mod batch;
pub mod config;

pub use crate::batch::{convert_directory, BatchReport, DocumentFailure};
pub use crate::config::{ConfigLoadError, ConverterConfig};

use std::error::Error;
use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, warn, Level};

/// Errors that can occur while converting a document or a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    Ingest(IngestError),
    Annotation(AnnotationError),
    Segment(SegmentError),
    Emit(EmitError),
    /// The output root or its subdirectories could not be created. Fatal for
    /// a directory run.
    OutputRoot(EmitError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Ingest(err) => write!(f, "ingest failure: {err}"),
            PipelineError::Annotation(err) => write!(f, "malformed annotation: {err}"),
            PipelineError::Segment(err) => write!(f, "segmentation failure: {err}"),
            PipelineError::Emit(err) => write!(f, "output failure: {err}"),
            PipelineError::OutputRoot(err) => write!(f, "output root unusable: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Ingest(err) => Some(err),
            PipelineError::Annotation(err) => Some(err),
            PipelineError::Segment(err) => Some(err),
            PipelineError::Emit(err) | PipelineError::OutputRoot(err) => Some(err),
        }
    }
}

impl From<IngestError> for PipelineError {
    fn from(value: IngestError) -> Self {
        PipelineError::Ingest(value)
    }
}

impl From<AnnotationError> for PipelineError {
    fn from(value: AnnotationError) -> Self {
        PipelineError::Annotation(value)
    }
}

impl From<SegmentError> for PipelineError {
    fn from(value: SegmentError) -> Self {
        PipelineError::Segment(value)
    }
}

impl From<EmitError> for PipelineError {
    fn from(value: EmitError) -> Self {
        PipelineError::Emit(value)
    }
}

/// Knobs shared by [`convert_document`] and [`convert_directory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    pub cursor: CursorPolicy,
    pub group_by: GroupKey,
    pub concept_dir: String,
    pub text_dir: String,
    /// Convert documents on the rayon pool. Only honored with the
    /// `parallel` feature.
    pub parallel: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            cursor: CursorPolicy::default(),
            group_by: GroupKey::default(),
            concept_dir: DEFAULT_CONCEPT_DIR.to_string(),
            text_dir: DEFAULT_TEXT_DIR.to_string(),
            parallel: false,
        }
    }
}

impl ConvertOptions {
    pub fn layout(&self, root: &std::path::Path) -> OutputLayout {
        OutputLayout::new(root).with_dirs(self.concept_dir.clone(), self.text_dir.clone())
    }
}

/// Convert one loaded document into its rendered `.con` and `.txt` contents.
///
/// Pure: nothing is read or written. Fails on the first malformed annotation
/// line, on segmenter failure, or when the segmenter reports offsets that do
/// not match the text.
pub fn convert_document<S>(
    doc: &SourceDocument,
    segmenter: &S,
    options: &ConvertOptions,
) -> Result<RenderedDocument, PipelineError>
where
    S: Segmenter + ?Sized,
{
    let start = Instant::now();
    let span = tracing::span!(Level::INFO, "brat2i2b2.convert", doc_id = %doc.doc_id);
    let _guard = span.enter();

    match convert_inner(doc, segmenter, options) {
        Ok((rendered, stats)) => {
            let elapsed_micros = start.elapsed().as_micros();
            info!(
                spans = stats.spans,
                sentences = stats.sentences,
                concepts = stats.concepts,
                elapsed_micros,
                "convert_success"
            );
            Ok(rendered)
        }
        Err(err) => {
            let elapsed_micros = start.elapsed().as_micros();
            warn!(error = %err, elapsed_micros, "convert_failure");
            Err(err)
        }
    }
}

struct ConvertStats {
    spans: usize,
    sentences: usize,
    concepts: usize,
}

fn convert_inner<S>(
    doc: &SourceDocument,
    segmenter: &S,
    options: &ConvertOptions,
) -> Result<(RenderedDocument, ConvertStats), PipelineError>
where
    S: Segmenter + ?Sized,
{
    let spans = parse_annotations(&doc.annotations)?;
    let sentences = segmenter.segment(&doc.text)?;
    verify_offsets(&doc.text, &sentences)?;

    let labeled = align(&sentences, &spans, options.cursor);
    let groups = group(&labeled, options.group_by);

    let stats = ConvertStats {
        spans: spans.len(),
        sentences: sentences.len(),
        concepts: groups.len(),
    };
    let rendered = RenderedDocument {
        doc_id: doc.doc_id.clone(),
        concepts: render_concepts(&groups),
        text: render_text(&sentences),
    };
    Ok((rendered, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient_seen(annotations: &str) -> SourceDocument {
        SourceDocument::new("note", "Patient seen 01/02/2020 today.", annotations)
    }

    #[test]
    fn converts_patient_scenario() {
        let doc = patient_seen("T1\tDATE 13 23\t01/02/2020\n");
        let rendered =
            convert_document(&doc, &UnicodeSegmenter, &ConvertOptions::default()).expect("convert");
        assert_eq!(rendered.doc_id, "note");
        assert_eq!(rendered.concepts, "c=\"01/02/2020\" 1:2 1:2||t=\"DATE\"\n");
        assert_eq!(rendered.text, "Patient seen 01/02/2020 today .\n");
    }

    #[test]
    fn annotation_without_records_renders_empty_concepts() {
        let doc = patient_seen("#1\tAnnotatorNotes T1\tchecked\n");
        let rendered =
            convert_document(&doc, &UnicodeSegmenter, &ConvertOptions::default()).expect("convert");
        assert!(rendered.concepts.is_empty());
        assert!(!rendered.text.is_empty());
    }

    #[test]
    fn malformed_annotation_fails_document() {
        let doc = patient_seen("T1\tDATE thirteen 23\t01/02/2020\n");
        let err = convert_document(&doc, &UnicodeSegmenter, &ConvertOptions::default())
            .expect_err("malformed offsets");
        assert!(matches!(
            err,
            PipelineError::Annotation(AnnotationError::Malformed { line: 1, .. })
        ));
        assert!(err.source().is_some());
    }

    #[test]
    fn segmenter_failure_is_wrapped() {
        let failing = |_: &str| -> Result<Vec<Sentence>, SegmentError> {
            Err(SegmentError::Backend("model unavailable".into()))
        };
        let doc = patient_seen("T1\tDATE 13 23\t01/02/2020\n");
        let err = convert_document(&doc, &failing, &ConvertOptions::default())
            .expect_err("backend failure");
        assert_eq!(
            err,
            PipelineError::Segment(SegmentError::Backend("model unavailable".into()))
        );
        assert!(err.to_string().starts_with("segmentation failure"));
    }

    #[test]
    fn offset_drift_from_segmenter_is_caught() {
        let drifting = |_: &str| -> Result<Vec<Sentence>, SegmentError> {
            Ok(vec![Sentence::new(vec![Token::new("Patient", 1)])])
        };
        let doc = patient_seen("T1\tDATE 13 23\t01/02/2020\n");
        let err = convert_document(&doc, &drifting, &ConvertOptions::default())
            .expect_err("offset mismatch");
        assert!(matches!(
            err,
            PipelineError::Segment(SegmentError::OffsetMismatch { .. })
        ));
    }

    #[test]
    fn whitespace_segmenter_uses_line_sentences() {
        let doc = SourceDocument::new(
            "lines",
            "Seen by Dr. Jones\nat Mercy\n",
            "T1\tNAME 12 17\tJones\nT2\tHOSPITAL 21 26\tMercy\n",
        );
        let rendered =
            convert_document(&doc, &WhitespaceSegmenter, &ConvertOptions::default()).expect("convert");
        assert_eq!(
            rendered.concepts,
            "c=\"Jones\" 1:3 1:3||t=\"NAME\"\nc=\"Mercy\" 2:1 2:1||t=\"HOSPITAL\"\n"
        );
        assert_eq!(rendered.text, "Seen by Dr. Jones\nat Mercy\n");
    }

    #[test]
    fn group_key_changes_collapsing() {
        let doc = SourceDocument::new(
            "paris",
            "Paris met Paris",
            "T1\tNAME 0 5\tParis\nT2\tLOCATION 10 15\tParis\n",
        );
        let by_text =
            convert_document(&doc, &UnicodeSegmenter, &ConvertOptions::default()).expect("convert");
        assert_eq!(by_text.concepts, "c=\"Paris\" 1:0 1:2||t=\"LOCATION\"\n");

        let options = ConvertOptions {
            group_by: GroupKey::LabelAndText,
            ..ConvertOptions::default()
        };
        let by_pair = convert_document(&doc, &UnicodeSegmenter, &options).expect("convert");
        assert_eq!(
            by_pair.concepts,
            "c=\"Paris\" 1:0 1:0||t=\"NAME\"\nc=\"Paris\" 1:2 1:2||t=\"LOCATION\"\n"
        );
    }

    #[test]
    fn pipeline_error_from_conversions() {
        let err: PipelineError = IngestError::NotADirectory("x".into()).into();
        assert!(matches!(err, PipelineError::Ingest(_)));
        let err: PipelineError = EmitError::InvalidDocId("..".into()).into();
        assert!(matches!(err, PipelineError::Emit(_)));
    }
}
