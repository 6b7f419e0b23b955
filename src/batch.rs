//! Directory conversion.

use std::path::Path;
use std::time::Instant;

use serde::{Serialize, Serializer};
use tracing::{info, warn, Level};

use crate::{
    convert_document, discover, load, remove_document, write_document, ConvertOptions,
    DocumentPair, OutputLayout, PipelineError, Segmenter,
};

/// A document that could not be converted. The batch carries on without it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentFailure {
    pub doc_id: String,
    #[serde(serialize_with = "serialize_display")]
    pub error: PipelineError,
}

/// Outcome of [`convert_directory`]. Every list is sorted by document id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub converted: Vec<String>,
    /// Documents whose `.ann` file was empty. No output is written for them.
    pub skipped_empty: Vec<String>,
    pub failures: Vec<DocumentFailure>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.converted.len() + self.skipped_empty.len() + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

fn serialize_display<S: Serializer>(err: &PipelineError, ser: S) -> Result<S::Ok, S::Error> {
    ser.collect_str(err)
}

enum Outcome {
    Converted,
    SkippedEmpty,
    Failed(PipelineError),
}

/// Convert every `.txt`/`.ann` pair under `input` into `output`.
///
/// The output directories are created first; if that fails, or `input`
/// cannot be listed, the whole run fails. After that, per-document problems
/// (an incomplete pair, a malformed `.ann`, a write error) are logged and
/// collected in the report, and leave no files behind for that document.
/// Skipped and failed documents also lose whatever output an earlier run
/// wrote for them.
pub fn convert_directory<S>(
    input: &Path,
    output: &Path,
    segmenter: &S,
    options: &ConvertOptions,
) -> Result<BatchReport, PipelineError>
where
    S: Segmenter + ?Sized,
{
    let start = Instant::now();
    let layout = options.layout(output);
    layout.prepare().map_err(PipelineError::OutputRoot)?;

    let pairs = discover(input)?;
    let outcomes = run_all(&pairs, &layout, segmenter, options);

    let mut report = BatchReport::default();
    for (pair, outcome) in pairs.iter().zip(outcomes) {
        let doc_id = pair.doc_id.clone();
        match outcome {
            Outcome::Converted => report.converted.push(doc_id),
            Outcome::SkippedEmpty => report.skipped_empty.push(doc_id),
            Outcome::Failed(error) => report.failures.push(DocumentFailure { doc_id, error }),
        }
    }

    info!(
        input = %input.display(),
        output = %output.display(),
        documents = report.total(),
        converted = report.converted.len(),
        skipped_empty = report.skipped_empty.len(),
        failed = report.failures.len(),
        elapsed_micros = start.elapsed().as_micros(),
        "batch_complete"
    );
    Ok(report)
}

#[cfg(feature = "parallel")]
fn run_all<S>(
    pairs: &[DocumentPair],
    layout: &OutputLayout,
    segmenter: &S,
    options: &ConvertOptions,
) -> Vec<Outcome>
where
    S: Segmenter + ?Sized,
{
    use rayon::prelude::*;

    if options.parallel {
        // Indexed collect keeps discovery order.
        pairs
            .par_iter()
            .map(|pair| convert_pair(pair, layout, segmenter, options))
            .collect()
    } else {
        pairs
            .iter()
            .map(|pair| convert_pair(pair, layout, segmenter, options))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn run_all<S>(
    pairs: &[DocumentPair],
    layout: &OutputLayout,
    segmenter: &S,
    options: &ConvertOptions,
) -> Vec<Outcome>
where
    S: Segmenter + ?Sized,
{
    if options.parallel {
        warn!("parallel_unavailable");
    }
    pairs
        .iter()
        .map(|pair| convert_pair(pair, layout, segmenter, options))
        .collect()
}

fn convert_pair<S>(
    pair: &DocumentPair,
    layout: &OutputLayout,
    segmenter: &S,
    options: &ConvertOptions,
) -> Outcome
where
    S: Segmenter + ?Sized,
{
    let span = tracing::span!(Level::INFO, "brat2i2b2.document", doc_id = %pair.doc_id);
    let _guard = span.enter();

    let doc = match load(pair) {
        Ok(Some(doc)) => doc,
        Ok(None) => {
            info!(reason = "empty_annotations", "document_skipped");
            return match remove_document(layout, &pair.doc_id) {
                Ok(_) => Outcome::SkippedEmpty,
                Err(err) => failed(err.into()),
            };
        }
        Err(err) => return discard_stale(layout, &pair.doc_id, err.into()),
    };

    let written = convert_document(&doc, segmenter, options)
        .and_then(|rendered| write_document(layout, &rendered).map_err(PipelineError::from));
    match written {
        Ok(files) => {
            info!(
                concept_path = %files.concept_path.display(),
                text_path = %files.text_path.display(),
                "document_converted"
            );
            Outcome::Converted
        }
        Err(err) => discard_stale(layout, &pair.doc_id, err),
    }
}

/// Fails the document and removes its output from an earlier run.
fn discard_stale(layout: &OutputLayout, doc_id: &str, err: PipelineError) -> Outcome {
    if let Err(cleanup) = remove_document(layout, doc_id) {
        warn!(error = %cleanup, "stale_output_kept");
    }
    failed(err)
}

fn failed(err: PipelineError) -> Outcome {
    warn!(error = %err, "document_failed");
    Outcome::Failed(err)
}
