use tracing::debug;

use crate::error::AnnotationError;
use crate::span::Span;

/// brat record families, identified by the first character of the record id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// `T` records: a label over a character range. The only kind converted.
    TextBound,
    Relation,
    Event,
    Attribute,
    Normalization,
    Note,
    Equivalence,
}

impl RecordKind {
    /// Classifies a record id. Unknown prefixes are treated as text-bound so a
    /// malformed offset field still surfaces as an error instead of vanishing.
    pub fn from_id(id: &str) -> Self {
        match id.chars().next() {
            Some('R') => RecordKind::Relation,
            Some('E') => RecordKind::Event,
            Some('A') | Some('M') => RecordKind::Attribute,
            Some('N') => RecordKind::Normalization,
            Some('#') => RecordKind::Note,
            Some('*') => RecordKind::Equivalence,
            _ => RecordKind::TextBound,
        }
    }
}

/// Decodes a whole `.ann` payload into spans sorted by start offset.
///
/// Ties keep their input order. Lines with fewer than two tab-separated
/// fields and records that are not text-bound are skipped.
///
/// ```rust
/// use annotation::parse_annotations;
///
/// let spans = parse_annotations("T2\tNAME 0 4\tJohn\nT1\tDATE 13 23\t01/02/2020\n").unwrap();
/// assert_eq!(spans[0].label, "NAME");
/// assert_eq!(spans[1].start, 13);
/// ```
pub fn parse_annotations(raw: &str) -> Result<Vec<Span>, AnnotationError> {
    let mut spans = Vec::new();
    for (idx, line) in raw.split('\n').enumerate() {
        if let Some(span) = parse_record(line, idx + 1)? {
            spans.push(span);
        }
    }
    // `sort_by_key` is stable, equal starts stay in file order.
    spans.sort_by_key(|span| span.start);
    Ok(spans)
}

/// Decodes a single record line. `line_no` is only used for error reporting.
///
/// Returns `Ok(None)` for lines that are not text-bound annotation records.
pub fn parse_record(line: &str, line_no: usize) -> Result<Option<Span>, AnnotationError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut fields = line.split('\t');
    let (Some(id), Some(kind_field)) = (fields.next(), fields.next()) else {
        return Ok(None);
    };
    let text = fields.next().unwrap_or_default();

    let kind = RecordKind::from_id(id);
    if kind != RecordKind::TextBound {
        debug!(record_id = id, kind = ?kind, line = line_no, "annotation_record_skipped");
        return Ok(None);
    }

    let parts: Vec<&str> = kind_field.split_whitespace().collect();
    let (label, start_raw, stop_raw) = match parts.as_slice() {
        [label, start, .., stop] => (*label, *start, *stop),
        _ => {
            return Err(AnnotationError::Malformed {
                line: line_no,
                reason: format!("expected `label start stop`, found {kind_field:?}"),
            })
        }
    };

    let start = parse_offset(start_raw, line_no, "start")?;
    let stop = parse_offset(stop_raw, line_no, "stop")?;
    if stop < start {
        return Err(AnnotationError::InvertedSpan {
            line: line_no,
            start,
            stop,
        });
    }

    Ok(Some(Span::new(start, stop, label, text)))
}

fn parse_offset(raw: &str, line_no: usize, which: &str) -> Result<usize, AnnotationError> {
    raw.parse::<usize>().map_err(|err| AnnotationError::Malformed {
        line: line_no,
        reason: format!("{which} offset {raw:?} is not a character offset: {err}"),
    })
}
