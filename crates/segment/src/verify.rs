use crate::error::SegmentError;
use crate::token::Sentence;

/// Checks that a token stream is usable for alignment: every non-blank
/// token's text must occur in `text` at its reported character offset, and
/// offsets must not decrease across the document.
///
/// Alignment silently produces wrong labels on a stream that violates either
/// rule, so the pipeline runs this on whatever segmenter it was given.
pub fn verify_offsets(text: &str, sentences: &[Sentence]) -> Result<(), SegmentError> {
    let char_starts: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
    let mut previous: Option<usize> = None;

    for token in sentences.iter().flat_map(|s| s.content_tokens()) {
        if let Some(prev) = previous {
            if token.offset < prev {
                return Err(SegmentError::NonMonotonic {
                    previous: prev,
                    offset: token.offset,
                });
            }
        }
        previous = Some(token.offset);

        let matches = char_starts
            .get(token.offset)
            .is_some_and(|&byte| text[byte..].starts_with(token.text.as_str()));
        if !matches {
            return Err(SegmentError::OffsetMismatch {
                token: token.text.clone(),
                offset: token.offset,
            });
        }
    }

    Ok(())
}
