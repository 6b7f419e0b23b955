use annotation::Span;
use segment::Sentence;
use tracing::debug;

use crate::types::{Concept, CursorPolicy, LabeledToken};

/// Forward-only pointer into a start-ordered span list.
///
/// Token offsets must be fed in document order. The cursor never moves back,
/// so a whole document costs O(tokens + spans).
#[derive(Debug, Clone)]
pub struct SpanCursor<'a> {
    spans: &'a [Span],
    index: usize,
    policy: CursorPolicy,
    last_hit: Option<usize>,
    spans_hit: usize,
}

impl<'a> SpanCursor<'a> {
    pub fn new(spans: &'a [Span], policy: CursorPolicy) -> Self {
        Self {
            spans,
            index: 0,
            policy,
            last_hit: None,
            spans_hit: 0,
        }
    }

    /// Returns the span covering a token that starts at `offset`, if any.
    pub fn span_for(&mut self, offset: usize) -> Option<&'a Span> {
        let hit = match self.policy {
            CursorPolicy::Legacy => {
                let index = self.index;
                let span = self.spans.get(index)?;
                let covered = span.covers(offset);
                if offset > span.stop {
                    self.index += 1;
                }
                covered.then_some((index, span))
            }
            CursorPolicy::Retry => {
                while self
                    .spans
                    .get(self.index)
                    .is_some_and(|span| offset >= span.stop)
                {
                    self.index += 1;
                }
                self.spans
                    .get(self.index)
                    .filter(|span| span.covers(offset))
                    .map(|span| (self.index, span))
            }
        };

        let (index, span) = hit?;
        if self.last_hit != Some(index) {
            self.last_hit = Some(index);
            self.spans_hit += 1;
        }
        Some(span)
    }

    /// Number of distinct spans that labeled at least one token so far.
    pub fn spans_hit(&self) -> usize {
        self.spans_hit
    }
}

/// Labels every non-blank token of `sentences` with the span covering it.
///
/// `spans` must be sorted by start. The result has one entry per sentence;
/// blank tokens are dropped and the rest are numbered from 0 per sentence.
pub fn align(sentences: &[Sentence], spans: &[Span], policy: CursorPolicy) -> Vec<Vec<LabeledToken>> {
    let mut cursor = SpanCursor::new(spans, policy);
    let mut labeled_count = 0usize;

    let labeled: Vec<Vec<LabeledToken>> = sentences
        .iter()
        .enumerate()
        .map(|(sentence_index, sentence)| {
            sentence
                .content_tokens()
                .enumerate()
                .map(|(token_index, token)| {
                    let concept = cursor.span_for(token.offset).map(Concept::from);
                    if concept.is_some() {
                        labeled_count += 1;
                    }
                    LabeledToken {
                        text: token.text.clone(),
                        offset: token.offset,
                        sentence_index,
                        token_index,
                        concept,
                    }
                })
                .collect()
        })
        .collect();

    debug!(
        sentences = sentences.len(),
        spans = spans.len(),
        labeled_tokens = labeled_count,
        unmatched_spans = spans.len() - cursor.spans_hit(),
        policy = ?policy,
        "align_complete"
    );

    labeled
}
