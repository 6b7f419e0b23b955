use align::ConceptGroup;
use segment::Sentence;

/// Formats one concept line, without the trailing newline.
///
/// Sentence numbers are written 1-based; token indices stay 0-based.
///
/// ```rust
/// use align::ConceptGroup;
/// use emit::concept_line;
///
/// let group = ConceptGroup {
///     annotation_text: "01/02/2020".into(),
///     label: "DATE".into(),
///     sentence_index: 0,
///     first_token_index: 2,
///     last_token_index: 2,
/// };
/// assert_eq!(concept_line(&group), r#"c="01/02/2020" 1:2 1:2||t="DATE""#);
/// ```
pub fn concept_line(group: &ConceptGroup) -> String {
    let line_no = group.sentence_index + 1;
    format!(
        "c=\"{}\" {}:{} {}:{}||t=\"{}\"",
        group.annotation_text,
        line_no,
        group.first_token_index,
        line_no,
        group.last_token_index,
        group.label
    )
}

/// Renders a whole `.con` file: one newline-terminated line per group.
pub fn render_concepts(groups: &[ConceptGroup]) -> String {
    let mut out = String::with_capacity(groups.len() * 48);
    for group in groups {
        out.push_str(&concept_line(group));
        out.push('\n');
    }
    out
}

/// Renders the `.txt` companion: one line per sentence, tokens joined by a
/// single space.
///
/// Blank tokens and tokens containing a newline are left out. A sentence
/// with nothing left still gets its (empty) line, so line numbers keep
/// matching the sentence numbers of the concept file.
pub fn render_text(sentences: &[Sentence]) -> String {
    let mut out = String::new();
    for sentence in sentences {
        let mut first = true;
        for token in sentence.content_tokens() {
            if token.text.contains('\n') {
                continue;
            }
            if !first {
                out.push(' ');
            }
            out.push_str(&token.text);
            first = false;
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use segment::Token;

    fn group(text: &str, label: &str, sentence: usize, first: usize, last: usize) -> ConceptGroup {
        ConceptGroup {
            annotation_text: text.into(),
            label: label.into(),
            sentence_index: sentence,
            first_token_index: first,
            last_token_index: last,
        }
    }

    #[test]
    fn concept_lines_are_one_based_on_sentence() {
        let groups = vec![
            group("John Hill", "NAME", 0, 1, 2),
            group("Mercy", "HOSPITAL", 3, 0, 0),
        ];
        assert_eq!(
            render_concepts(&groups),
            "c=\"John Hill\" 1:1 1:2||t=\"NAME\"\nc=\"Mercy\" 4:0 4:0||t=\"HOSPITAL\"\n"
        );
    }

    #[test]
    fn no_groups_renders_empty_file() {
        assert_eq!(render_concepts(&[]), "");
    }

    #[test]
    fn text_rendering_matches_patient_scenario() {
        let sentences = vec![Sentence::new(vec![
            Token::new("Patient", 0),
            Token::new(" ", 7),
            Token::new("seen", 8),
            Token::new(" ", 12),
            Token::new("01/02/2020", 13),
            Token::new(" ", 23),
            Token::new("today", 24),
            Token::new(".", 29),
        ])];
        assert_eq!(render_text(&sentences), "Patient seen 01/02/2020 today .\n");
    }

    #[test]
    fn tokens_with_newlines_are_dropped() {
        let sentences = vec![
            Sentence::new(vec![
                Token::new("a", 0),
                Token::new("b\nc", 2),
                Token::new("\n\n", 5),
                Token::new("d", 7),
            ]),
            Sentence::new(vec![Token::new("\n", 8)]),
            Sentence::new(vec![Token::new("e", 9)]),
        ];
        assert_eq!(render_text(&sentences), "a d\n\ne\n");
    }
}
