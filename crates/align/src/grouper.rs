use crate::types::{ConceptGroup, GroupKey, LabeledToken};

/// Collapses labeled tokens into one [`ConceptGroup`] per key per sentence.
///
/// Groups come out in sentence order and, within a sentence, in order of
/// first appearance. A group spans from the smallest to the largest token
/// index of its members; sentences without labeled tokens contribute
/// nothing.
pub fn group(labeled: &[Vec<LabeledToken>], key: GroupKey) -> Vec<ConceptGroup> {
    let mut groups = Vec::new();
    for sentence in labeled {
        group_sentence(sentence, key, &mut groups);
    }
    groups
}

fn group_sentence(tokens: &[LabeledToken], key: GroupKey, groups: &mut Vec<ConceptGroup>) {
    let sentence_start = groups.len();
    for token in tokens {
        let Some(concept) = &token.concept else {
            continue;
        };
        match groups[sentence_start..]
            .iter_mut()
            .find(|group| key.matches(group, concept))
        {
            Some(group) => {
                group.first_token_index = group.first_token_index.min(token.token_index);
                group.last_token_index = group.last_token_index.max(token.token_index);
                // Last member wins, which only matters under `GroupKey::Text`.
                group.label.clone_from(&concept.label);
                group.sentence_index = token.sentence_index;
            }
            None => groups.push(ConceptGroup {
                annotation_text: concept.text.clone(),
                label: concept.label.clone(),
                sentence_index: token.sentence_index,
                first_token_index: token.token_index,
                last_token_index: token.token_index,
            }),
        }
    }
}
