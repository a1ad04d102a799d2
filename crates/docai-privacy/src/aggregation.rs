//! Merge per-token labels into entity spans.
//!
//! Adjacent tokens continuing the same entity (`B-X I-X I-X`) become one
//! span whose confidence is the mean token score. `O` tokens close the
//! current group and are dropped.

use docai_core::models::{EntityLabel, EntitySpan, LabeledToken, SpanSource};

/// BIO/BIOES position marker of a token tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Begin,
    Inside,
    End,
    Single,
    Bare,
}

fn parse_tag(label: &str) -> Option<(Tag, &str)> {
    if label.is_empty() || label == "O" {
        return None;
    }
    let parsed = match label.split_once('-') {
        Some(("B", entity)) => (Tag::Begin, entity),
        Some(("I", entity)) => (Tag::Inside, entity),
        Some(("E", entity)) => (Tag::End, entity),
        Some(("S", entity)) => (Tag::Single, entity),
        _ => (Tag::Bare, label),
    };
    Some(parsed)
}

struct Group<'a> {
    entity: &'a str,
    start: usize,
    end: usize,
    score_sum: f64,
    tokens: usize,
    closed: bool,
}

impl Group<'_> {
    fn into_span(self) -> EntitySpan {
        EntitySpan::new(
            EntityLabel::from(self.entity.to_string()),
            self.start,
            self.end,
            self.score_sum / self.tokens as f64,
            SpanSource::Model,
        )
    }
}

/// Aggregate labeled tokens, in the order the labeler emitted them.
pub fn aggregate(tokens: &[LabeledToken]) -> Vec<EntitySpan> {
    let mut spans = Vec::new();
    let mut current: Option<Group<'_>> = None;

    for token in tokens {
        let Some((tag, entity)) = parse_tag(&token.label) else {
            if let Some(group) = current.take() {
                spans.push(group.into_span());
            }
            continue;
        };

        let continues = matches!(tag, Tag::Inside | Tag::End | Tag::Bare)
            && current
                .as_ref()
                .is_some_and(|g| !g.closed && g.entity == entity);

        if continues {
            if let Some(group) = current.as_mut() {
                group.end = token.end;
                group.score_sum += token.score;
                group.tokens += 1;
                group.closed = tag == Tag::End;
            }
        } else {
            if let Some(group) = current.take() {
                spans.push(group.into_span());
            }
            current = Some(Group {
                entity,
                start: token.start,
                end: token.end,
                score_sum: token.score,
                tokens: 1,
                closed: tag == Tag::Single,
            });
        }
    }

    if let Some(group) = current {
        spans.push(group.into_span());
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(label: &str, start: usize, end: usize, score: f64) -> LabeledToken {
        LabeledToken::new(label, start, end, score)
    }

    #[test]
    fn bio_run_becomes_one_span_with_mean_score() {
        // 許大明 is three 3-byte characters.
        let tokens = vec![
            tok("B-PERSON", 0, 3, 0.9),
            tok("I-PERSON", 3, 6, 0.8),
            tok("I-PERSON", 6, 9, 0.7),
        ];
        let spans = aggregate(&tokens);
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].start, spans[0].end), (0, 9));
        assert_eq!(spans[0].label, EntityLabel::Person);
        assert!((spans[0].confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn outside_tokens_split_groups() {
        let tokens = vec![
            tok("B-ORG", 0, 3, 0.9),
            tok("O", 3, 6, 0.99),
            tok("I-ORG", 6, 9, 0.9),
        ];
        let spans = aggregate(&tokens);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].start, 6);
    }

    #[test]
    fn begin_tag_starts_new_group_even_with_same_label() {
        let tokens = vec![tok("B-PERSON", 0, 3, 0.9), tok("B-PERSON", 3, 6, 0.9)];
        assert_eq!(aggregate(&tokens).len(), 2);
    }

    #[test]
    fn label_change_splits_groups() {
        let tokens = vec![tok("B-ORG", 0, 3, 0.9), tok("I-NORP", 3, 6, 0.9)];
        let spans = aggregate(&tokens);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].label, EntityLabel::Norp);
    }

    #[test]
    fn bioes_end_and_single_close_groups() {
        let tokens = vec![
            tok("B-ORG", 0, 3, 0.9),
            tok("E-ORG", 3, 6, 0.9),
            tok("I-ORG", 6, 9, 0.9),
            tok("S-GPE", 9, 12, 0.9),
            tok("I-GPE", 12, 15, 0.9),
        ];
        let spans = aggregate(&tokens);
        let ranges: Vec<_> = spans.iter().map(|s| (s.start, s.end)).collect();
        assert_eq!(ranges, vec![(0, 6), (6, 9), (9, 12), (12, 15)]);
    }

    #[test]
    fn bare_labels_merge_when_adjacent() {
        let tokens = vec![tok("PER", 0, 3, 1.0), tok("PER", 3, 6, 0.5)];
        let spans = aggregate(&tokens);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].label, EntityLabel::Person);
    }

    #[test]
    fn empty_input_gives_no_spans() {
        assert!(aggregate(&[]).is_empty());
    }
}
