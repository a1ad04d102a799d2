use std::collections::HashSet;
use std::ops::Range;

use docai_core::config::{OverlapPolicy, PrivacyConfig};
use docai_core::errors::{DocaiError, DocaiResult};
use docai_core::models::{EntityLabel, EntitySpan};

/// Replaces sensitive spans with a fixed token.
///
/// Spans are applied from the end of the text towards the start, so every
/// offset is interpreted against the original string and never drifts.
#[derive(Debug, Clone)]
pub struct Redactor {
    sensitive: HashSet<EntityLabel>,
    token: String,
    policy: OverlapPolicy,
}

impl Redactor {
    pub fn new<I, L>(sensitive: I, token: impl Into<String>, policy: OverlapPolicy) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<EntityLabel>,
    {
        Self {
            sensitive: sensitive.into_iter().map(Into::into).collect(),
            token: token.into(),
            policy,
        }
    }

    pub fn from_config(config: &PrivacyConfig) -> Self {
        Self::new(
            config.sensitive_labels.iter().cloned(),
            config.replacement_token.clone(),
            config.overlap_policy,
        )
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_sensitive(&self, label: &EntityLabel) -> bool {
        self.sensitive.contains(label)
    }

    /// The spans `redact` would apply: sensitive ones only, start descending.
    pub fn applicable<'a>(&self, spans: &'a [EntitySpan]) -> Vec<&'a EntitySpan> {
        let mut kept: Vec<&EntitySpan> =
            spans.iter().filter(|s| self.is_sensitive(&s.label)).collect();
        kept.sort_by(|a, b| b.start.cmp(&a.start));
        kept
    }

    /// Rewrite `text`, replacing each sensitive span with the token.
    ///
    /// Every sensitive span must satisfy `start < end <= text.len()` with both
    /// offsets on `char` boundaries of `text`; otherwise the call fails with
    /// `InvalidInput` and nothing is rewritten.
    pub fn redact(&self, text: &str, spans: &[EntitySpan]) -> DocaiResult<String> {
        let _span = docai_observability::redaction_span!(text.len()).entered();
        let applicable = self.applicable(spans);
        for span in &applicable {
            validate(text, span)?;
        }

        let ranges = match self.policy {
            OverlapPolicy::Preserve => preserve_ranges(&applicable),
            OverlapPolicy::Merge => merge_ranges(&applicable),
        };

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for range in ranges {
            out.push_str(&text[cursor..range.start]);
            out.push_str(&self.token);
            cursor = range.end;
        }
        out.push_str(&text[cursor..]);
        Ok(out)
    }
}

fn validate(text: &str, span: &EntitySpan) -> DocaiResult<()> {
    if span.start >= span.end || span.end > text.len() {
        return Err(DocaiError::invalid_input(format!(
            "span {}..{} ({}) out of bounds for text of {} bytes",
            span.start,
            span.end,
            span.label,
            text.len()
        )));
    }
    if !text.is_char_boundary(span.start) || !text.is_char_boundary(span.end) {
        return Err(DocaiError::invalid_input(format!(
            "span {}..{} ({}) does not lie on character boundaries",
            span.start, span.end, span.label
        )));
    }
    Ok(())
}

/// Walk spans back to front. A span reaching into text a previous span
/// already replaced only rewrites the parts of it that are still original.
/// Returns disjoint ranges in ascending order.
fn preserve_ranges(descending: &[&EntitySpan]) -> Vec<Range<usize>> {
    let mut covered: Vec<Range<usize>> = Vec::new();
    for span in descending {
        let mut pieces = Vec::new();
        let mut cursor = span.start;
        // Every covered range starts at or after `span.start`.
        for range in &covered {
            if range.start >= span.end {
                break;
            }
            if range.start > cursor {
                pieces.push(cursor..range.start);
            }
            cursor = cursor.max(range.end);
        }
        if cursor < span.end {
            pieces.push(cursor..span.end);
        }
        covered.extend(pieces);
        covered.sort_by_key(|r| r.start);
    }
    covered
}

/// Union overlapping spans, then rewrite each union once.
fn merge_ranges(descending: &[&EntitySpan]) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = Vec::new();
    for span in descending.iter().rev() {
        match ranges.last_mut() {
            Some(last) if span.start < last.end => last.end = last.end.max(span.end),
            _ => ranges.push(span.start..span.end),
        }
    }
    ranges
}
