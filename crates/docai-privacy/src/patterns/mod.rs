pub mod contact;

use docai_core::config::PatternOffsets;
use docai_core::models::{EntityLabel, EntitySpan, SpanSource};

use contact::ContactPattern;

/// A pattern match before it becomes an `EntitySpan`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMatch {
    pub pattern_name: &'static str,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
    pub base_confidence: f64,
}

/// Run every contact pattern over `text`: all phone matches, then all email
/// matches, each group in scan order.
pub fn scan_all(text: &str, offsets: PatternOffsets) -> Vec<RawMatch> {
    let mut matches = Vec::new();
    for pat in contact::all_patterns() {
        collect_matches(text, &pat, offsets, &mut matches);
    }
    matches
}

/// Scan `text` and turn every match into a pattern-sourced span.
pub fn detect(text: &str, offsets: PatternOffsets) -> Vec<EntitySpan> {
    scan_all(text, offsets)
        .into_iter()
        .map(|m| EntitySpan::new(m.label, m.start, m.end, m.base_confidence, SpanSource::Pattern))
        .collect()
}

/// Names of patterns whose regex failed to compile.
pub fn failed_patterns() -> Vec<&'static str> {
    contact::all_patterns()
        .into_iter()
        .filter(|p| p.regex.is_none())
        .map(|p| p.name)
        .collect()
}

fn collect_matches(
    text: &str,
    pat: &ContactPattern,
    offsets: PatternOffsets,
    out: &mut Vec<RawMatch>,
) {
    let Some(re) = pat.regex.as_ref() else { return };
    let label = pat.label();
    for m in re.find_iter(text) {
        let start = match offsets {
            // The first occurrence is never after the match itself.
            PatternOffsets::FirstOccurrence => text.find(m.as_str()).unwrap_or(m.start()),
            PatternOffsets::MatchPosition => m.start(),
        };
        out.push(RawMatch {
            pattern_name: pat.name,
            label: label.clone(),
            start,
            end: start + m.len(),
            base_confidence: pat.base_confidence,
        });
    }
}
