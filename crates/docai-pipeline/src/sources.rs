//! Rendering retrieved documents for display.

use std::collections::HashSet;

use docai_core::models::RetrievedDocument;

/// Render sources as `**來源：{source}**\n\n{content}` blocks.
///
/// Content is trimmed; empty and repeated contents are dropped.
pub fn format_sources(results: &[RetrievedDocument]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    results
        .iter()
        .filter_map(|doc| {
            let content = doc.content.trim();
            if content.is_empty() || !seen.insert(content) {
                return None;
            }
            Some(format!("**來源：{}**\n\n{}", doc.source(), content))
        })
        .collect()
}

/// First `max_chars` characters of `content`, with `...` when cut.
pub fn preview(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}
