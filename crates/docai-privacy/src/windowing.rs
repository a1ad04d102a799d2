//! Overlapping token windows for encoder models with a fixed position limit.
//!
//! A BERT-style model accepts 512 positions; two of them go to `[CLS]` and
//! `[SEP]`, leaving 510 for text. Longer inputs are split into windows that
//! overlap, and each token keeps the prediction from the window where it sits
//! furthest from an edge.

use std::ops::Range;

use docai_core::errors::DocaiResult;
use docai_core::models::LabeledToken;

/// Text tokens per window, excluding `[CLS]` and `[SEP]`.
pub const MAX_WINDOW_TOKENS: usize = 510;

/// Tokens shared by consecutive windows.
pub const WINDOW_OVERLAP: usize = 128;

/// Ranges of at most `max_tokens` covering `0..len`. Consecutive ranges
/// share `overlap` tokens (clamped below `max_tokens`).
pub fn token_windows(len: usize, max_tokens: usize, overlap: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let max_tokens = max_tokens.max(1);
    let step = max_tokens - overlap.min(max_tokens - 1);

    let mut windows = Vec::new();
    let mut start = 0;
    loop {
        let end = (start + max_tokens).min(len);
        windows.push(start..end);
        if end == len {
            return windows;
        }
        start += step;
    }
}

/// Partition of the covered tokens: the part of each window whose
/// predictions are kept. Overlaps are cut at their midpoint.
pub fn owned_ranges(windows: &[Range<usize>]) -> Vec<Range<usize>> {
    let mut owned = Vec::with_capacity(windows.len());
    for (k, window) in windows.iter().enumerate() {
        let start = match k {
            0 => window.start,
            _ => (window.start + windows[k - 1].end) / 2,
        };
        let end = match windows.get(k + 1) {
            Some(next) => (next.start + window.end) / 2,
            None => window.end,
        };
        owned.push(start..end);
    }
    owned
}

/// Label a token sequence window by window.
///
/// `offsets` are the byte offsets of every text token in the source string.
/// `run` receives one window and returns a `(label, score)` per token in it.
/// Tokens with empty offsets are dropped from the result.
pub fn label_in_windows<F>(
    offsets: &[(usize, usize)],
    max_tokens: usize,
    overlap: usize,
    mut run: F,
) -> DocaiResult<Vec<LabeledToken>>
where
    F: FnMut(Range<usize>) -> DocaiResult<Vec<(String, f64)>>,
{
    let windows = token_windows(offsets.len(), max_tokens, overlap);
    let owned = owned_ranges(&windows);

    let mut tokens = Vec::with_capacity(offsets.len());
    for (window, keep) in windows.into_iter().zip(owned) {
        let base = window.start;
        let predictions = run(window)?;
        for i in keep {
            let (start, end) = offsets[i];
            if start >= end {
                continue;
            }
            if let Some((label, score)) = predictions.get(i - base) {
                tokens.push(LabeledToken::new(label.clone(), start, end, *score));
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_is_one_window() {
        assert_eq!(token_windows(40, MAX_WINDOW_TOKENS, WINDOW_OVERLAP), vec![0..40]);
        assert!(token_windows(0, MAX_WINDOW_TOKENS, WINDOW_OVERLAP).is_empty());
    }

    #[test]
    fn full_size_chunk_splits_into_overlapping_windows() {
        // 500 characters of content plus the file-name header.
        let windows = token_windows(515, MAX_WINDOW_TOKENS, WINDOW_OVERLAP);
        assert_eq!(windows, vec![0..510, 382..515]);
        assert!(windows.iter().all(|w| w.len() <= MAX_WINDOW_TOKENS));
    }

    #[test]
    fn windows_cover_every_token() {
        for len in [1, 509, 510, 511, 1020, 1500, 4096] {
            let windows = token_windows(len, MAX_WINDOW_TOKENS, WINDOW_OVERLAP);
            assert_eq!(windows.first().unwrap().start, 0);
            assert_eq!(windows.last().unwrap().end, len);
            for pair in windows.windows(2) {
                assert_eq!(pair[0].end - pair[1].start, WINDOW_OVERLAP, "len {len}");
            }
        }
    }

    #[test]
    fn overlap_is_clamped_below_window_size() {
        let windows = token_windows(10, 4, 9);
        assert!(windows.iter().all(|w| w.len() <= 4));
        assert_eq!(windows.last().unwrap().end, 10);
    }

    #[test]
    fn owned_ranges_partition_without_gaps() {
        let windows = token_windows(1500, MAX_WINDOW_TOKENS, WINDOW_OVERLAP);
        let owned = owned_ranges(&windows);
        assert_eq!(owned.first().unwrap().start, 0);
        assert_eq!(owned.last().unwrap().end, 1500);
        for pair in owned.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        for (w, o) in windows.iter().zip(&owned) {
            assert!(w.start <= o.start && o.end <= w.end);
        }
    }

    #[test]
    fn offsets_map_back_to_source_text() {
        let text: String = "資".repeat(700);
        let offsets: Vec<(usize, usize)> = text
            .char_indices()
            .map(|(i, c)| (i, i + c.len_utf8()))
            .collect();

        let mut calls = 0;
        let tokens = label_in_windows(&offsets, MAX_WINDOW_TOKENS, WINDOW_OVERLAP, |window| {
            calls += 1;
            assert!(window.len() <= MAX_WINDOW_TOKENS);
            Ok(window.map(|i| (format!("T{i}"), 0.9)).collect())
        })
        .unwrap();

        assert_eq!(calls, 2);
        assert_eq!(tokens.len(), 700);
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(token.label, format!("T{i}"));
            assert_eq!((token.start, token.end), offsets[i]);
            assert_eq!(&text[token.start..token.end], "資");
        }
    }

    #[test]
    fn overlap_keeps_the_more_central_prediction() {
        let offsets: Vec<(usize, usize)> = (0..12).map(|i| (i, i + 1)).collect();
        let mut window_no = 0;
        let tokens = label_in_windows(&offsets, 8, 4, |window| {
            window_no += 1;
            let tag = format!("W{window_no}");
            Ok(window.map(|_| (tag.clone(), 0.5)).collect())
        })
        .unwrap();
        let labels: Vec<&str> = tokens.iter().map(|t| t.label.as_str()).collect();
        // Windows 0..8 and 4..12 overlap on 4..8; the cut falls at 6.
        assert_eq!(labels, ["W1"; 6].into_iter().chain(["W2"; 6]).collect::<Vec<_>>());
    }

    #[test]
    fn empty_offsets_are_skipped_and_errors_propagate() {
        let offsets = [(0, 3), (3, 3), (3, 6)];
        let tokens =
            label_in_windows(&offsets, 8, 2, |w| Ok(w.map(|_| ("O".to_string(), 1.0)).collect()))
                .unwrap();
        assert_eq!(tokens.len(), 2);

        let err = label_in_windows(&offsets, 8, 2, |_| {
            Err(docai_core::errors::ModelError::InferenceFailed {
                reason: "boom".into(),
            }
            .into())
        });
        assert!(err.is_err());
    }
}
