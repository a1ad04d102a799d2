//! Overlapping, boundary-respecting text chunker.
//!
//! Windows are measured in `char`s, never bytes, so a chunk boundary can
//! never land inside a multi-byte character.

use std::ops::Range;

use docai_core::errors::{DocaiError, DocaiResult};

/// Whether `c` is a place a window may end at without splitting a word.
pub fn is_boundary(c: char) -> bool {
    c.is_whitespace() || matches!(c, '.' | '!' | '?' | '。' | '！' | '？')
}

/// Split `text` into trimmed chunks of at most `chunk_size` characters,
/// consecutive chunks sharing up to `overlap` characters.
///
/// Empty or whitespace-only input yields no chunks. `chunk_size == 0` is
/// rejected with `InvalidInput`.
pub fn split(text: &str, chunk_size: usize, overlap: usize) -> DocaiResult<Vec<String>> {
    let windows = chunk_windows(text, chunk_size, overlap)?;
    Ok(windows
        .into_iter()
        .map(|w| text[w].trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect())
}

/// The untrimmed byte ranges `split` cuts `text` into.
///
/// Ranges start at 0, end at `text.len()`, and each one begins at or before
/// the end of the previous one, so together they cover the whole text.
pub fn chunk_windows(
    text: &str,
    chunk_size: usize,
    overlap: usize,
) -> DocaiResult<Vec<Range<usize>>> {
    if chunk_size == 0 {
        return Err(DocaiError::invalid_input(
            "chunk_size must be greater than zero",
        ));
    }

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let total = chars.len();
    let byte_at = |i: usize| if i >= total { text.len() } else { chars[i].0 };

    let mut windows = Vec::new();
    let mut start = 0;
    while start < total {
        let raw_end = (start + chunk_size).min(total);
        let mut end = raw_end;
        if end < total {
            // The char at `end` is the first one left out of this window.
            while end > start && !is_boundary(chars[end].1) {
                end -= 1;
            }
            if end == start {
                end = raw_end;
            }
        }

        windows.push(byte_at(start)..byte_at(end));

        if end >= total {
            break;
        }
        start = match end.checked_sub(overlap) {
            Some(next) if next > start => next,
            _ => end,
        };
    }
    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_fall_on_spaces() {
        let chunks = split("A B C D E", 3, 1).unwrap();
        assert_eq!(chunks, vec!["A B", "B C", "C D", "D E"]);
    }

    #[test]
    fn empty_and_blank_input_yield_nothing() {
        assert!(split("", 10, 2).unwrap().is_empty());
        assert!(split("   \n\t ", 3, 1).unwrap().is_empty());
    }

    #[test]
    fn short_input_is_one_trimmed_chunk() {
        assert_eq!(split("  hello world  ", 500, 100).unwrap(), vec!["hello world"]);
    }

    #[test]
    fn zero_chunk_size_is_invalid_input() {
        let err = split("abc", 0, 0).unwrap_err();
        assert!(matches!(err, DocaiError::InvalidInput { .. }));
    }

    #[test]
    fn no_boundary_falls_back_to_raw_cut() {
        let chunks = split("abcdefghij", 4, 0).unwrap();
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn overlap_not_smaller_than_size_still_progresses() {
        let chunks = split("abcdefghij", 3, 5).unwrap();
        assert_eq!(chunks, vec!["abc", "def", "ghi", "j"]);
    }

    #[test]
    fn cjk_text_is_cut_on_char_boundaries() {
        let text = "今天天氣很好。我們去公園散步吧！";
        let chunks = split(text, 5, 1).unwrap();
        assert!(!chunks.is_empty());
        for c in &chunks {
            assert!(c.chars().count() <= 5);
            assert!(text.contains(c.as_str()));
        }
    }

    #[test]
    fn fullwidth_punctuation_is_a_boundary() {
        let chunks = split("一二三。四五六七", 5, 0).unwrap();
        assert_eq!(chunks[0], "一二三");
    }
}
