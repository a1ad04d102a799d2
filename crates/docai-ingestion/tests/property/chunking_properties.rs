use docai_ingestion::chunker::{chunk_windows, split};
use proptest::prelude::*;

fn mixed_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z]{1,12}",
            "[一-龥]{1,8}",
            Just(" ".to_string()),
            Just(". ".to_string()),
            Just("。".to_string()),
            Just("\n".to_string()),
        ],
        0..60,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn chunks_never_exceed_chunk_size(
        text in mixed_text(),
        size in 1usize..40,
        overlap in 0usize..50,
    ) {
        for chunk in split(&text, size, overlap).unwrap() {
            prop_assert!(chunk.chars().count() <= size, "chunk too long: {:?}", chunk);
        }
    }

    #[test]
    fn windows_cover_the_whole_text(
        text in mixed_text(),
        size in 1usize..40,
        overlap in 0usize..50,
    ) {
        let windows = chunk_windows(&text, size, overlap).unwrap();
        if text.is_empty() {
            prop_assert!(windows.is_empty());
        } else {
            prop_assert_eq!(windows[0].start, 0);
            prop_assert_eq!(windows[windows.len() - 1].end, text.len());
            for pair in windows.windows(2) {
                prop_assert!(pair[1].start <= pair[0].end);
                prop_assert!(pair[1].start > pair[0].start);
            }
        }
    }

    #[test]
    fn every_chunk_is_a_slice_of_the_input(
        text in mixed_text(),
        size in 1usize..40,
        overlap in 0usize..50,
    ) {
        for chunk in split(&text, size, overlap).unwrap() {
            prop_assert!(!chunk.is_empty());
            prop_assert!(text.contains(chunk.as_str()));
        }
    }

    #[test]
    fn short_input_is_a_single_chunk(text in "[a-z ]{1,20}") {
        let chunks = split(&text, 50, 10).unwrap();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            prop_assert!(chunks.is_empty());
        } else {
            prop_assert_eq!(chunks, vec![trimmed.to_string()]);
        }
    }
}
