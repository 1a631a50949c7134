// Chunker properties over arbitrary input
//
// Covers lossless reassembly, termination on line-break-only and
// line-break-free content, and the byte ceiling with multi-byte text.

use docfeed::core::indexer::{chunk_content, Chunker};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_concatenation_reproduces_content(content in "(?s).{0,400}", max_bytes in 1usize..64) {
        let chunks = chunk_content(&content, max_bytes);
        prop_assert_eq!(chunks.concat(), content);
    }

    #[test]
    fn prop_no_empty_chunks(content in "(?s).{1,400}", max_bytes in 1usize..64) {
        let chunks = chunk_content(&content, max_bytes);
        prop_assert!(chunks.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn prop_small_content_is_single_chunk(content in "(?s).{0,40}") {
        let max_bytes = content.len().max(1);
        let chunks = chunk_content(&content, max_bytes);
        prop_assert_eq!(chunks, vec![content.as_str()]);
    }

    #[test]
    fn prop_chunks_respect_ceiling(content in "(?s).{0,400}", max_bytes in 4usize..64) {
        // Every char is at most 4 bytes, so a 4-byte ceiling always fits one
        for chunk in chunk_content(&content, max_bytes) {
            prop_assert!(chunk.len() <= max_bytes, "{} > {}", chunk.len(), max_bytes);
        }
    }

    #[test]
    fn prop_newline_only_content_terminates(newlines in 0usize..300, max_bytes in 1usize..16) {
        let content = "\n".repeat(newlines);
        let chunks = chunk_content(&content, max_bytes);
        prop_assert_eq!(chunks.concat(), content);
    }

    #[test]
    fn prop_deterministic(content in "(?s).{0,200}", max_bytes in 1usize..32) {
        prop_assert_eq!(chunk_content(&content, max_bytes), chunk_content(&content, max_bytes));
    }
}

#[test]
fn test_exact_multiple_without_newlines() {
    let content = "x".repeat(30);
    let chunks = chunk_content(&content, 10);

    assert_eq!(chunks, vec!["xxxxxxxxxx"; 3]);
}

#[test]
fn test_prefers_line_break_past_halfway() {
    // Newline at offset 7 > 10 / 2
    let content = "abcdefg\nhijklmnopqrst";
    let chunks = chunk_content(content, 10);

    assert_eq!(chunks[0], "abcdefg\n");
    assert_eq!(chunks.concat(), content);
}

#[test]
fn test_ignores_line_break_before_halfway() {
    // Newline at offset 2 <= 10 / 2, so a hard cut
    let content = "ab\ncdefghijklmnop";
    let chunks = chunk_content(content, 10);

    assert_eq!(chunks[0], "ab\ncdefghi");
}

#[test]
fn test_cyrillic_never_split_mid_character() {
    // 2 bytes per char; an odd ceiling forces boundary flooring
    let content = "Привет мир, это документация плеера".repeat(10);
    let chunker = Chunker::new(7);

    let chunks = chunker.chunk(&content);

    assert_eq!(chunks.concat(), content);
    assert!(chunks.iter().all(|c| c.len() <= 7 && !c.is_empty()));
}

#[test]
fn test_emoji_wider_than_ceiling() {
    let content = "🦀🦀🦀";
    let chunks = chunk_content(content, 2);

    assert_eq!(chunks, vec!["🦀", "🦀", "🦀"]);
}

#[test]
fn test_chunk_text_indices_are_sequential() {
    let chunker = Chunker::new(5);
    let chunks = chunker.chunk_text("0123456789abcde");

    let indices: Vec<usize> = chunks.iter().map(|c| c.chunk_index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn test_last_full_window_breaks_at_line_end() {
    // Remainder after the first cut is exactly 10 bytes
    let content = "# Player\n\nEvents:\nok";
    let chunks = chunk_content(content, 10);

    assert_eq!(chunks, vec!["# Player\n\n", "Events:\n", "ok"]);
}
