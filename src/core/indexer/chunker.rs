//! Byte-bounded, line-preferring text chunking.
//!
//! Every index record has a hard size limit, so long documents are
//! split into pieces of at most `max_bytes` bytes. When a line break
//! falls in the second half of a candidate piece, the cut is moved
//! to just after it so lines are not split in the middle.
//!
//! Chunks are slices of the input: concatenating them in order gives
//! back the original text byte for byte.
//!
//! # Example
//!
//! ```
//! use docfeed::core::indexer::Chunker;
//!
//! let chunker = Chunker::new(8);
//! let chunks = chunker.chunk("line one\nline two\n");
//!
//! assert_eq!(chunks.concat(), "line one\nline two\n");
//! assert!(chunks.iter().all(|c| !c.is_empty()));
//! ```

use crate::core::types::Chunk;

/// Splits document content into byte-bounded chunks.
#[derive(Debug, Clone)]
pub struct Chunker {
    /// Soft ceiling on chunk size in bytes
    max_bytes: usize,
}

impl Chunker {
    /// Create a new chunker.
    ///
    /// # Panics
    ///
    /// Panics if `max_bytes` is 0.
    pub fn new(max_bytes: usize) -> Self {
        assert!(max_bytes > 0, "max_bytes must be > 0");

        Self { max_bytes }
    }

    /// Get the chunk size ceiling in bytes.
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Split `content` into ordered text slices.
    pub fn chunk<'a>(&self, content: &'a str) -> Vec<&'a str> {
        chunk_content(content, self.max_bytes)
    }

    /// Split `content` into indexed chunks.
    pub fn chunk_text<'a>(&self, content: &'a str) -> Vec<Chunk<'a>> {
        self.chunk(content)
            .into_iter()
            .enumerate()
            .map(|(chunk_index, text)| Chunk { text, chunk_index })
            .collect()
    }
}

/// Split `content` into chunks of at most `max_bytes` bytes.
///
/// Content that already fits (including the empty string) comes back
/// as a single chunk. Otherwise each cut is made after the last `\n`
/// in the candidate window when that newline sits past the halfway
/// mark, and at the raw size limit when it does not. Only a final
/// remainder shorter than `max_bytes` is taken without that search.
///
/// Cuts never land inside a UTF-8 sequence. A character wider than
/// `max_bytes` is emitted whole, so the limit is a soft one and the
/// loop always makes progress.
pub fn chunk_content(content: &str, max_bytes: usize) -> Vec<&str> {
    if content.len() <= max_bytes {
        return vec![content];
    }

    let max_bytes = max_bytes.max(1);
    let mut chunks = Vec::with_capacity(content.len() / max_bytes + 1);
    let mut rest = content;

    while !rest.is_empty() {
        // A remainder of exactly max_bytes still gets the newline search
        let cut = if rest.len() < max_bytes {
            rest.len()
        } else {
            let window = floor_char_boundary(rest, max_bytes);
            if window == 0 {
                ceil_char_boundary(rest, 1)
            } else {
                match rest[..window].rfind('\n') {
                    Some(idx) if idx > max_bytes / 2 => idx + 1,
                    _ => window,
                }
            }
        };

        let (head, tail) = rest.split_at(cut);
        chunks.push(head);
        rest = tail;
    }

    chunks
}

/// Largest char boundary `<= index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Smallest char boundary `>= index`.
fn ceil_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i += 1;
    }
    i
}
