//! Greedy sentence-boundary chunking.
//!
//! The chunker splits a document on the ASCII period and packs consecutive
//! sentence fragments back together while the running character count stays
//! under a target limit. Chunk order is document order, chunks never overlap,
//! and a produced chunk is immutable thereafter.

use serde::{Deserialize, Serialize};

/// Default chunk limit in characters, matching the pipeline's usual
/// retrieval granularity of a few sentences per chunk.
pub const DEFAULT_MAX_CHARS: usize = 100;

/// A bounded excerpt of the source document, the unit of retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Zero-based position in document order. Positional correspondence with
    /// the embedding sequence is how a best-scoring vector is mapped back to
    /// its text.
    pub index: usize,
    /// The chunk text, trimmed of surrounding whitespace, never empty.
    pub text: String,
}

impl Chunk {
    /// Number of Unicode scalar values in the chunk text.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Splits text on periods and greedily packs fragments into bounded chunks.
///
/// A fragment is appended to the running accumulator (with its period
/// restored) while `accumulated_chars + fragment_chars` stays strictly under
/// the limit; otherwise the accumulator is flushed as a completed chunk and
/// restarted from the fragment. A single sentence longer than the limit
/// becomes its own oversized chunk rather than being split mid-sentence.
///
/// Fragments that are empty or whitespace-only after the split (consecutive
/// periods, a trailing period) are skipped, and a flush never emits an empty
/// chunk, so every produced chunk contains visible text. Lengths count
/// Unicode scalar values, not bytes.
///
/// ```rust
/// use ragprobe::chunking::SentenceChunker;
///
/// let chunker = SentenceChunker::new(8);
/// let chunks = chunker.chunk("A is a. B is b. C is c.");
/// let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
/// assert_eq!(texts, ["A is a.", "B is b.", "C is c."]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceChunker {
    max_chars: usize,
}

impl Default for SentenceChunker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHARS)
    }
}

impl SentenceChunker {
    /// Create a chunker with the given character limit.
    ///
    /// A limit of zero degenerates to one sentence per chunk, since no
    /// fragment can ever join an accumulator.
    #[must_use]
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// The configured character limit.
    #[must_use]
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Chunk `text` into ordered, non-empty, bounded excerpts.
    ///
    /// An empty or whitespace-only document yields no chunks. A document
    /// without any period yields a single chunk (with a period restored at
    /// its end, as for every accumulated fragment).
    #[must_use]
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let mut chunks: Vec<Chunk> = Vec::new();
        let mut current = String::new();
        let mut current_chars = 0usize;

        for fragment in text.split('.') {
            if fragment.trim().is_empty() {
                continue;
            }
            let fragment_chars = fragment.chars().count();
            if current_chars + fragment_chars < self.max_chars {
                current.push_str(fragment);
                current.push('.');
                current_chars += fragment_chars + 1;
            } else {
                flush(&mut chunks, &mut current);
                current.push_str(fragment);
                current.push('.');
                current_chars = fragment_chars + 1;
            }
        }
        flush(&mut chunks, &mut current);
        chunks
    }
}

/// Push the trimmed accumulator as a chunk when non-empty, then clear it.
fn flush(chunks: &mut Vec<Chunk>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        chunks.push(Chunk {
            index: chunks.len(),
            text: trimmed.to_string(),
        });
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn wide_limit_packs_everything_into_one_chunk() {
        let chunks = SentenceChunker::new(100).chunk("A is a. B is b. C is c.");
        assert_eq!(texts(&chunks), ["A is a. B is b. C is c."]);
    }

    #[test]
    fn narrow_limit_yields_one_sentence_per_chunk() {
        let chunks = SentenceChunker::new(8).chunk("A is a. B is b. C is c.");
        assert_eq!(texts(&chunks), ["A is a.", "B is b.", "C is c."]);
    }

    #[test]
    fn empty_document_yields_no_chunks() {
        assert!(SentenceChunker::default().chunk("").is_empty());
    }

    #[test]
    fn whitespace_document_yields_no_chunks() {
        assert!(SentenceChunker::default().chunk("  \n\t ").is_empty());
    }

    #[test]
    fn document_without_period_is_a_single_chunk() {
        let chunks = SentenceChunker::default().chunk("hello world");
        assert_eq!(texts(&chunks), ["hello world."]);
    }

    #[test]
    fn consecutive_periods_never_produce_empty_chunks() {
        let chunks = SentenceChunker::new(100).chunk("Hi.. Bye.");
        assert_eq!(texts(&chunks), ["Hi. Bye."]);
    }

    #[test]
    fn trailing_text_after_last_period_is_kept() {
        let chunks = SentenceChunker::new(100).chunk("A is a. tail");
        assert_eq!(texts(&chunks), ["A is a. tail."]);
    }

    #[test]
    fn oversized_sentence_becomes_its_own_chunk() {
        let long = "this single sentence is far longer than the limit allows";
        let text = format!("Short. {long}. Tail.");
        let chunks = SentenceChunker::new(10).chunk(&text);

        assert_eq!(texts(&chunks), ["Short.", &format!("{long}."), "Tail."]);
        assert!(chunks[1].char_count() > 10);
    }

    #[test]
    fn limits_count_chars_not_bytes() {
        // "héé" is 3 chars but 5 bytes; byte accounting would flush early.
        let chunks = SentenceChunker::new(9).chunk("héé. øø.");
        assert_eq!(texts(&chunks), ["héé. øø."]);
    }

    #[test]
    fn zero_limit_degenerates_to_one_sentence_per_chunk() {
        let chunks = SentenceChunker::new(0).chunk("A is a. B is b.");
        assert_eq!(texts(&chunks), ["A is a.", "B is b."]);
    }

    #[test]
    fn indexes_follow_document_order() {
        let chunks = SentenceChunker::new(8).chunk("A is a. B is b. C is c.");
        let indexes: Vec<usize> = chunks.iter().map(|c| c.index).collect();
        assert_eq!(indexes, [0, 1, 2]);
    }

    #[test]
    fn chunking_is_deterministic() {
        let chunker = SentenceChunker::new(24);
        let text = "One sentence. Another one. A third, longer sentence here.";
        assert_eq!(chunker.chunk(text), chunker.chunk(text));
    }
}
