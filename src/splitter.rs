//! Character-window chunk splitter.
//!
//! Pure computation: no I/O, no suspension points, identical output for
//! identical input.

use crate::types::{Chunk, ChunkConfig, ChunkMetadata};

/// Splits page text into bounded, overlapping character windows.
pub struct ChunkSplitter;

impl ChunkSplitter {
    /// Split `text` into chunks of at most `chunk_size` characters.
    ///
    /// Windows start at multiples of the stride (`chunk_size - chunk_overlap`)
    /// and are clamped to the end of the text, so consecutive chunks repeat
    /// `chunk_overlap` characters and the final chunk may be shorter. Offsets
    /// are 0-based character indices; `end_offset` is exclusive.
    ///
    /// Empty text yields no chunks. Text that fits in a single window yields
    /// exactly one chunk covering the whole text; this is also what stops the
    /// window from ever failing to advance.
    pub fn split(text: &str, config: &ChunkConfig) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every char boundary; bounds[char_count] == text.len().
        // Lets the window arithmetic run in character space while slicing
        // stays on valid UTF-8 boundaries.
        let mut bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        bounds.push(text.len());
        let char_count = bounds.len() - 1;

        let size = config.chunk_size();
        if char_count <= size {
            return vec![Chunk {
                index: 0,
                text: text.to_string(),
                start_offset: 0,
                end_offset: char_count,
                metadata: ChunkMetadata::default(),
            }];
        }

        let stride = config.stride();
        let mut chunks = Vec::new();
        let mut start = 0;
        while start < char_count {
            let end = (start + size).min(char_count);
            chunks.push(Chunk {
                index: chunks.len(),
                text: text[bounds[start]..bounds[end]].to_string(),
                start_offset: start,
                end_offset: end,
                metadata: ChunkMetadata::default(),
            });
            start += stride;
        }
        chunks
    }
}
