//! Chunk type definitions.

use serde::{Deserialize, Serialize};

/// A chunk of page content destined for the knowledge base.
///
/// Chunks are the unit of content handed to the ingestion sink. Each chunk
/// keeps its character offsets into the source page for traceability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Order of this chunk within its page (0-indexed)
    pub index: usize,

    /// The actual text content of the chunk
    pub text: String,

    /// Starting character offset in the original page text (inclusive)
    pub start_offset: usize,

    /// Ending character offset in the original page text (exclusive)
    pub end_offset: usize,

    /// Page metadata, copied unchanged onto every chunk of the page
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Length of the chunk in characters.
    pub fn char_len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    /// Identifier used by the ingestion sink: `"{page_id}-{index}"`.
    pub fn chunk_id(&self) -> String {
        format!("{}-{}", self.metadata.page_id, self.index)
    }
}

/// Source metadata attached to every chunk of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// BookStack page id
    pub page_id: i64,

    /// BookStack book id containing the page
    pub book_id: i64,

    /// Page title
    pub title: String,

    /// Page URL in BookStack
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_id_format() {
        let chunk = Chunk {
            index: 3,
            text: "abc".to_string(),
            start_offset: 0,
            end_offset: 3,
            metadata: ChunkMetadata {
                page_id: 101,
                book_id: 2,
                title: "Runbook".to_string(),
                url: "http://wiki/view/101".to_string(),
            },
        };
        assert_eq!(chunk.chunk_id(), "101-3");
        assert_eq!(chunk.char_len(), 3);
    }
}
