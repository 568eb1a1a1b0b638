//! Whitespace-token chunking
//!
//! Greedy packing of whitespace-delimited tokens into chunks whose
//! serialized length (each token plus one separator) stays within a
//! character budget. Tokens are never split, so a single token longer
//! than the budget becomes its own oversized chunk.

use crate::domain::models::{Chunk, ChunkingConfig, Document};

/// Split `text` into chunks of at most `max_chunk_size` serialized characters
///
/// Empty or whitespace-only text yields no chunks. Concatenating the result
/// with single spaces reproduces the original token sequence.
pub fn chunk_text(text: &str, max_chunk_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_length = 0;

    for token in text.split_whitespace() {
        let token_length = token.chars().count() + 1;
        if current_length + token_length > max_chunk_size && !current.is_empty() {
            chunks.push(current.join(" "));
            current.clear();
            current_length = 0;
        }
        current.push(token);
        current_length += token_length;
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    chunks
}

/// Chunks documents with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Chunker {
    config: ChunkingConfig,
}

impl Chunker {
    /// Create a chunker with the given configuration
    pub const fn with_config(config: ChunkingConfig) -> Self {
        Self { config }
    }

    /// Configured character budget per chunk
    pub const fn max_chunk_size(&self) -> usize {
        self.config.max_chunk_size
    }

    /// Chunk a document's text into indexed chunks
    pub fn chunk(&self, document: &Document) -> Vec<Chunk> {
        let chunks: Vec<Chunk> = chunk_text(&document.text, self.config.max_chunk_size)
            .into_iter()
            .enumerate()
            .map(|(index, content)| Chunk::new(index, content))
            .collect();

        tracing::info!(
            document = %document.id,
            chunks = chunks.len(),
            max_chunk_size = self.config.max_chunk_size,
            "document chunked"
        );

        chunks
    }
}
