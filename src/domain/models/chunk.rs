//! Chunk domain models

use serde::{Deserialize, Serialize};

/// A contiguous run of whitespace-delimited tokens from a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// 0-based position within the document
    pub index: usize,

    /// Tokens joined by single spaces
    pub content: String,
}

impl Chunk {
    /// Create a chunk at the given position
    pub fn new(index: usize, content: impl Into<String>) -> Self {
        Self {
            index,
            content: content.into(),
        }
    }

    /// Serialized length: every token plus one separator
    pub fn serialized_len(&self) -> usize {
        self.content
            .split_whitespace()
            .map(|token| token.chars().count() + 1)
            .sum()
    }

    /// Number of whitespace-delimited tokens
    pub fn token_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// A retrieved chunk together with its similarity to the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// Insertion position of the chunk in the index
    pub index: usize,

    /// Chunk text
    pub content: String,

    /// Cosine similarity in [-1, 1], higher is closer
    pub score: f32,
}
