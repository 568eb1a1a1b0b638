//! CLI command implementations.

pub mod ask;
pub mod chunks;
pub mod retrieve;

use anyhow::Result;
use std::path::Path;

use crate::domain::models::{Chunk, ChunkingConfig, Document};
use crate::infrastructure::extraction::load_document;
use crate::infrastructure::vector::Chunker;

/// Extract `path` and split it into chunks
pub(crate) async fn extract_and_chunk(
    path: &Path,
    chunking: &ChunkingConfig,
) -> Result<(Document, Vec<Chunk>)> {
    let document = load_document(path).await?;
    let chunks = Chunker::with_config(chunking.clone()).chunk(&document);
    Ok((document, chunks))
}

/// Chunk texts in index order
pub(crate) fn chunk_texts(chunks: Vec<Chunk>) -> Vec<String> {
    chunks.into_iter().map(|chunk| chunk.content).collect()
}
