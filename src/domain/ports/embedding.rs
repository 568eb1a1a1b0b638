//! Embedding service port for semantic vector generation.

use anyhow::Result;
use async_trait::async_trait;

/// Service for turning text into dense vectors
///
/// Implementations must be deterministic for a given model: the same text
/// always yields the same vector, and every vector has `dimensions()`
/// components.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Generate embedding for a single text
    ///
    /// # Arguments
    /// * `text` - The input text to embed
    ///
    /// # Returns
    /// * `Ok(Vec<f32>)` - The embedding vector
    /// * `Err(_)` - If embedding generation fails
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts, one vector per input in order
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Number of components in every produced vector
    fn dimensions(&self) -> usize;

    /// Identifier of the underlying model (for logs and output)
    fn model_id(&self) -> &str;
}
