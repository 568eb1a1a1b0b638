//! Query-time retrieval over a document's vector index.

use std::sync::Arc;

use crate::domain::errors::PipelineError;
use crate::domain::models::ScoredChunk;
use crate::domain::ports::EmbeddingService;
use crate::infrastructure::vector::VectorIndex;

/// Embeds questions and looks them up in a write-once index
///
/// Holds a shared handle to the embedder; the same model must have built
/// the index, otherwise similarities are meaningless.
pub struct Retriever {
    index: VectorIndex,
    embedder: Arc<dyn EmbeddingService>,
}

impl Retriever {
    /// Embed `chunks` and build the index
    pub async fn build(
        chunks: &[String],
        embedder: Arc<dyn EmbeddingService>,
    ) -> Result<Self, PipelineError> {
        let index = VectorIndex::build(chunks, embedder.as_ref()).await?;
        Ok(Self { index, embedder })
    }

    /// Chunk texts most similar to `question`, best first
    pub async fn retrieve(&self, question: &str, k: usize) -> Result<Vec<String>, PipelineError> {
        Ok(self
            .retrieve_scored(question, k)
            .await?
            .into_iter()
            .map(|scored| scored.content)
            .collect())
    }

    /// Like [`Self::retrieve`] but keeps positions and similarity scores
    pub async fn retrieve_scored(
        &self,
        question: &str,
        k: usize,
    ) -> Result<Vec<ScoredChunk>, PipelineError> {
        let query = self.embedder.embed(question).await.map_err(|e| {
            PipelineError::Retrieval(format!("embedding the question failed: {e:#}"))
        })?;

        let results = self.index.search(&query, k)?;
        tracing::debug!(
            top_k = k,
            returned = results.len(),
            best_score = results.first().map(|r| r.score),
            "chunks retrieved"
        );

        Ok(results)
    }

    /// Number of indexed chunks
    pub fn chunk_count(&self) -> usize {
        self.index.len()
    }
}
