//! In-memory exact nearest-neighbor index
//!
//! Brute-force cosine similarity over every stored vector. Documents here
//! are a few hundred chunks at most, so a linear scan is fast enough and
//! exact. The index is write-once: built from a complete chunk set and
//! never mutated afterwards, which makes shared reads safe.

use crate::domain::errors::PipelineError;
use crate::domain::models::ScoredChunk;
use crate::domain::ports::EmbeddingService;

/// Immutable collection of (embedding, chunk text) pairs in insertion order
#[derive(Debug, Clone)]
pub struct VectorIndex {
    entries: Vec<(Vec<f32>, String)>,
    dimensions: usize,
}

impl VectorIndex {
    /// Embed every chunk with one batch call and index the results
    pub async fn build(
        chunks: &[String],
        embedder: &dyn EmbeddingService,
    ) -> Result<Self, PipelineError> {
        if chunks.is_empty() {
            return Err(PipelineError::IndexBuild(
                "document produced no chunks to index".to_string(),
            ));
        }

        let texts: Vec<&str> = chunks.iter().map(String::as_str).collect();
        let vectors = embedder.embed_batch(&texts).await.map_err(|e| {
            PipelineError::IndexBuild(format!("embedding chunks failed: {e:#}"))
        })?;

        if vectors.len() != chunks.len() {
            return Err(PipelineError::IndexBuild(format!(
                "embedder returned {} vectors for {} chunks",
                vectors.len(),
                chunks.len()
            )));
        }

        let index = Self::from_parts(vectors.into_iter().zip(chunks.iter().cloned()).collect())?;

        tracing::info!(
            chunks = index.len(),
            dimensions = index.dimensions,
            model = embedder.model_id(),
            "vector index built"
        );

        Ok(index)
    }

    /// Index precomputed vectors; all must share one non-zero dimensionality
    pub fn from_parts(entries: Vec<(Vec<f32>, String)>) -> Result<Self, PipelineError> {
        let Some(dimensions) = entries.first().map(|(vector, _)| vector.len()) else {
            return Err(PipelineError::IndexBuild(
                "document produced no chunks to index".to_string(),
            ));
        };

        if dimensions == 0 {
            return Err(PipelineError::IndexBuild("embedding vectors are empty".to_string()));
        }

        if let Some(position) = entries.iter().position(|(v, _)| v.len() != dimensions) {
            return Err(PipelineError::IndexBuild(format!(
                "vector {position} has {} dimensions, expected {dimensions}",
                entries[position].0.len()
            )));
        }

        Ok(Self { entries, dimensions })
    }

    /// Up to `k` entries most similar to `query`, best first
    ///
    /// Equal scores keep insertion order. `k` beyond the index size returns
    /// every entry; `k == 0` returns none.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>, PipelineError> {
        if query.len() != self.dimensions {
            return Err(PipelineError::Retrieval(format!(
                "query has {} dimensions, index has {}",
                query.len(),
                self.dimensions
            )));
        }

        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, (vector, content))| ScoredChunk {
                index,
                content: content.clone(),
                score: cosine_similarity(query, vector),
            })
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);

        Ok(scored)
    }

    /// Number of indexed chunks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a built index
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dimensionality shared by every stored vector
    pub const fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Cosine similarity in [-1, 1]; 0.0 when either vector has zero length
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    dot / (mag_a * mag_b)
}
