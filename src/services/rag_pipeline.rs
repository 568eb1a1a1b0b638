//! Retrieval-augmented answering over one indexed document.

use std::sync::Arc;

use crate::domain::errors::PipelineError;
use crate::domain::models::{Config, ScoredChunk};
use crate::domain::ports::{CompletionClient, EmbeddingService};
use crate::infrastructure::completion::{GroqClient, GroqClientConfig};
use crate::infrastructure::vector::ModelRegistry;

use super::answer_generator::AnswerGenerator;
use super::prompt_assembler;
use super::retriever::Retriever;

/// A document's retriever plus the generator that answers from it
///
/// Only a fully built pipeline exists: construction either completes the
/// whole index or fails. Queries take `&self`, so a failed question leaves
/// the pipeline ready for the next one.
pub struct RagPipeline {
    retriever: Retriever,
    generator: AnswerGenerator,
    top_k: usize,
}

impl RagPipeline {
    /// Build with the configured completion client and the shared embedder
    ///
    /// The credential and the chunk set are checked before the model is
    /// touched.
    pub async fn from_config(config: &Config, chunks: &[String]) -> Result<Self, PipelineError> {
        let api_key = config.generation.require_api_key()?;
        if chunks.is_empty() {
            return Err(PipelineError::IndexBuild(
                "document produced no chunks to index".to_string(),
            ));
        }
        let client = GroqClient::new(GroqClientConfig::from_generation(&config.generation, api_key))
            .map_err(|e| PipelineError::Configuration(format!("cannot create completion client: {e}")))?;

        let embedder =
            ModelRegistry::shared(config.embedding.model, config.embedding.cache_dir.clone()).await?;

        Self::with_components(config, chunks, embedder, Arc::new(client)).await
    }

    /// Build from injected components
    pub async fn with_components(
        config: &Config,
        chunks: &[String],
        embedder: Arc<dyn EmbeddingService>,
        client: Arc<dyn CompletionClient>,
    ) -> Result<Self, PipelineError> {
        config.generation.require_api_key()?;

        let retriever = Retriever::build(chunks, embedder).await?;
        let generator = AnswerGenerator::new(client, &config.generation);

        tracing::info!(
            chunks = retriever.chunk_count(),
            top_k = config.retrieval.top_k,
            "pipeline ready"
        );

        Ok(Self {
            retriever,
            generator,
            top_k: config.retrieval.top_k,
        })
    }

    /// Answer `question` from the indexed document
    #[tracing::instrument(skip(self))]
    pub async fn answer(&self, question: &str) -> Result<String, PipelineError> {
        let context = self.retriever.retrieve(question, self.top_k).await?;
        let prompt = prompt_assembler::assemble(question, &context);
        self.generator.generate(&prompt).await
    }

    /// Top-k chunks for `question` with their scores, without generating
    pub async fn retrieve(&self, question: &str) -> Result<Vec<ScoredChunk>, PipelineError> {
        self.retriever.retrieve_scored(question, self.top_k).await
    }

    /// Number of indexed chunks
    pub fn chunk_count(&self) -> usize {
        self.retriever.chunk_count()
    }
}
