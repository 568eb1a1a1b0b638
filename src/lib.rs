//! docqa - question answering over a single document
//!
//! A minimal retrieval-augmented generation pipeline: a document's text is
//! split into chunks, embedded with a local sentence-transformer, indexed
//! for cosine similarity, and each question is answered by a remote chat
//! model from the most relevant chunks.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, port traits and the error taxonomy
//! - **Service Layer** (`services`): Retrieval, prompt assembly, generation, session lifecycle
//! - **Infrastructure Layer** (`infrastructure`): Embeddings, vector index, HTTP client, extraction, config, logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use docqa::infrastructure::config::ConfigLoader;
//! use docqa::services::RagPipeline;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ConfigLoader::load()?;
//! let chunks = docqa::infrastructure::vector::chunk_text(
//!     "The cat sat on the mat. The dog ran in the park.",
//!     config.chunking.max_chunk_size,
//! );
//! let pipeline = RagPipeline::from_config(&config, &chunks).await?;
//! println!("{}", pipeline.answer("Where did the cat sit?").await?);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{CompletionError, PipelineError};
pub use domain::models::{Chunk, Config, Document, EmbeddingModel, ScoredChunk};
pub use services::{DocumentSession, RagPipeline};
