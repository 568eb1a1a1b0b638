//! Port traits the pipeline depends on
//!
//! Infrastructure adapters implement these; services and tests only see
//! the traits, so a fake embedder or completion client can stand in for
//! the real ones.

pub mod completion;
pub mod embedding;
pub mod extractor;

pub use completion::CompletionClient;
pub use embedding::EmbeddingService;
pub use extractor::TextExtractor;
