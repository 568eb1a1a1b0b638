//! Vector infrastructure components
//!
//! Chunking, local sentence embeddings, the shared model registry and the
//! in-memory similarity index used for retrieval.

pub mod bert_model;
pub mod chunker;
pub mod model_registry;
pub mod vector_index;

pub use bert_model::BertEmbeddingModel;
pub use chunker::{chunk_text, Chunker};
pub use model_registry::ModelRegistry;
pub use vector_index::{cosine_similarity, VectorIndex};
