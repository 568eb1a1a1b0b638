//! Embedding domain models

use serde::{Deserialize, Serialize};

/// Sentence-embedding models the pipeline can load
///
/// Both are BERT-architecture sentence-transformers producing 384-dim
/// mean-pooled, L2-normalized vectors. Vectors from different models are
/// not comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EmbeddingModel {
    /// all-MiniLM-L6-v2
    /// - Dimensions: 384
    /// - Size: ~90MB
    #[default]
    #[serde(rename = "all-minilm-l6-v2", alias = "minilm")]
    AllMiniLmL6V2,

    /// all-MiniLM-L12-v2
    /// - Dimensions: 384
    /// - Size: ~130MB, slower but slightly better recall
    #[serde(rename = "all-minilm-l12-v2")]
    AllMiniLmL12V2,
}

impl EmbeddingModel {
    /// Returns the vector dimensions for this model
    pub const fn dimensions(self) -> usize {
        match self {
            Self::AllMiniLmL6V2 | Self::AllMiniLmL12V2 => 384,
        }
    }

    /// Returns the HuggingFace repository id
    pub const fn repo_id(self) -> &'static str {
        match self {
            Self::AllMiniLmL6V2 => "sentence-transformers/all-MiniLM-L6-v2",
            Self::AllMiniLmL12V2 => "sentence-transformers/all-MiniLM-L12-v2",
        }
    }
}

impl std::fmt::Display for EmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllMiniLmL6V2 => write!(f, "all-MiniLM-L6-v2"),
            Self::AllMiniLmL12V2 => write!(f, "all-MiniLM-L12-v2"),
        }
    }
}
