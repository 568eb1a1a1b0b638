pub mod chunk;
pub mod completion;
pub mod config;
pub mod document;
pub mod embedding;

pub use chunk::{Chunk, ScoredChunk};
pub use completion::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, ResponseMessage, Usage,
};
pub use config::{
    ChunkingConfig, Config, EmbeddingConfig, GenerationConfig, LogFormat, LoggingConfig,
    RetrievalConfig, RotationPolicy,
};
pub use document::Document;
pub use embedding::EmbeddingModel;
