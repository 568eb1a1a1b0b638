//! Domain errors for the document question-answering pipeline.

use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced by the retrieval pipeline.
///
/// Every variant maps to one stage of the pipeline so callers can decide
/// what to do (retry, re-upload, fix configuration) by matching on the tag
/// rather than parsing the message.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Required configuration is missing or unusable
    #[error("Configuration failure: {0}")]
    Configuration(String),

    /// The document text could not be extracted
    #[error("Failed to extract text from document: {0}")]
    Extraction(String),

    /// The embedding model could not be loaded or run
    #[error("Embedding model unavailable: {0}")]
    Embedding(String),

    /// The vector index could not be built
    #[error("Failed to build vector index: {0}")]
    IndexBuild(String),

    /// Relevant chunks could not be retrieved for a question
    #[error("Failed to retrieve relevant chunks: {0}")]
    Retrieval(String),

    /// The completion service failed to produce an answer
    #[error("Failed to generate answer: {0}")]
    Generation(#[from] CompletionError),
}

impl PipelineError {
    /// Short, stable name of the failure kind (used in JSON output and logs)
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Extraction(_) => "extraction",
            Self::Embedding(_) => "embedding",
            Self::IndexBuild(_) => "index_build",
            Self::Retrieval(_) => "retrieval",
            Self::Generation(_) => "generation",
        }
    }
}

/// Errors returned by the remote chat-completion service
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Invalid request parameters (HTTP 400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid or missing API key (HTTP 401)
    #[error("Invalid API key - authentication failed")]
    InvalidApiKey,

    /// Forbidden - permission denied (HTTP 403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Unknown model or endpoint (HTTP 404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded - too many requests")]
    RateLimitExceeded,

    /// Server error from the completion service (HTTP 5xx)
    #[error("Server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[source] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// The service answered without any choices
    #[error("Completion service returned no choices")]
    EmptyResponse,

    /// Unknown or unexpected status
    #[error("Unknown error ({0}): {1}")]
    UnknownError(StatusCode, String),
}

impl CompletionError {
    /// Returns true if this error is transient and a caller may retry
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimitExceeded | Self::ServerError(_, _) | Self::Timeout | Self::NetworkError(_)
        )
    }

    /// Returns true if retrying the same request cannot succeed
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest(_) | Self::InvalidApiKey | Self::Forbidden(_) | Self::NotFound(_)
        )
    }

    /// Classify a non-success HTTP status and its body
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::InvalidRequest(body),
            StatusCode::UNAUTHORIZED => Self::InvalidApiKey,
            StatusCode::FORBIDDEN => Self::Forbidden(body),
            StatusCode::NOT_FOUND => Self::NotFound(body),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimitExceeded,
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => Self::Timeout,
            status if status.is_server_error() => Self::ServerError(status, body),
            _ => Self::UnknownError(status, body),
        }
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::NetworkError(err)
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid max_chunk_size: {0}. Must be at least 1")]
    InvalidChunkSize(usize),

    #[error("Invalid top_k: {0}. Must be at least 1")]
    InvalidTopK(usize),

    #[error("Invalid max_tokens: {0}. Must be at least 1")]
    InvalidMaxTokens(u32),

    #[error("Invalid temperature: {0}. Must be between 0.0 and 2.0")]
    InvalidTemperature(f32),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Generation model identifier cannot be empty")]
    EmptyModel,

    #[error("Completion service base URL cannot be empty")]
    EmptyBaseUrl,
}
