use async_trait::async_trait;

use crate::domain::errors::CompletionError;
use crate::domain::models::{ChatCompletionRequest, ChatCompletionResponse};

/// Client for an OpenAI-compatible chat-completion service
///
/// One call is one HTTP exchange. Implementations do not retry; callers
/// inspect [`CompletionError::is_transient`] to decide.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a completion request and return the parsed response
    async fn complete(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, CompletionError>;
}
