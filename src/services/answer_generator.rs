//! Answer generation through the remote completion service.

use std::sync::Arc;

use crate::domain::errors::{CompletionError, PipelineError};
use crate::domain::models::{ChatCompletionRequest, GenerationConfig};
use crate::domain::ports::CompletionClient;

/// Sends assembled prompts as single-turn requests
///
/// Failures surface immediately as [`PipelineError::Generation`]; nothing
/// is retried here.
pub struct AnswerGenerator {
    client: Arc<dyn CompletionClient>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl AnswerGenerator {
    /// Wrap `client` with the model and sampling settings from `config`
    pub fn new(client: Arc<dyn CompletionClient>, config: &GenerationConfig) -> Self {
        Self {
            client,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    /// Complete `prompt` and return the first choice, trimmed
    pub async fn generate(&self, prompt: &str) -> Result<String, PipelineError> {
        let request = ChatCompletionRequest::single_turn(
            &self.model,
            prompt,
            self.max_tokens,
            self.temperature,
        );

        let response = self.client.complete(request).await.map_err(|e| {
            tracing::error!(error = %e, transient = e.is_transient(), "answer generation failed");
            PipelineError::Generation(e)
        })?;

        let answer = response
            .first_content()
            .map(|content| content.trim().to_string())
            .ok_or(CompletionError::EmptyResponse)?;

        tracing::info!(model = %self.model, characters = answer.len(), "answer generated");
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{FailingCompletion, ScriptedCompletion};
    use reqwest::StatusCode;

    #[tokio::test]
    async fn test_returns_trimmed_first_choice() {
        let client = Arc::new(ScriptedCompletion::answering("\n  The cat sat on the mat.  \n"));
        let generator = AnswerGenerator::new(client.clone(), &GenerationConfig::default());

        let answer = generator.generate("prompt text").await.unwrap();
        assert_eq!(answer, "The cat sat on the mat.");

        let sent = client.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].messages.len(), 1);
        assert_eq!(sent[0].messages[0].role, "user");
        assert_eq!(sent[0].messages[0].content, "prompt text");
        assert_eq!(sent[0].model, "llama3-8b-8192");
        assert_eq!(sent[0].max_tokens, 500);
    }

    #[tokio::test]
    async fn test_no_choices_is_generation_failure() {
        let generator = AnswerGenerator::new(
            Arc::new(ScriptedCompletion::without_choices()),
            &GenerationConfig::default(),
        );

        let err = generator.generate("prompt").await.unwrap_err();
        assert!(matches!(err, PipelineError::Generation(CompletionError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_service_error_is_surfaced() {
        let generator = AnswerGenerator::new(
            Arc::new(FailingCompletion::with_status(StatusCode::SERVICE_UNAVAILABLE)),
            &GenerationConfig::default(),
        );

        let err = generator.generate("prompt").await.unwrap_err();
        match err {
            PipelineError::Generation(inner) => assert!(inner.is_transient()),
            other => panic!("expected Generation, got {other:?}"),
        }
    }
}
