//! Fakes shared by the service unit tests.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::errors::CompletionError;
use crate::domain::models::{
    ChatCompletionRequest, ChatCompletionResponse, Choice, Config, ResponseMessage,
};
use crate::domain::ports::{CompletionClient, EmbeddingService};

const VOCABULARY: [&str; 8] = ["cat", "mat", "dog", "park", "sky", "blue", "apples", "grass"];

/// Counts vocabulary words; unknown text maps onto a shared fallback axis
pub struct KeywordEmbedder;

impl KeywordEmbedder {
    fn vector(text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        let mut vector: Vec<f32> = VOCABULARY
            .iter()
            .map(|word| lower.matches(word).count() as f32)
            .collect();
        // token-count axis keeps text without vocabulary words non-zero
        vector.push(0.1 * lower.split_whitespace().count() as f32);
        vector
    }
}

#[async_trait]
impl EmbeddingService for KeywordEmbedder {
    async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        Ok(Self::vector(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| Self::vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        VOCABULARY.len() + 1
    }

    fn model_id(&self) -> &str {
        "keyword"
    }
}

/// Always fails to embed
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingService for FailingEmbedder {
    async fn embed(&self, _text: &str) -> anyhow::Result<Vec<f32>> {
        anyhow::bail!("model weights unavailable")
    }

    async fn embed_batch(&self, _texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        anyhow::bail!("model weights unavailable")
    }

    fn dimensions(&self) -> usize {
        0
    }

    fn model_id(&self) -> &str {
        "failing"
    }
}

/// Indexes like [`KeywordEmbedder`] but fails the first `n` single-text
/// embeddings, which is how questions are embedded
pub struct QueryFailingEmbedder {
    remaining_failures: AtomicUsize,
}

impl QueryFailingEmbedder {
    pub const fn failing_first(n: usize) -> Self {
        Self {
            remaining_failures: AtomicUsize::new(n),
        }
    }
}

#[async_trait]
impl EmbeddingService for QueryFailingEmbedder {
    async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let failing = self
            .remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            anyhow::bail!("inference backend unavailable");
        }
        Ok(KeywordEmbedder::vector(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| KeywordEmbedder::vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        VOCABULARY.len() + 1
    }

    fn model_id(&self) -> &str {
        "query-failing"
    }
}

/// Replies with a fixed answer (or no choices) and records requests
pub struct ScriptedCompletion {
    answer: Option<String>,
    requests: Mutex<Vec<ChatCompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn without_choices() -> Self {
        Self {
            answer: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletion {
    async fn complete(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, CompletionError> {
        self.requests.lock().unwrap().push(request);
        let choices = self
            .answer
            .iter()
            .map(|content| Choice {
                index: 0,
                message: ResponseMessage {
                    role: "assistant".to_string(),
                    content: Some(content.clone()),
                },
                finish_reason: Some("stop".to_string()),
            })
            .collect();

        Ok(ChatCompletionResponse {
            id: None,
            model: None,
            choices,
            usage: None,
        })
    }
}

/// Fails every request with the given status
pub struct FailingCompletion {
    status: StatusCode,
}

impl FailingCompletion {
    pub const fn with_status(status: StatusCode) -> Self {
        Self { status }
    }
}

#[async_trait]
impl CompletionClient for FailingCompletion {
    async fn complete(
        &self,
        _request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, CompletionError> {
        Err(CompletionError::from_status(self.status, "simulated".to_string()))
    }
}

/// Default configuration with a dummy credential
pub fn config_with_key() -> Config {
    let mut config = Config::default();
    config.generation.api_key = Some("gsk_test".to_string());
    config
}
