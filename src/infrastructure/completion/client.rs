use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::domain::errors::CompletionError;
use crate::domain::models::{ChatCompletionRequest, ChatCompletionResponse, GenerationConfig};
use crate::domain::ports::CompletionClient;
use crate::infrastructure::logging::{redact_key, SecretScrubber};

/// Configuration for the completion HTTP client
#[derive(Clone)]
pub struct GroqClientConfig {
    /// Bearer credential
    pub api_key: String,

    /// Base URL; `/v1/chat/completions` is appended
    pub base_url: String,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl GroqClientConfig {
    /// Client settings from the generation section, with the credential
    /// already checked by the caller
    pub fn from_generation(generation: &GenerationConfig, api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: generation.base_url.clone(),
            timeout_secs: generation.timeout_secs,
        }
    }
}

impl std::fmt::Debug for GroqClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqClientConfig")
            .field("api_key", &redact_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// HTTP client for OpenAI-compatible chat completions
///
/// One call is one request: no retry, no rate limiting. Non-success
/// statuses are classified into [`CompletionError`] so callers can apply
/// their own policy.
pub struct GroqClient {
    http_client: ReqwestClient,
    api_key: String,
    endpoint: String,
    scrubber: SecretScrubber,
}

impl GroqClient {
    /// Create a new client
    pub fn new(config: GroqClientConfig) -> Result<Self, CompletionError> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(4)
            .build()
            .map_err(CompletionError::NetworkError)?;

        let endpoint = format!(
            "{}/v1/chat/completions",
            config.base_url.trim_end_matches('/')
        );

        debug!(
            endpoint = %endpoint,
            api_key = %redact_key(&config.api_key),
            timeout_secs = config.timeout_secs,
            "completion client created"
        );

        Ok(Self {
            http_client,
            api_key: config.api_key,
            endpoint,
            scrubber: SecretScrubber::new(),
        })
    }

    /// Full URL requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    #[instrument(skip(self, request), fields(model = %request.model, max_tokens = request.max_tokens))]
    async fn complete(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, CompletionError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            let body = self.scrubber.scrub(&body);
            warn!(status = status.as_u16(), body = %body, "completion request rejected");
            return Err(CompletionError::from_status(status, body));
        }

        let bytes = response.bytes().await?;
        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes)?;

        if let Some(usage) = &parsed.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion received"
            );
        }

        Ok(parsed)
    }
}
