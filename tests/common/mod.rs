//! Shared fakes for the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use docqa::domain::models::Config;
use docqa::domain::ports::EmbeddingService;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};

pub const DIMENSIONS: usize = 384;

/// Feature-hashed bag of words, L2-normalized
///
/// Texts that share words land close together, which is enough to exercise
/// retrieval ordering without model weights.
pub struct LexicalEmbedder;

impl LexicalEmbedder {
    pub fn vector(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; DIMENSIONS];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            word.to_lowercase().hash(&mut hasher);
            let slot = (hasher.finish() % DIMENSIONS as u64) as usize;
            vector[slot] += 1.0;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        vector
    }
}

#[async_trait]
impl EmbeddingService for LexicalEmbedder {
    async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        Ok(Self::vector(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| Self::vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        DIMENSIONS
    }

    fn model_id(&self) -> &str {
        "lexical-test"
    }
}

/// Lexical embedder that counts every text it embeds
#[derive(Default)]
pub struct CountingEmbedder {
    calls: AtomicUsize,
}

impl CountingEmbedder {
    pub fn embedded(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingService for CountingEmbedder {
    async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(LexicalEmbedder::vector(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(texts.len(), Ordering::SeqCst);
        Ok(texts.iter().map(|t| LexicalEmbedder::vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        DIMENSIONS
    }

    fn model_id(&self) -> &str {
        "counting-test"
    }
}

/// Embedder whose model never loads
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingService for FailingEmbedder {
    async fn embed(&self, _text: &str) -> anyhow::Result<Vec<f32>> {
        anyhow::bail!("weights missing")
    }

    async fn embed_batch(&self, _texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        anyhow::bail!("weights missing")
    }

    fn dimensions(&self) -> usize {
        DIMENSIONS
    }

    fn model_id(&self) -> &str {
        "failing-test"
    }
}

/// Indexes like [`LexicalEmbedder`] but fails the first `n` question embeddings
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
        Ok(LexicalEmbedder::vector(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| LexicalEmbedder::vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        DIMENSIONS
    }

    fn model_id(&self) -> &str {
        "query-failing-test"
    }
}

/// Configuration pointing the completion client at `base_url`
pub fn config_for(base_url: &str) -> Config {
    let mut config = Config::default();
    config.generation.api_key = Some("gsk_integration_test_key".to_string());
    config.generation.base_url = base_url.to_string();
    config.generation.timeout_secs = 5;
    config
}

/// Chat completion body with a single assistant choice
pub fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "llama3-8b-8192",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ],
        "usage": { "prompt_tokens": 42, "completion_tokens": 7, "total_tokens": 49 }
    })
}
