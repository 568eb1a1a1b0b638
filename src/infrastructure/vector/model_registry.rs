//! Process-wide registry of loaded embedding models
//!
//! Loading a sentence-transformer means downloading and deserializing
//! tens of megabytes of weights. The registry loads each model at most
//! once per process and hands out shared handles; concurrent requests for
//! the same model wait on the first load, while other models stay
//! available. Failed loads are not cached, so a later request retries.
//! Loaded models are never evicted.

use crate::domain::errors::PipelineError;
use crate::domain::models::EmbeddingModel;
use crate::domain::ports::EmbeddingService;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};
use tokio::sync::{Mutex, OnceCell};

use super::bert_model::BertEmbeddingModel;

static GLOBAL: LazyLock<ModelRegistry> = LazyLock::new(ModelRegistry::new);

type ModelSlot = Arc<OnceCell<Arc<dyn EmbeddingService>>>;

/// Cache of loaded embedding models keyed by model
#[derive(Default)]
pub struct ModelRegistry {
    slots: Mutex<HashMap<EmbeddingModel, ModelSlot>>,
}

impl ModelRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by the whole process
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Shared BERT handle for `model` from the process-wide registry
    pub async fn shared(
        model: EmbeddingModel,
        cache_dir: Option<PathBuf>,
    ) -> Result<Arc<dyn EmbeddingService>, PipelineError> {
        Self::global()
            .get_or_load(model, move || {
                let loaded = BertEmbeddingModel::new(model, cache_dir.as_deref())?;
                Ok(Arc::new(Arc::new(loaded)) as Arc<dyn EmbeddingService>)
            })
            .await
    }

    /// Return the cached handle for `model`, running `loader` on the
    /// blocking pool if none is cached yet
    ///
    /// The registry lock only guards slot lookup; a load holds just the
    /// slot for its own model.
    pub async fn get_or_load<F>(
        &self,
        model: EmbeddingModel,
        loader: F,
    ) -> Result<Arc<dyn EmbeddingService>, PipelineError>
    where
        F: FnOnce() -> anyhow::Result<Arc<dyn EmbeddingService>> + Send + 'static,
    {
        let slot = self.slot(model).await;
        if let Some(existing) = slot.get() {
            tracing::debug!(model = %model, "embedding model cache hit");
            return Ok(Arc::clone(existing));
        }

        let loaded = slot
            .get_or_try_init(|| async move {
                tokio::task::spawn_blocking(loader)
                    .await
                    .map_err(|e| PipelineError::Embedding(format!("model loader task failed: {e}")))?
                    .map_err(|e| {
                        tracing::error!(model = %model, error = %format!("{e:#}"), "embedding model failed to load");
                        PipelineError::Embedding(format!("{model}: {e}"))
                    })
            })
            .await?;

        Ok(Arc::clone(loaded))
    }

    /// Whether `model` is already loaded
    pub async fn contains(&self, model: EmbeddingModel) -> bool {
        self.slots
            .lock()
            .await
            .get(&model)
            .is_some_and(|slot| slot.initialized())
    }

    async fn slot(&self, model: EmbeddingModel) -> ModelSlot {
        let mut slots = self.slots.lock().await;
        Arc::clone(slots.entry(model).or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FixedEmbedder;

    #[async_trait]
    impl EmbeddingService for FixedEmbedder {
        async fn embed(&self, _text: &str) -> anyhow::Result<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }

        async fn embed_batch(&self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
        }

        fn dimensions(&self) -> usize {
            2
        }

        fn model_id(&self) -> &str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_loads_once_and_shares_handle() {
        let registry = ModelRegistry::new();
        let loads = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..3 {
            let loads = Arc::clone(&loads);
            let handle = registry
                .get_or_load(EmbeddingModel::AllMiniLmL6V2, move || {
                    loads.fetch_add(1, Ordering::SeqCst);
                    Ok(Arc::new(FixedEmbedder) as Arc<dyn EmbeddingService>)
                })
                .await
                .unwrap();
            handles.push(handle);
        }

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&handles[0], &handles[2]));
        assert!(registry.contains(EmbeddingModel::AllMiniLmL6V2).await);
        assert!(!registry.contains(EmbeddingModel::AllMiniLmL12V2).await);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let registry = ModelRegistry::new();

        let err = registry
            .get_or_load(EmbeddingModel::AllMiniLmL6V2, || {
                anyhow::bail!("network unreachable")
            })
            .await
            .err()
            .unwrap();
        assert!(matches!(err, PipelineError::Embedding(ref msg) if msg.contains("network unreachable")));
        assert!(!registry.contains(EmbeddingModel::AllMiniLmL6V2).await);

        let handle = registry
            .get_or_load(EmbeddingModel::AllMiniLmL6V2, || {
                Ok(Arc::new(FixedEmbedder) as Arc<dyn EmbeddingService>)
            })
            .await
            .unwrap();
        assert_eq!(handle.model_id(), "fixed");
    }

    #[tokio::test]
    async fn test_failed_load_keeps_only_top_level_message() {
        let registry = ModelRegistry::new();

        let err = registry
            .get_or_load(EmbeddingModel::AllMiniLmL6V2, || {
                Err(anyhow::anyhow!("dns error: no such host"))
                    .context("Failed to download tokenizer.json")
            })
            .await
            .err()
            .unwrap();

        let PipelineError::Embedding(message) = err else {
            panic!("expected an embedding failure");
        };
        assert_eq!(message, "all-MiniLM-L6-v2: Failed to download tokenizer.json");
    }

    #[tokio::test]
    async fn test_slow_load_does_not_block_other_models() {
        let registry = Arc::new(ModelRegistry::new());
        registry
            .get_or_load(EmbeddingModel::AllMiniLmL12V2, || {
                Ok(Arc::new(FixedEmbedder) as Arc<dyn EmbeddingService>)
            })
            .await
            .unwrap();

        let (release, gate) = std::sync::mpsc::channel::<()>();
        let slow = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                registry
                    .get_or_load(EmbeddingModel::AllMiniLmL6V2, move || {
                        gate.recv()?;
                        Ok(Arc::new(FixedEmbedder) as Arc<dyn EmbeddingService>)
                    })
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        let cached = tokio::time::timeout(
            Duration::from_secs(2),
            registry.get_or_load(EmbeddingModel::AllMiniLmL12V2, || {
                anyhow::bail!("already loaded")
            }),
        )
        .await
        .expect("cache hit should not wait for another model's load")
        .unwrap();
        assert_eq!(cached.model_id(), "fixed");
        assert!(!registry.contains(EmbeddingModel::AllMiniLmL6V2).await);

        release.send(()).unwrap();
        slow.await.unwrap().unwrap();
        assert!(registry.contains(EmbeddingModel::AllMiniLmL6V2).await);
    }
}
