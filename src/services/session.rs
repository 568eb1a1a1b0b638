//! Document session state machine.

use std::future::Future;

use crate::domain::errors::PipelineError;
use crate::domain::models::Config;

use super::rag_pipeline::RagPipeline;

/// Lifecycle of the pipeline for the current document
pub enum SessionState {
    /// No document loaded yet
    Uninitialized,
    /// Index built; questions can be answered
    Ready(RagPipeline),
    /// The last load failed; holds the error message
    Failed(String),
}

/// Holds at most one pipeline, replaced wholesale when a new document loads
pub struct DocumentSession {
    state: SessionState,
}

impl Default for DocumentSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSession {
    /// Start with no document
    pub const fn new() -> Self {
        Self {
            state: SessionState::Uninitialized,
        }
    }

    /// Current state
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether a pipeline is ready
    pub const fn is_ready(&self) -> bool {
        matches!(self.state, SessionState::Ready(_))
    }

    /// Replace the current pipeline with the one `build` produces
    ///
    /// The previous pipeline is dropped before building so a failed build
    /// never leaves the old document answerable.
    pub async fn load<F>(&mut self, build: F) -> Result<(), PipelineError>
    where
        F: Future<Output = Result<RagPipeline, PipelineError>>,
    {
        self.state = SessionState::Uninitialized;

        match build.await {
            Ok(pipeline) => {
                self.state = SessionState::Ready(pipeline);
                Ok(())
            }
            Err(e) => {
                tracing::error!(kind = e.kind(), error = %e, "document load failed");
                self.state = SessionState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Build a pipeline for `chunks` from configuration
    pub async fn load_document(
        &mut self,
        config: &Config,
        chunks: &[String],
    ) -> Result<(), PipelineError> {
        self.load(RagPipeline::from_config(config, chunks)).await
    }

    /// The ready pipeline, or a retrieval failure when none is loaded
    pub fn pipeline(&self) -> Result<&RagPipeline, PipelineError> {
        match &self.state {
            SessionState::Ready(pipeline) => Ok(pipeline),
            SessionState::Uninitialized => Err(PipelineError::Retrieval(
                "no document has been indexed".to_string(),
            )),
            SessionState::Failed(reason) => Err(PipelineError::Retrieval(format!(
                "no document has been indexed (last load failed: {reason})"
            ))),
        }
    }

    /// Answer `question` against the loaded document
    pub async fn answer(&self, question: &str) -> Result<String, PipelineError> {
        self.pipeline()?.answer(question).await
    }
}
