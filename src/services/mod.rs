//! Service layer
//!
//! The retrieval pipeline proper: build-phase indexing through the
//! [`Retriever`], and query-phase retrieve, assemble, generate through
//! [`RagPipeline`]. [`DocumentSession`] owns the pipeline for whichever
//! document is currently loaded.

pub mod answer_generator;
pub mod prompt_assembler;
pub mod rag_pipeline;
pub mod retriever;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use answer_generator::AnswerGenerator;
pub use prompt_assembler::{assemble, PROMPT_PREAMBLE};
pub use rag_pipeline::RagPipeline;
pub use retriever::Retriever;
pub use session::{DocumentSession, SessionState};
