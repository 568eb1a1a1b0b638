//! Infrastructure layer module
//!
//! Adapters that satisfy the domain ports and the ambient plumbing:
//! - Chunking, BERT embeddings, shared model registry, vector index
//! - Chat-completion HTTP client
//! - PDF and plain-text extraction
//! - Configuration management
//! - Logging infrastructure

pub mod completion;
pub mod config;
pub mod extraction;
pub mod logging;
pub mod vector;
