//! Domain layer for document question answering
//!
//! Pure models, port traits and the error taxonomy shared by every
//! component of the retrieval pipeline.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{CompletionError, ConfigError, PipelineError};
