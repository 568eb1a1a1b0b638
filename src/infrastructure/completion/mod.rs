//! Chat-completion adapters
//!
//! HTTP client for OpenAI-compatible chat completions, configured for the
//! Groq endpoint by default.

pub mod client;

pub use client::{GroqClient, GroqClientConfig};
