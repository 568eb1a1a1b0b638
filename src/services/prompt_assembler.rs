//! Grounded prompt construction.

/// Fixed instruction preamble placed before the retrieved context
pub const PROMPT_PREAMBLE: &str = "You are a helpful AI assistant. Use the following context to answer \
the question in a detailed, accurate, and coherent manner. Do not indicate what information comes \
from the context versus your knowledge; provide a single, seamless answer.";

/// Build the generation prompt from retrieved chunks and the question
///
/// Chunks are newline-joined in the given order; an empty slice leaves the
/// context section empty. The prompt always ends with the question verbatim.
pub fn assemble<S: AsRef<str>>(question: &str, retrieved_chunks: &[S]) -> String {
    let context = retrieved_chunks
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n");

    format!("{PROMPT_PREAMBLE}\n\nContext:\n{context}\n\nQuestion:\n{question}")
}
