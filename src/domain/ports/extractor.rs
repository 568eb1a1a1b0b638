use crate::domain::errors::PipelineError;

/// Turns the raw bytes of an uploaded document into plain text
///
/// Returning an empty string is allowed (e.g. a scanned PDF with no text
/// layer); unreadable input is an [`PipelineError::Extraction`].
pub trait TextExtractor: Send + Sync {
    /// Extract all text from `bytes`
    fn extract(&self, bytes: &[u8]) -> Result<String, PipelineError>;

    /// Short format name used in logs
    fn format(&self) -> &'static str;
}
